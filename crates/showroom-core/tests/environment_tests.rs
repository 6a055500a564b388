// Environment manager: room shell, furniture, reloads and the end-to-end scene.

use glam::Vec3;
use showroom_core::catalog::{
    CameraShot, EnvironmentGeometry, EnvironmentObject, EnvironmentPreset, PlaneConfig, RoomCategory, WallConfig,
    CAMERA_PRESETS, LIGHTING_PRESETS,
};
use showroom_core::{EngineConfig, EnvironmentManager, LightingManager, MaterialLibrary, PresetCatalog, RenderEngine};

static ODD_OBJECTS: [EnvironmentObject; 2] = [
    EnvironmentObject::new("hologram", "hologram_projector", Vec3::new(1.0, 0.0, 1.0), "metal", "#445566"),
    EnvironmentObject::new("chair", "chair", Vec3::new(-1.0, 0.0, 0.0), "velvet", "not-a-color"),
];

static ODD_ENVIRONMENTS: [EnvironmentPreset; 1] = [EnvironmentPreset {
    id: "odd-room",
    name: "Odd room",
    description: "Preset data the loader has to patch over",
    category: RoomCategory::Bedroom,
    geometry: EnvironmentGeometry {
        walls: WallConfig {
            width: 4.0,
            height: 2.5,
            depth: 3.0,
            material: "wall",
            color: "#FFFFFF",
        },
        floor: PlaneConfig {
            width: 4.0,
            depth: 3.0,
            material: "wood_floor",
            color: "#A0522D",
        },
        ceiling: PlaneConfig {
            width: 4.0,
            depth: 3.0,
            material: "plaster",
            color: "#FAFAFA",
        },
        objects: &ODD_OBJECTS,
    },
    lighting_recommendation: "Neutral studio",
    camera_shots: &[],
}];

fn setup() -> (RenderEngine, MaterialLibrary, EnvironmentManager) {
    let mut engine = RenderEngine::new(EngineConfig::default());
    engine.initialize(1024, 768).expect("engine init");
    (engine, MaterialLibrary::new(), EnvironmentManager::new())
}

fn root_count(engine: &RenderEngine) -> usize {
    engine.nodes().filter(|(_, n)| n.parent.is_none()).count()
}

#[test]
fn living_room_with_warm_light_end_to_end() {
    let (mut engine, mut materials, mut env) = setup();
    let catalog = PresetCatalog::builtin();
    let mut lighting = LightingManager::new();

    let state = env
        .load_environment(&mut engine, &mut materials, &catalog, "living-room")
        .unwrap();
    lighting.apply_preset(&mut engine, &catalog, "warm").unwrap();

    assert_eq!(env.room_mesh_count(), 6);
    assert_eq!(env.furniture_count(), 4);
    assert_eq!(root_count(&engine), 6 + 4);
    let walls = env
        .room_meshes()
        .iter()
        .filter(|id| engine.node(**id).unwrap().name.starts_with("wall_"))
        .count();
    assert_eq!(walls, 4);

    assert_eq!(lighting.tracked_light_count(), 2);
    let warm = catalog.lighting_preset("warm").unwrap();
    let expected = engine.base_ambient_color() * warm.ambient_intensity;
    assert!(engine.ambient_color().distance(expected) < 1e-6);

    assert_eq!(state.environment_id, "living-room");
    assert_eq!(state.suggested_camera.unwrap().name, "Sofa view");
}

#[test]
fn every_new_mesh_receives_shadows() {
    let (mut engine, mut materials, mut env) = setup();
    env.load_environment(&mut engine, &mut materials, &PresetCatalog::builtin(), "bedroom")
        .unwrap();
    let meshes: Vec<_> = engine.nodes().filter_map(|(_, n)| n.mesh.as_ref()).collect();
    assert!(!meshes.is_empty());
    assert!(meshes.iter().all(|m| m.receive_shadows));
}

#[test]
fn room_shell_geometry_follows_preset() {
    let (mut engine, mut materials, mut env) = setup();
    env.load_environment(&mut engine, &mut materials, &PresetCatalog::builtin(), "living-room")
        .unwrap();
    let by_name = |name: &str| {
        engine
            .nodes()
            .find(|(_, n)| n.name == name)
            .map(|(_, n)| n.clone())
            .unwrap()
    };
    let back = by_name("wall_back");
    assert_eq!(back.transform.translation, Vec3::new(0.0, 1.4, -2.5));
    let ceiling = by_name("ceiling");
    assert!((ceiling.transform.translation.y - 2.8).abs() < 1e-6);
    // flipped to face down
    let normal = ceiling.transform.rotation * Vec3::Y;
    assert!(normal.y < -0.99);
}

#[test]
fn reload_disposes_previous_room() {
    let (mut engine, mut materials, mut env) = setup();
    let catalog = PresetCatalog::builtin();
    env.load_environment(&mut engine, &mut materials, &catalog, "modern-living-room")
        .unwrap();
    env.load_environment(&mut engine, &mut materials, &catalog, "bathroom")
        .unwrap();
    let bathroom = catalog.environment_preset("bathroom").unwrap();
    assert_eq!(root_count(&engine), 6 + bathroom.geometry.objects.len());
    assert!(engine.nodes().all(|(_, n)| !n.name.starts_with("sofa")));
}

#[test]
fn unknown_preset_keeps_current_room() {
    let (mut engine, mut materials, mut env) = setup();
    let catalog = PresetCatalog::builtin();
    env.load_environment(&mut engine, &mut materials, &catalog, "bathroom")
        .unwrap();
    let before = engine.node_count();
    assert!(env
        .load_environment(&mut engine, &mut materials, &catalog, "garage")
        .is_err());
    assert_eq!(engine.node_count(), before);
    assert_eq!(env.state().unwrap().environment_id, "bathroom");
}

#[test]
fn unknown_furniture_becomes_placeholder_cube() {
    let (mut engine, mut materials, mut env) = setup();
    let catalog = PresetCatalog::new(&LIGHTING_PRESETS, &ODD_ENVIRONMENTS, &CAMERA_PRESETS);
    let state = env
        .load_environment(&mut engine, &mut materials, &catalog, "odd-room")
        .unwrap();
    assert_eq!(state.furniture_count, 2);
    assert!(state.suggested_camera.is_none());

    let holo = env.furniture().iter().find(|f| f.id == "hologram").unwrap();
    assert!(holo.placeholder);
    let children = engine.children(holo.root);
    assert_eq!(children.len(), 1);
    let cube = engine.node(children[0]).unwrap();
    assert!(cube.is_mesh());
    assert_eq!(engine.world_matrix(holo.root).unwrap().w_axis.truncate(), Vec3::new(1.0, 0.0, 1.0));

    // unknown material type and a bad color still produce a chair
    let chair = env.furniture().iter().find(|f| f.id == "chair").unwrap();
    assert!(!chair.placeholder);
    assert_eq!(engine.children(chair.root).len(), 6);
}

#[test]
fn catalog_validation_flags_odd_room() {
    let catalog = PresetCatalog::new(&LIGHTING_PRESETS, &ODD_ENVIRONMENTS, &CAMERA_PRESETS);
    let issues = catalog.validate();
    let messages: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
    assert!(messages.iter().any(|m| m.contains("hologram_projector")));
    let velvet = messages.iter().find(|m| m.contains("velvet")).unwrap();
    assert!(velvet.contains("known:") && velvet.contains("fabric"));
    assert!(messages.iter().any(|m| m.contains("not-a-color")));
    assert!(messages.iter().any(|m| m.contains("no camera shots")));
}

#[test]
fn yaw_turns_the_root() {
    let (mut engine, mut materials, mut env) = setup();
    env.load_environment(&mut engine, &mut materials, &PresetCatalog::builtin(), "living-room")
        .unwrap();
    let tv = env.furniture().iter().find(|f| f.id == "tv").unwrap();
    let forward = engine.node(tv.root).unwrap().transform.rotation * Vec3::Z;
    assert!((forward.z + 1.0).abs() < 1e-5);
}

#[test]
fn shots_and_recommendation_lookup() {
    let env = EnvironmentManager::new();
    let catalog = PresetCatalog::builtin();
    let shots: &[CameraShot] = env.camera_shots(&catalog, "living-room");
    assert_eq!(shots.len(), 2);
    assert!(env.camera_shots(&catalog, "nowhere").is_empty());
    assert_eq!(env.recommended_lighting(&catalog, "living-room"), Some("Warm evening light"));
    assert_eq!(env.environments_by_category(&catalog, RoomCategory::LivingRoom).len(), 2);
}

#[test]
fn clear_removes_room_but_keeps_materials_cached() {
    let (mut engine, mut materials, mut env) = setup();
    env.load_environment(&mut engine, &mut materials, &PresetCatalog::builtin(), "bedroom")
        .unwrap();
    let cached = materials.cached_count();
    env.clear(&mut engine);
    assert_eq!(engine.node_count(), 0);
    assert_eq!(materials.cached_count(), cached);
}
