// Render engine adapter: lifecycle, factories, scene graph and shadows.

use glam::{Quat, Vec3};
use showroom_core::engine::{EngineState, MeshDesc, SpotCone, Transform};
use showroom_core::engine::sanitize_shadow_map_size;
use showroom_core::geometry::Shape;
use showroom_core::{EngineConfig, RenderEngine, SceneError};

fn running() -> RenderEngine {
    let mut engine = RenderEngine::new(EngineConfig::default());
    engine.initialize(1920, 1080).expect("engine init");
    engine
}

#[test]
fn factories_fail_before_initialize() {
    let mut engine = RenderEngine::new(EngineConfig::default());
    assert_eq!(engine.state(), EngineState::Uninitialized);
    assert_eq!(
        engine.create_mesh(MeshDesc::new("box", Shape::cube(1.0))),
        Err(SceneError::NotInitialized)
    );
    assert_eq!(
        engine.create_point_light("p", Vec3::ZERO, 1.0, 5.0, Vec3::ONE),
        Err(SceneError::NotInitialized)
    );
    assert_eq!(
        engine.create_static_camera(0.0, 1.0, 5.0, Vec3::ZERO),
        Err(SceneError::NotInitialized)
    );
}

#[test]
fn factories_fail_after_dispose_and_callbacks_go_quiet() {
    let mut engine = running();
    engine.dispose();
    assert_eq!(engine.state(), EngineState::Disposed);
    assert_eq!(
        engine.create_pbr_material("m", Vec3::ONE, 0.5, 0.0, None),
        Err(SceneError::Disposed)
    );
    assert_eq!(engine.initialize(10, 10), Err(SceneError::Disposed));
    engine.resize(100, 100);
    assert_eq!(engine.surface_size(), (1920, 1080));
    assert!(!engine.frame(0.016));
    assert_eq!(engine.performance_info().meshes, 0);
}

#[test]
fn render_loop_can_stop_and_resume() {
    let mut engine = running();
    assert!(engine.frame(0.016));
    engine.stop_render_loop();
    assert!(!engine.frame(0.016));
    engine.resume_render_loop();
    assert!(engine.frame(0.016));
    assert_eq!(engine.frame_index(), 2);
}

#[test]
fn pbr_parameters_are_clamped() {
    let mut engine = running();
    let id = engine
        .create_pbr_material("m", Vec3::ONE, 1.7, -0.2, Some(Vec3::X))
        .unwrap();
    let m = engine.material(id).unwrap();
    assert_eq!(m.roughness, 1.0);
    assert_eq!(m.metallic, 0.0);
    assert_eq!(m.emissive, Vec3::X);
}

#[test]
fn shadow_map_registers_existing_and_new_meshes() {
    let mut engine = running();
    let a = engine.create_mesh(MeshDesc::new("a", Shape::cube(1.0))).unwrap();
    let sun = engine
        .create_directional_light("sun", Vec3::new(0.0, -1.0, 0.3), Vec3::new(0.0, 5.0, 0.0), 1.0, Vec3::ONE)
        .unwrap();
    let sid = engine.create_shadow_map(sun, 2048).unwrap();
    let b = engine.create_mesh(MeshDesc::new("b", Shape::cube(1.0))).unwrap();
    let casters = &engine.shadow_generator(sid).unwrap().casters;
    assert!(casters.contains(&a) && casters.contains(&b));

    engine.dispose_node(a);
    assert!(!engine.shadow_generator(sid).unwrap().casters.contains(&a));

    engine.dispose_light(sun);
    assert!(engine.shadow_generator(sid).is_none());
}

#[test]
fn point_lights_cannot_cast_shadows() {
    let mut engine = running();
    let p = engine
        .create_point_light("bulb", Vec3::Y, 1.0, 4.0, Vec3::ONE)
        .unwrap();
    assert_eq!(engine.create_shadow_map(p, 1024), Err(SceneError::ShadowUnsupported));
}

#[test]
fn spot_light_keeps_cone_and_normalized_direction() {
    let mut engine = running();
    let cone = SpotCone {
        angle: 0.7,
        exponent: 2.0,
        decay: 1.0,
    };
    let id = engine
        .create_spot_light("spot", Vec3::Y * 3.0, Vec3::new(0.0, -2.0, 0.0), cone, 1.0, 6.0, Vec3::ONE)
        .unwrap();
    let light = engine.light(id).unwrap();
    assert_eq!(light.cone, Some(cone));
    assert_eq!(light.direction, Vec3::NEG_Y);
}

#[test]
fn shadow_sizes_are_sanitized() {
    assert_eq!(sanitize_shadow_map_size(2048), 2048);
    assert_eq!(sanitize_shadow_map_size(1000), 1024);
    assert_eq!(sanitize_shadow_map_size(16), 256);
    assert_eq!(sanitize_shadow_map_size(1 << 20), 4096);
}

#[test]
fn world_matrix_composes_parents() {
    let mut engine = running();
    let root = engine
        .create_node(
            "root",
            Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)).with_scale(Vec3::splat(2.0)),
            None,
        )
        .unwrap();
    let child = engine
        .create_mesh(MeshDesc::new("child", Shape::cube(1.0)).at(Vec3::new(0.0, 1.0, 0.0)).parent(root))
        .unwrap();
    let m = engine.world_matrix(child).unwrap();
    let p = m.transform_point3(Vec3::ZERO);
    assert!(p.distance(Vec3::new(1.0, 2.0, 0.0)) < 1e-6);

    engine.node_mut(root).unwrap().transform.rotation = Quat::from_rotation_y(std::f32::consts::PI);
    engine.node_mut(root).unwrap().visible = false;
    assert!(!engine.is_visible(child));
}

#[test]
fn dispose_node_takes_subtree_and_parented_lights() {
    let mut engine = running();
    let root = engine.create_node("root", Transform::IDENTITY, None).unwrap();
    let mesh = engine
        .create_mesh(MeshDesc::new("part", Shape::cube(1.0)).parent(root))
        .unwrap();
    let lamp = engine
        .create_point_light("lamp", Vec3::ZERO, 1.0, 3.0, Vec3::ONE)
        .unwrap();
    engine.parent_light(lamp, mesh).unwrap();
    assert_eq!(engine.dispose_node(root), 2);
    assert_eq!(engine.node_count(), 0);
    assert!(engine.light(lamp).is_none());
}

#[test]
fn unknown_parent_is_rejected() {
    let mut engine = running();
    let root = engine.create_node("root", Transform::IDENTITY, None).unwrap();
    engine.dispose_node(root);
    let err = engine
        .create_mesh(MeshDesc::new("orphan", Shape::cube(1.0)).parent(root))
        .unwrap_err();
    assert!(matches!(err, SceneError::UnknownHandle(_)));
}

#[test]
fn static_camera_is_locked_and_degenerate_orbit_rejected() {
    let mut engine = running();
    assert_eq!(
        engine.create_orbit_camera(0.0, 1.0, 0.0, Vec3::ZERO),
        Err(SceneError::DegenerateOrbit)
    );
    engine.create_static_camera(0.5, 1.0, 6.0, Vec3::ZERO).unwrap();
    let cam = engine.camera().unwrap();
    assert!(!cam.inputs_attached());
    assert_eq!(cam.lower_radius_limit, 6.0);
    assert_eq!(cam.upper_radius_limit, 6.0);
    assert!((cam.fov - 0.8).abs() < 1e-6);
}

#[test]
fn performance_info_counts_scene() {
    let mut engine = running();
    engine.create_mesh(MeshDesc::new("a", Shape::cube(1.0))).unwrap();
    engine
        .create_mesh(MeshDesc::new("g", Shape::ground(2.0, 2.0, 4)))
        .unwrap();
    engine
        .create_point_light("p", Vec3::Y, 1.0, 5.0, Vec3::ONE)
        .unwrap();
    for _ in 0..60 {
        engine.frame(1.0 / 60.0);
    }
    let info = engine.performance_info();
    assert_eq!(info.meshes, 2);
    assert_eq!(info.lights, 1);
    assert_eq!(info.triangles, 12 + 32);
    assert!((info.fps - 60.0).abs() < 1.0);
}

#[test]
fn ambient_and_clear_color_come_from_config() {
    let mut engine = running();
    let base = engine.base_ambient_color();
    assert_eq!(base, Vec3::new(0.1, 0.1, 0.15));
    engine.set_ambient_intensity(0.5);
    engine.set_ambient_intensity(0.5);
    assert!(engine.ambient_color().distance(base * 0.5) < 1e-7);
    assert!((engine.clear_color().x - 0.17).abs() < 1e-6);
}
