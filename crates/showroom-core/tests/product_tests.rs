// Product placement: placeholder geometry, custom material, attached light.

use glam::Vec3;
use showroom_core::product::{Product3D, ProductLight, ProductManager, ProductMaterial};
use showroom_core::{EngineConfig, MaterialLibrary, RenderEngine, SceneError};

fn setup() -> (RenderEngine, MaterialLibrary, ProductManager) {
    let mut engine = RenderEngine::new(EngineConfig::default());
    engine.initialize(800, 600).expect("engine init");
    (engine, MaterialLibrary::new(), ProductManager::new())
}

fn pendant() -> Product3D {
    let mut p = Product3D::new("pendant-01", Vec3::new(0.0, 2.2, 0.0));
    p.name = "Pendant lamp".to_string();
    p.model_path = Some("models/pendant.glb".to_string());
    p.scale = 0.5;
    p.material = ProductMaterial {
        base_color: "#B87333".to_string(),
        roughness: 0.3,
        metallic: 0.9,
    };
    p.light = Some(ProductLight {
        color: "#FFE0B0".to_string(),
        intensity: 1.5,
        range: 6.0,
        temperature_k: 2700.0,
    });
    p
}

#[test]
fn place_builds_mesh_material_and_light() {
    let (mut engine, mut materials, mut products) = setup();
    let node = products.place(&mut engine, &mut materials, &pendant()).unwrap();

    let mesh = engine.node(node).unwrap().mesh.clone().unwrap();
    assert!(mesh.receive_shadows);
    let material = engine.material(mesh.material.unwrap()).unwrap();
    assert_eq!(material.name, "product-pendant-01");
    assert!((material.metallic - 0.9).abs() < 1e-6);

    let placed = *products.get("pendant-01").unwrap();
    let light = engine.light(placed.light.unwrap()).unwrap();
    assert_eq!(light.parent, Some(node));
    let (world, _) = engine.light_world_frame(placed.light.unwrap()).unwrap();
    assert!(world.distance(Vec3::new(0.0, 2.2, 0.0)) < 1e-5);
}

#[test]
fn replacing_and_removing_cleans_up() {
    let (mut engine, mut materials, mut products) = setup();
    products.place(&mut engine, &mut materials, &pendant()).unwrap();
    products.place(&mut engine, &mut materials, &pendant()).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(engine.light_count(), 1);
    assert_eq!(engine.material_count(), 1);

    assert!(products.remove(&mut engine, &mut materials, "pendant-01"));
    assert!(!products.remove(&mut engine, &mut materials, "pendant-01"));
    assert_eq!(engine.node_count(), 0);
    assert_eq!(engine.light_count(), 0);
    assert_eq!(engine.material_count(), 0);
}

#[test]
fn product_light_can_be_adjusted() {
    let (mut engine, mut materials, mut products) = setup();
    products.place(&mut engine, &mut materials, &pendant()).unwrap();
    assert!(products.update_light_intensity(&mut engine, "pendant-01", 3.0));
    assert_eq!(products.update_light_color(&mut engine, "pendant-01", "#0000FF"), Ok(true));
    let lid = products.get("pendant-01").unwrap().light.unwrap();
    let light = engine.light(lid).unwrap();
    assert_eq!(light.intensity, 3.0);
    assert_eq!(light.diffuse, Vec3::Z);

    assert!(!products.update_light_intensity(&mut engine, "missing", 1.0));
    assert!(matches!(
        products.update_light_color(&mut engine, "pendant-01", "blue"),
        Err(SceneError::InvalidColor(_))
    ));
}

#[test]
fn plain_products_have_no_light_and_temperature_fills_blank_color() {
    let (mut engine, mut materials, mut products) = setup();
    let vase = Product3D::new("vase", Vec3::ZERO);
    products.place(&mut engine, &mut materials, &vase).unwrap();
    assert!(products.get("vase").unwrap().light.is_none());

    let mut warm = Product3D::new("sconce", Vec3::new(1.0, 1.5, -2.0));
    warm.light = Some(ProductLight::default());
    products.place(&mut engine, &mut materials, &warm).unwrap();
    let lid = products.get("sconce").unwrap().light.unwrap();
    let color = engine.light(lid).unwrap().diffuse;
    assert!(color.x > color.z);

    products.clear(&mut engine, &mut materials);
    assert!(products.is_empty());
    assert_eq!(engine.light_count(), 0);
}
