// Material library: caching, lookup table, custom and emissive materials.

use glam::Vec3;
use showroom_core::color::{from_temperature, parse_hex, to_hex};
use showroom_core::materials::{material_params, DEFAULT_PARAMS};
use showroom_core::{EngineConfig, MaterialLibrary, RenderEngine, SceneError};

fn setup() -> (RenderEngine, MaterialLibrary) {
    let mut engine = RenderEngine::new(EngineConfig::default());
    engine.initialize(640, 480).expect("engine init");
    (engine, MaterialLibrary::new())
}

#[test]
fn same_type_and_color_is_cached() {
    let (mut engine, mut lib) = setup();
    let a = lib.get(&mut engine, "wood", "#8B6F47").unwrap();
    let b = lib.get(&mut engine, "wood", "#8B6F47").unwrap();
    assert_eq!(a, b);
    // color keys are case-insensitive
    let c = lib.get(&mut engine, "wood", "#8b6f47").unwrap();
    assert_eq!(a, c);
    assert_eq!(engine.material_count(), 1);

    let other = lib.get(&mut engine, "wood", "#000000").unwrap();
    assert_ne!(a, other);
    assert_eq!(lib.cached_count(), 2);
}

#[test]
fn table_drives_roughness_and_metallic() {
    let (mut engine, mut lib) = setup();
    let glass = lib.glass(&mut engine, "#FFFFFF").unwrap();
    let glass = engine.material(glass).unwrap();
    assert!((glass.roughness - 0.05).abs() < 1e-6);
    assert!(glass.is_transparent());

    let metal = lib.get(&mut engine, "metal", "#AAAAAA").unwrap();
    let metal = engine.material(metal).unwrap();
    assert!(metal.metallic >= 0.8);

    let fabric = material_params("fabric").unwrap();
    assert!((0.7..=0.9).contains(&fabric.roughness));
    assert_eq!(fabric.metallic, 0.0);
}

#[test]
fn unknown_type_uses_defaults() {
    let (mut engine, mut lib) = setup();
    let id = lib.get(&mut engine, "unobtainium", "#123456").unwrap();
    let m = engine.material(id).unwrap();
    assert_eq!(m.roughness, DEFAULT_PARAMS.roughness);
    assert_eq!(m.metallic, 0.0);
    assert!(!m.is_transparent());
}

#[test]
fn bad_color_falls_back_to_grey() {
    let (mut engine, mut lib) = setup();
    let id = lib.get(&mut engine, "plastic", "mauve-ish").unwrap();
    assert_eq!(engine.material(id).unwrap().base_color, Vec3::splat(0.5));
}

#[test]
fn emissive_and_screen_glow() {
    let (mut engine, mut lib) = setup();
    let id = lib.emissive(&mut engine, "#FF8800", 2.0).unwrap();
    let m = engine.material(id).unwrap();
    assert!((m.emissive.x - 2.0).abs() < 1e-6);
    assert_eq!(lib.emissive(&mut engine, "#FF8800", 2.0).unwrap(), id);

    let screen = lib.get(&mut engine, "screen", "#2A2A3A").unwrap();
    assert!(engine.material(screen).unwrap().emissive.length() > 0.0);
}

#[test]
fn custom_materials_are_never_shared() {
    let (mut engine, mut lib) = setup();
    let a = lib.custom_pbr(&mut engine, "product-a", "#FFFFFF", 0.3, 0.6).unwrap();
    let b = lib.custom_pbr(&mut engine, "product-a", "#FFFFFF", 0.3, 0.6).unwrap();
    assert_ne!(a, b);
    lib.release_custom(&mut engine, a);
    assert!(engine.material(a).is_none());
    assert_eq!(lib.len(), 1);
}

#[test]
fn clear_disposes_and_cache_rebuilds() {
    let (mut engine, mut lib) = setup();
    let first = lib.get(&mut engine, "stone", "#808080").unwrap();
    lib.custom_pbr(&mut engine, "x", "#FFFFFF", 0.5, 0.0).unwrap();
    lib.clear(&mut engine);
    assert!(lib.is_empty());
    assert_eq!(engine.material_count(), 0);
    let second = lib.get(&mut engine, "stone", "#808080").unwrap();
    assert_ne!(first, second);
}

#[test]
fn materials_need_a_running_engine() {
    let mut engine = RenderEngine::new(EngineConfig::default());
    let mut lib = MaterialLibrary::new();
    assert_eq!(lib.get(&mut engine, "wood", "#FFFFFF"), Err(SceneError::NotInitialized));
}

#[test]
fn hex_parsing_forms() {
    assert_eq!(parse_hex("#FFFFFF").unwrap(), Vec3::ONE);
    assert_eq!(parse_hex("000000").unwrap(), Vec3::ZERO);
    assert_eq!(parse_hex("#F00").unwrap(), Vec3::new(1.0, 0.0, 0.0));
    assert!(parse_hex("#GG0000").is_err());
    assert!(parse_hex("#12345").is_err());
    // signs are not hex digits, even where from_str_radix would take them
    assert!(parse_hex("#+F+F+F").is_err());
    assert!(parse_hex("+FF").is_err());
    assert!(parse_hex("#FF-000").is_err());
    assert_eq!(to_hex(Vec3::new(1.0, 0.5, 0.0)), "#FF8000");
}

#[test]
fn color_temperature_runs_warm_to_cool() {
    let warm = from_temperature(3000.0);
    let cool = from_temperature(9000.0);
    assert!(warm.x > warm.z);
    assert!(cool.z >= cool.x);
    assert_eq!(from_temperature(6600.0).x, 1.0);
}
