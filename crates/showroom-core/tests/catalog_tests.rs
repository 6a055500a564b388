// Preset catalog lookups and validation of the built-in tables.

use showroom_core::catalog::{LightingCategory, RoomCategory};
use showroom_core::engine::LightKind;
use showroom_core::PresetCatalog;

#[test]
fn builtin_tables_validate_clean() {
    let issues = PresetCatalog::builtin().validate();
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn lookups_by_id() {
    let catalog = PresetCatalog::builtin();
    assert_eq!(catalog.lighting_preset("warm").unwrap().lights.len(), 2);
    assert_eq!(catalog.environment_preset("living-room").unwrap().geometry.walls.width, 6.0);
    assert!(catalog.camera_preset("default").is_some());
    assert!(catalog.lighting_preset("Warm").is_none());
    assert!(catalog.environment_preset("").is_none());
}

#[test]
fn categories_keep_table_order() {
    let catalog = PresetCatalog::builtin();
    let living: Vec<_> = catalog
        .environments_by_category(RoomCategory::LivingRoom)
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(living, vec!["living-room", "modern-living-room"]);

    let bath: Vec<_> = catalog
        .cameras_by_category(RoomCategory::Bathroom)
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(bath, vec!["bathroom-modern", "bathroom-rustic", "bathroom-spa"]);

    assert_eq!(catalog.lighting_by_category(LightingCategory::Dramatic).len(), 1);
}

#[test]
fn warm_preset_matches_room_scenario() {
    let warm = PresetCatalog::builtin().lighting_preset("warm").unwrap();
    assert!(!warm.bloom.enabled);
    assert_eq!(warm.lights[0].kind, LightKind::Directional);
    assert!(warm.lights.iter().filter(|l| l.wants_shadows()).count() <= 1);
}

#[test]
fn every_spot_light_carries_a_cone() {
    for preset in PresetCatalog::builtin().lighting_presets() {
        for light in preset.lights {
            if light.kind == LightKind::Spot {
                assert!(light.spot.is_some(), "{}/{}", preset.id, light.id);
            }
        }
    }
}

#[test]
fn category_names_round_trip() {
    for c in RoomCategory::ALL {
        assert_eq!(RoomCategory::parse(c.as_str()), Some(c));
    }
    for c in LightingCategory::ALL {
        assert_eq!(LightingCategory::parse(c.as_str()), Some(c));
    }
    assert_eq!(RoomCategory::parse("kitchen"), None);
}
