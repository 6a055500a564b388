//! Read-only preset tables: lighting rigs, rooms and camera viewpoints.

mod camera;
mod environment;
mod lighting;

pub use camera::{CameraPreset, CameraSettings, CAMERA_PRESETS};
pub use environment::{
    CameraShot, EnvironmentGeometry, EnvironmentObject, EnvironmentPreset, PlaneConfig,
    RoomCategory, WallConfig, ENVIRONMENT_PRESETS,
};
pub use lighting::{
    BloomConfig, LightConfig, LightingCategory, LightingPreset, ShadowConfig, LIGHTING_PRESETS,
};

use std::fmt;

use crate::color::parse_hex;
use crate::constants::DEGENERATE_RADIUS;
use crate::engine::LightKind;
use crate::geometry::FurnitureKind;
use crate::materials::{known_material_types, material_params};

/// Lookup interface shared by the three preset tables.
pub trait Preset: 'static {
    type Category: Copy + PartialEq;

    fn id(&self) -> &str;
    fn category(&self) -> Option<Self::Category>;
}

impl Preset for LightingPreset {
    type Category = LightingCategory;

    fn id(&self) -> &str {
        self.id
    }

    fn category(&self) -> Option<LightingCategory> {
        Some(self.category)
    }
}

impl Preset for EnvironmentPreset {
    type Category = RoomCategory;

    fn id(&self) -> &str {
        self.id
    }

    fn category(&self) -> Option<RoomCategory> {
        Some(self.category)
    }
}

impl Preset for CameraPreset {
    type Category = RoomCategory;

    fn id(&self) -> &str {
        self.id
    }

    fn category(&self) -> Option<RoomCategory> {
        self.category
    }
}

pub fn find<P: Preset>(items: &'static [P], id: &str) -> Option<&'static P> {
    items.iter().find(|p| p.id() == id)
}

/// Presets tagged with `category`, in table order.
pub fn by_category<P: Preset>(items: &'static [P], category: P::Category) -> Vec<&'static P> {
    items
        .iter()
        .filter(|p| p.category() == Some(category))
        .collect()
}

/// One problem found in preset data. Reported, never fatal: the managers
/// degrade gracefully on the same data.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogIssue {
    pub preset: String,
    pub message: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.preset, self.message)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PresetCatalog {
    lighting: &'static [LightingPreset],
    environments: &'static [EnvironmentPreset],
    cameras: &'static [CameraPreset],
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetCatalog {
    pub const fn new(
        lighting: &'static [LightingPreset],
        environments: &'static [EnvironmentPreset],
        cameras: &'static [CameraPreset],
    ) -> Self {
        Self {
            lighting,
            environments,
            cameras,
        }
    }

    /// The compiled-in tables.
    pub fn builtin() -> Self {
        Self::new(&LIGHTING_PRESETS, &ENVIRONMENT_PRESETS, &CAMERA_PRESETS)
    }

    pub fn lighting_preset(&self, id: &str) -> Option<&'static LightingPreset> {
        find(self.lighting, id)
    }

    pub fn environment_preset(&self, id: &str) -> Option<&'static EnvironmentPreset> {
        find(self.environments, id)
    }

    pub fn camera_preset(&self, id: &str) -> Option<&'static CameraPreset> {
        find(self.cameras, id)
    }

    pub fn lighting_presets(&self) -> &'static [LightingPreset] {
        self.lighting
    }

    pub fn environment_presets(&self) -> &'static [EnvironmentPreset] {
        self.environments
    }

    pub fn camera_presets(&self) -> &'static [CameraPreset] {
        self.cameras
    }

    pub fn lighting_by_category(&self, category: LightingCategory) -> Vec<&'static LightingPreset> {
        by_category(self.lighting, category)
    }

    pub fn environments_by_category(&self, category: RoomCategory) -> Vec<&'static EnvironmentPreset> {
        by_category(self.environments, category)
    }

    pub fn cameras_by_category(&self, category: RoomCategory) -> Vec<&'static CameraPreset> {
        by_category(self.cameras, category)
    }

    /// Scans every table for data the managers would have to patch over.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut report = |preset: &str, message: String| {
            issues.push(CatalogIssue {
                preset: preset.to_string(),
                message,
            })
        };
        let known_materials = known_material_types().collect::<Vec<_>>().join(", ");

        for p in self.lighting {
            for light in p.lights {
                if light.kind == LightKind::Spot && light.spot.is_none() {
                    report(p.id, format!("spot light '{}' has no cone", light.id));
                }
                if matches!(light.kind, LightKind::Directional | LightKind::Spot) && light.direction.is_none() {
                    report(p.id, format!("light '{}' has no direction", light.id));
                }
                if parse_hex(&light.color).is_err() {
                    report(p.id, format!("light '{}' color {:?} is invalid", light.id, light.color));
                }
                if light.intensity < 0.0 {
                    report(p.id, format!("light '{}' has negative intensity", light.id));
                }
            }
        }

        for p in self.environments {
            let g = &p.geometry;
            let surfaces = [
                ("walls", g.walls.material, g.walls.color),
                ("floor", g.floor.material, g.floor.color),
                ("ceiling", g.ceiling.material, g.ceiling.color),
            ];
            for (what, material, color) in surfaces {
                if material_params(material).is_none() {
                    report(
                        p.id,
                        format!("{} material '{}' is unknown (known: {})", what, material, known_materials),
                    );
                }
                if parse_hex(color).is_err() {
                    report(p.id, format!("{} color {:?} is invalid", what, color));
                }
            }
            for obj in g.objects {
                if FurnitureKind::from_tag(obj.kind).is_none() {
                    report(p.id, format!("object '{}' has unknown type '{}'", obj.id, obj.kind));
                }
                if material_params(obj.material).is_none() {
                    report(
                        p.id,
                        format!(
                            "object '{}' material '{}' is unknown (known: {})",
                            obj.id, obj.material, known_materials
                        ),
                    );
                }
                if parse_hex(obj.color).is_err() {
                    report(p.id, format!("object '{}' color {:?} is invalid", obj.id, obj.color));
                }
            }
            if p.camera_shots.is_empty() {
                report(p.id, "no camera shots".to_string());
            }
        }

        for p in self.cameras {
            let s = &p.settings;
            if s.min_zoom > s.max_zoom {
                report(p.id, format!("min zoom {} exceeds max zoom {}", s.min_zoom, s.max_zoom));
            }
            if s.position.distance(s.target) <= DEGENERATE_RADIUS {
                report(p.id, "position coincides with target".to_string());
            }
            if !(s.fov_degrees > 0.0 && s.fov_degrees < 180.0) {
                report(p.id, format!("field of view {} is out of range", s.fov_degrees));
            }
        }
        issues
    }
}
