//! Material library: type-driven PBR parameters and a cache that hands out
//! one engine material per `(material type, color)` pair.

use fnv::FnvHashMap;

use crate::color::parse_hex_or_default;
use crate::engine::RenderEngine;
use crate::error::Result;
use crate::handle::MaterialId;

/// Shading parameters for a material type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialParams {
    pub roughness: f32,
    pub metallic: f32,
    pub alpha: f32,
    /// Fraction of the base color re-emitted (screens, lamps).
    pub self_illumination: f32,
}

const fn params(roughness: f32, metallic: f32) -> MaterialParams {
    MaterialParams {
        roughness,
        metallic,
        alpha: 1.0,
        self_illumination: 0.0,
    }
}

pub const DEFAULT_PARAMS: MaterialParams = params(0.5, 0.0);

static MATERIAL_TABLE: &[(&str, MaterialParams)] = &[
    ("wall", params(0.3, 0.0)),
    ("wood", params(0.4, 0.0)),
    ("ceramic", params(0.2, 0.0)),
    ("ceramic_tile", params(0.25, 0.0)),
    ("marble", params(0.15, 0.0)),
    (
        "glass",
        MaterialParams {
            roughness: 0.05,
            metallic: 0.0,
            alpha: 0.3,
            self_illumination: 0.0,
        },
    ),
    ("metal", params(0.3, 0.8)),
    ("polished_metal", params(0.2, 0.9)),
    ("chrome", params(0.1, 0.95)),
    ("mirror", params(0.02, 1.0)),
    ("copper", params(0.4, 0.9)),
    ("fabric", params(0.7, 0.0)),
    ("plastic", params(0.5, 0.0)),
    ("stone", params(0.6, 0.0)),
    ("wood_frame", params(0.5, 0.0)),
    ("wood_beam", params(0.5, 0.0)),
    ("stone_wall", params(0.7, 0.0)),
    ("river_stone", params(0.65, 0.0)),
    ("wood_floor", params(0.4, 0.0)),
    ("wooden_floor", params(0.4, 0.0)),
    ("plaster", params(0.4, 0.0)),
    ("false_ceiling", params(0.35, 0.0)),
    ("stone_frame", params(0.65, 0.0)),
    ("terracotta", params(0.8, 0.0)),
    ("foliage", params(0.85, 0.0)),
    (
        "screen",
        MaterialParams {
            roughness: 0.1,
            metallic: 0.3,
            alpha: 1.0,
            self_illumination: 0.15,
        },
    ),
];

/// Looks up the parameters for a known material type.
pub fn material_params(material_type: &str) -> Option<MaterialParams> {
    MATERIAL_TABLE
        .iter()
        .find(|(name, _)| *name == material_type)
        .map(|(_, p)| *p)
}

pub fn known_material_types() -> impl Iterator<Item = &'static str> {
    MATERIAL_TABLE.iter().map(|(name, _)| *name)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    material_type: String,
    color: String,
}

impl CacheKey {
    fn new(material_type: &str, color: &str) -> Self {
        Self {
            material_type: material_type.to_string(),
            color: color.trim().to_ascii_uppercase(),
        }
    }
}

#[derive(Default)]
pub struct MaterialLibrary {
    cache: FnvHashMap<CacheKey, MaterialId>,
    /// Uncached materials created for products and one-off meshes.
    custom: Vec<MaterialId>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached material for `(material_type, color)`. Unknown types log a
    /// warning and use mid-roughness, non-metallic defaults.
    pub fn get(&mut self, engine: &mut RenderEngine, material_type: &str, color: &str) -> Result<MaterialId> {
        let key = CacheKey::new(material_type, color);
        if let Some(id) = self.cache.get(&key) {
            if engine.material(*id).is_some() {
                return Ok(*id);
            }
        }
        let params = material_params(material_type).unwrap_or_else(|| {
            log::warn!(
                "[materials] unknown material type '{}', using defaults",
                material_type
            );
            DEFAULT_PARAMS
        });
        let base = parse_hex_or_default(color);
        let emissive = (params.self_illumination > 0.0).then(|| base * params.self_illumination);
        let name = format!("{}_{}", key.material_type, key.color);
        let id = engine.create_pbr_material(&name, base, params.roughness, params.metallic, emissive)?;
        if let Some(m) = engine.material_mut(id) {
            m.alpha = params.alpha;
        }
        self.cache.insert(key, id);
        Ok(id)
    }

    /// Transparent low-roughness glass.
    pub fn glass(&mut self, engine: &mut RenderEngine, color: &str) -> Result<MaterialId> {
        self.get(engine, "glass", color)
    }

    pub fn polished_metal(&mut self, engine: &mut RenderEngine, color: &str) -> Result<MaterialId> {
        self.get(engine, "polished_metal", color)
    }

    /// Self-lit material: emissive = color x intensity.
    pub fn emissive(&mut self, engine: &mut RenderEngine, color: &str, intensity: f32) -> Result<MaterialId> {
        let key = CacheKey::new(&format!("emissive@{:.3}", intensity), color);
        if let Some(id) = self.cache.get(&key) {
            if engine.material(*id).is_some() {
                return Ok(*id);
            }
        }
        let base = parse_hex_or_default(color);
        let name = format!("{}_{}", key.material_type, key.color);
        let id = engine.create_pbr_material(&name, base, 0.5, 0.0, Some(base * intensity.max(0.0)))?;
        self.cache.insert(key, id);
        Ok(id)
    }

    /// Uncached material with explicit parameters.
    pub fn custom_pbr(
        &mut self,
        engine: &mut RenderEngine,
        name: &str,
        color: &str,
        roughness: f32,
        metallic: f32,
    ) -> Result<MaterialId> {
        let id = engine.create_pbr_material(name, parse_hex_or_default(color), roughness, metallic, None)?;
        self.custom.push(id);
        Ok(id)
    }

    /// Releases one uncached material.
    pub fn release_custom(&mut self, engine: &mut RenderEngine, id: MaterialId) {
        self.custom.retain(|m| *m != id);
        engine.dispose_material(id);
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    pub fn len(&self) -> usize {
        self.cache.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Disposes every material this library created.
    pub fn clear(&mut self, engine: &mut RenderEngine) {
        let count = self.len();
        for (_, id) in self.cache.drain() {
            engine.dispose_material(id);
        }
        for id in self.custom.drain(..) {
            engine.dispose_material(id);
        }
        log::debug!("[materials] cleared {} materials", count);
    }
}
