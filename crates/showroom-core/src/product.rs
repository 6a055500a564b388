//! Product placement: catalog items dropped into the room as placeholder
//! geometry with their own material and, for luminaires, a point light that
//! follows the product.

use glam::{EulerRot, Quat, Vec3};
use std::collections::BTreeMap;

use crate::color::{from_temperature, parse_hex};
use crate::constants::{PRODUCT_LIGHT_TEMPERATURE_K, PRODUCT_PLACEHOLDER_DIAMETER, PRODUCT_PLACEHOLDER_HEIGHT};
use crate::engine::{MeshDesc, RenderEngine, Transform};
use crate::error::Result;
use crate::geometry::Shape;
use crate::handle::{LightId, MaterialId, NodeId};
use crate::materials::MaterialLibrary;

#[derive(Clone, Debug, PartialEq)]
pub struct ProductMaterial {
    pub base_color: String,
    pub roughness: f32,
    pub metallic: f32,
}

impl Default for ProductMaterial {
    fn default() -> Self {
        Self {
            base_color: "#CCCCCC".to_string(),
            roughness: 0.5,
            metallic: 0.0,
        }
    }
}

/// Light emitted by a luminaire. An empty `color` derives the tint from
/// `temperature_k`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductLight {
    pub color: String,
    pub intensity: f32,
    pub range: f32,
    pub temperature_k: f32,
}

impl Default for ProductLight {
    fn default() -> Self {
        Self {
            color: String::new(),
            intensity: 1.0,
            range: 5.0,
            temperature_k: PRODUCT_LIGHT_TEMPERATURE_K,
        }
    }
}

impl ProductLight {
    fn resolved_color(&self) -> Vec3 {
        if self.color.trim().is_empty() {
            return from_temperature(self.temperature_k);
        }
        parse_hex(&self.color).unwrap_or_else(|e| {
            log::warn!("[products] {}; using {} K", e, self.temperature_k);
            from_temperature(self.temperature_k)
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Product3D {
    pub id: String,
    pub name: String,
    pub description: String,
    /// GLB/GLTF asset. Streaming it is left to the host; a placeholder
    /// cylinder stands in here.
    pub model_path: Option<String>,
    pub position: Vec3,
    pub scale: f32,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub material: ProductMaterial,
    pub light: Option<ProductLight>,
}

impl Product3D {
    pub fn new(id: impl Into<String>, position: Vec3) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            model_path: None,
            position,
            scale: 1.0,
            rotation: Vec3::ZERO,
            material: ProductMaterial::default(),
            light: None,
        }
    }

    pub fn emits_light(&self) -> bool {
        self.light.is_some()
    }

    fn transform(&self) -> Transform {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z);
        let scale = if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        };
        Transform::from_translation(self.position)
            .with_rotation(rotation)
            .with_scale(Vec3::splat(scale))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedProduct {
    pub node: NodeId,
    pub material: MaterialId,
    pub light: Option<LightId>,
}

#[derive(Default)]
pub struct ProductManager {
    placed: BTreeMap<String, PlacedProduct>,
}

impl ProductManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a product, replacing any product already placed under its id.
    pub fn place(
        &mut self,
        engine: &mut RenderEngine,
        materials: &mut MaterialLibrary,
        product: &Product3D,
    ) -> Result<NodeId> {
        engine.require_running()?;
        self.remove(engine, materials, &product.id);
        if let Some(path) = product.model_path.as_deref() {
            log::debug!("[products] '{}' model {} is host-loaded; using placeholder", product.id, path);
        }

        let name = format!("product-{}", product.id);
        let m = &product.material;
        let material = materials.custom_pbr(engine, &name, &m.base_color, m.roughness, m.metallic)?;
        let mut desc = MeshDesc::new(
            name.as_str(),
            Shape::cylinder(PRODUCT_PLACEHOLDER_DIAMETER, PRODUCT_PLACEHOLDER_HEIGHT),
        )
        .material(material);
        desc.transform = product.transform();
        let node = match engine.create_mesh(desc) {
            Ok(node) => node,
            Err(e) => {
                materials.release_custom(engine, material);
                return Err(e);
            }
        };
        engine.set_receive_shadows(node, true)?;

        let light = match product.light.as_ref() {
            Some(pl) => {
                let lid = engine.create_point_light(
                    &format!("light-{}", product.id),
                    Vec3::ZERO,
                    pl.intensity,
                    pl.range,
                    pl.resolved_color(),
                )?;
                engine.parent_light(lid, node)?;
                Some(lid)
            }
            None => None,
        };

        log::info!(
            "[products] placed '{}' at ({:.2}, {:.2}, {:.2}){}",
            product.id,
            product.position.x,
            product.position.y,
            product.position.z,
            if light.is_some() { " with light" } else { "" }
        );
        self.placed.insert(product.id.clone(), PlacedProduct { node, material, light });
        Ok(node)
    }

    /// Disposes a product, its light and its material. Returns false for
    /// unknown ids.
    pub fn remove(&mut self, engine: &mut RenderEngine, materials: &mut MaterialLibrary, id: &str) -> bool {
        let Some(placed) = self.placed.remove(id) else {
            return false;
        };
        if let Some(lid) = placed.light {
            engine.dispose_light(lid);
        }
        engine.dispose_node(placed.node);
        materials.release_custom(engine, placed.material);
        true
    }

    pub fn clear(&mut self, engine: &mut RenderEngine, materials: &mut MaterialLibrary) {
        let ids: Vec<String> = self.placed.keys().cloned().collect();
        for id in ids {
            self.remove(engine, materials, &id);
        }
    }

    pub fn update_light_intensity(&mut self, engine: &mut RenderEngine, id: &str, intensity: f32) -> bool {
        let Some(light) = self.placed.get(id).and_then(|p| p.light).and_then(|l| engine.light_mut(l)) else {
            return false;
        };
        light.intensity = intensity.max(0.0);
        true
    }

    pub fn update_light_color(&mut self, engine: &mut RenderEngine, id: &str, hex: &str) -> Result<bool> {
        let color = parse_hex(hex)?;
        let Some(light) = self.placed.get(id).and_then(|p| p.light).and_then(|l| engine.light_mut(l)) else {
            return Ok(false);
        };
        light.diffuse = color;
        light.specular = color;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<&PlacedProduct> {
        self.placed.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.placed.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}
