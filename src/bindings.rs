//! Conversions between core types and plain JS objects at the
//! `wasm-bindgen` boundary. Field names follow JS conventions (camelCase).

use glam::Vec3;
use js_sys::{Array, Object, Reflect};
use showroom_core::catalog::{
    CameraPreset, CameraSettings, CameraShot, EnvironmentPreset, LightConfig, LightingPreset, ShadowConfig,
};
use showroom_core::color::to_hex;
use showroom_core::constants::{DEFAULT_SHADOW_MAP_SIZE, SHADOW_BIAS, SHADOW_NORMAL_BIAS};
use showroom_core::engine::{LightKind, SpotCone};
use showroom_core::{EnvironmentState, LightInfo, LightingState, PerformanceInfo, Product3D, ProductLight};
use std::borrow::Cow;
use wasm_bindgen::JsValue;

pub fn js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn set(obj: &Object, key: &str, value: impl Into<JsValue>) {
    _ = Reflect::set(obj, &JsValue::from_str(key), &value.into());
}

fn get(value: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn get_f32(value: &JsValue, key: &str) -> Option<f32> {
    get(value, key)?.as_f64().map(|v| v as f32)
}

fn get_string(value: &JsValue, key: &str) -> Option<String> {
    get(value, key)?.as_string()
}

fn opt_str(value: Option<&str>) -> JsValue {
    value.map(JsValue::from_str).unwrap_or(JsValue::NULL)
}

pub fn vec3_to_js(v: Vec3) -> JsValue {
    let obj = Object::new();
    set(&obj, "x", v.x);
    set(&obj, "y", v.y);
    set(&obj, "z", v.z);
    obj.into()
}

/// Accepts `[x, y, z]` or `{ x, y, z }`.
pub fn vec3_from_js(value: &JsValue) -> Option<Vec3> {
    if Array::is_array(value) {
        let arr = Array::from(value);
        if arr.length() != 3 {
            return None;
        }
        let c = |i: u32| arr.get(i).as_f64().map(|v| v as f32);
        return Some(Vec3::new(c(0)?, c(1)?, c(2)?));
    }
    Some(Vec3::new(
        get_f32(value, "x")?,
        get_f32(value, "y")?,
        get_f32(value, "z")?,
    ))
}

pub fn camera_settings_to_js(s: &CameraSettings) -> JsValue {
    let obj = Object::new();
    set(&obj, "position", vec3_to_js(s.position));
    set(&obj, "target", vec3_to_js(s.target));
    set(&obj, "fov", s.fov_degrees);
    set(&obj, "minZoom", s.min_zoom);
    set(&obj, "maxZoom", s.max_zoom);
    set(&obj, "currentZoom", s.current_zoom.map(JsValue::from).unwrap_or(JsValue::NULL));
    set(&obj, "autoRotate", s.auto_rotate);
    set(&obj, "autoRotateSpeed", s.auto_rotate_speed);
    obj.into()
}

pub fn light_config_to_js(c: &LightConfig) -> JsValue {
    let obj = Object::new();
    set(&obj, "id", c.id.as_ref());
    set(&obj, "name", c.name.as_ref());
    set(&obj, "type", c.kind.as_str());
    set(&obj, "position", vec3_to_js(c.position));
    set(&obj, "direction", c.direction.map(vec3_to_js).unwrap_or(JsValue::NULL));
    set(&obj, "intensity", c.intensity);
    set(&obj, "range", c.range);
    set(&obj, "color", c.color.as_ref());
    if let Some(cone) = c.spot {
        set(&obj, "angle", cone.angle);
        set(&obj, "exponent", cone.exponent);
        set(&obj, "decay", cone.decay);
    }
    set(&obj, "castShadows", c.shadows.is_some_and(|s| s.enabled));
    obj.into()
}

/// `{ id, name?, type, position, direction?, intensity?, range?, color?,
/// angle?, exponent?, decay?, castShadows?, shadowMapSize? }`
pub fn light_config_from_js(value: &JsValue) -> anyhow::Result<LightConfig> {
    let id = get_string(value, "id").ok_or_else(|| anyhow::anyhow!("light needs an id"))?;
    let kind_name = get_string(value, "type").unwrap_or_else(|| "point".to_string());
    let kind = LightKind::parse(&kind_name).ok_or_else(|| anyhow::anyhow!("unknown light type '{}'", kind_name))?;
    let position = get(value, "position")
        .and_then(|p| vec3_from_js(&p))
        .unwrap_or(Vec3::ZERO);
    let direction = get(value, "direction").and_then(|d| vec3_from_js(&d));
    let spot = get_f32(value, "angle").map(|angle| SpotCone {
        angle,
        exponent: get_f32(value, "exponent").unwrap_or(2.0),
        decay: get_f32(value, "decay").unwrap_or(2.0),
    });
    let cast = get(value, "castShadows").and_then(|v| v.as_bool()).unwrap_or(false);
    let shadows = cast.then(|| {
        let size = get_f32(value, "shadowMapSize").map_or(DEFAULT_SHADOW_MAP_SIZE, |v| v as u32);
        ShadowConfig::new(size, SHADOW_BIAS, SHADOW_NORMAL_BIAS)
    });
    Ok(LightConfig {
        name: Cow::Owned(get_string(value, "name").unwrap_or_else(|| id.clone())),
        id: Cow::Owned(id),
        kind,
        position,
        direction,
        intensity: get_f32(value, "intensity").unwrap_or(1.0),
        range: get_f32(value, "range").unwrap_or(10.0),
        color: Cow::Owned(get_string(value, "color").unwrap_or_else(|| "#FFFFFF".to_string())),
        spot,
        shadows,
    })
}

pub fn lighting_state_to_js(s: &LightingState) -> JsValue {
    let obj = Object::new();
    set(&obj, "presetId", opt_str(s.preset_id.as_deref()));
    set(&obj, "lightCount", s.light_count as u32);
    set(&obj, "isCustomized", s.is_customized);
    let custom: Array = s.custom_lights.iter().map(light_config_to_js).collect();
    set(&obj, "customLights", custom);
    let ambient = Object::new();
    set(&ambient, "intensity", s.ambient.intensity);
    set(&ambient, "color", to_hex(s.ambient.color));
    set(&obj, "ambient", ambient);
    set(&obj, "intensityPercent", s.intensity_percent);
    set(&obj, "lightsEnabled", s.lights_enabled);
    obj.into()
}

pub fn camera_shot_to_js(shot: &CameraShot) -> JsValue {
    let obj = Object::new();
    set(&obj, "name", shot.name);
    set(&obj, "position", vec3_to_js(shot.position));
    set(&obj, "target", vec3_to_js(shot.target));
    obj.into()
}

pub fn environment_state_to_js(s: &EnvironmentState) -> JsValue {
    let obj = Object::new();
    set(&obj, "environmentId", s.environment_id.as_str());
    set(&obj, "name", s.name.as_str());
    set(&obj, "category", s.category.as_str());
    set(
        &obj,
        "suggestedCamera",
        s.suggested_camera.as_ref().map(camera_shot_to_js).unwrap_or(JsValue::NULL),
    );
    set(&obj, "roomMeshCount", s.room_mesh_count as u32);
    set(&obj, "furnitureCount", s.furniture_count as u32);
    obj.into()
}

pub fn light_info_to_js(info: &LightInfo) -> JsValue {
    let obj = Object::new();
    set(&obj, "id", info.id.as_str());
    set(&obj, "name", info.name.as_str());
    set(&obj, "type", info.kind.as_str());
    set(&obj, "position", vec3_to_js(info.position));
    set(&obj, "direction", vec3_to_js(info.direction));
    set(&obj, "intensity", info.intensity);
    set(&obj, "baseIntensity", info.base_intensity);
    set(&obj, "color", info.color.as_str());
    set(&obj, "enabled", info.enabled);
    set(&obj, "castShadows", info.casts_shadows);
    obj.into()
}

pub fn performance_to_js(p: &PerformanceInfo) -> JsValue {
    let obj = Object::new();
    set(&obj, "fps", p.fps);
    set(&obj, "meshes", p.meshes as u32);
    set(&obj, "lights", p.lights as u32);
    set(&obj, "triangles", p.triangles as f64);
    obj.into()
}

fn summary(id: &str, name: &str, description: &str, category: Option<&str>) -> JsValue {
    let obj = Object::new();
    set(&obj, "id", id);
    set(&obj, "name", name);
    set(&obj, "description", description);
    set(&obj, "category", opt_str(category));
    obj.into()
}

pub fn lighting_presets_to_js(presets: &[LightingPreset]) -> Array {
    presets
        .iter()
        .map(|p| summary(p.id, p.name, p.description, Some(p.category.as_str())))
        .collect()
}

pub fn environment_presets_to_js(presets: &[EnvironmentPreset]) -> Array {
    presets
        .iter()
        .map(|p| {
            let obj = summary(p.id, p.name, p.description, Some(p.category.as_str()));
            _ = Reflect::set(
                &obj,
                &JsValue::from_str("recommendedLighting"),
                &JsValue::from_str(p.lighting_recommendation),
            );
            obj
        })
        .collect()
}

pub fn camera_presets_to_js(presets: &[CameraPreset]) -> Array {
    presets
        .iter()
        .map(|p| summary(p.id, p.name, p.description, p.category.map(|c| c.as_str())))
        .collect()
}

/// `{ id, name?, description?, modelPath?, position, scale?, rotation?,
/// material?: { baseColor?, roughness?, metallic? },
/// light?: { color?, intensity?, range?, temperature? } }`
pub fn product_from_js(value: &JsValue) -> anyhow::Result<Product3D> {
    let id = get_string(value, "id").ok_or_else(|| anyhow::anyhow!("product needs an id"))?;
    let position = get(value, "position")
        .and_then(|p| vec3_from_js(&p))
        .unwrap_or(Vec3::ZERO);
    let mut product = Product3D::new(id, position);
    if let Some(name) = get_string(value, "name") {
        product.name = name;
    }
    if let Some(description) = get_string(value, "description") {
        product.description = description;
    }
    product.model_path = get_string(value, "modelPath");
    if let Some(scale) = get_f32(value, "scale") {
        product.scale = scale;
    }
    if let Some(rotation) = get(value, "rotation").and_then(|r| vec3_from_js(&r)) {
        product.rotation = rotation;
    }
    if let Some(m) = get(value, "material") {
        if let Some(color) = get_string(&m, "baseColor") {
            product.material.base_color = color;
        }
        if let Some(r) = get_f32(&m, "roughness") {
            product.material.roughness = r;
        }
        if let Some(metal) = get_f32(&m, "metallic") {
            product.material.metallic = metal;
        }
    }
    product.light = get(value, "light").map(|l| {
        let defaults = ProductLight::default();
        ProductLight {
            color: get_string(&l, "color").unwrap_or(defaults.color),
            intensity: get_f32(&l, "intensity").unwrap_or(defaults.intensity),
            range: get_f32(&l, "range").unwrap_or(defaults.range),
            temperature_k: get_f32(&l, "temperature").unwrap_or(defaults.temperature_k),
        }
    });
    Ok(product)
}
