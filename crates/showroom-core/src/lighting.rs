//! Lighting manager: swaps whole preset rigs (dispose then rebuild) and
//! applies live adjustments to individual tracked lights.

use glam::Vec3;

use crate::catalog::{LightConfig, LightingPreset, PresetCatalog};
use crate::color::{parse_hex, to_hex};
use crate::constants::INTENSITY_PERCENT_MAX;
use crate::engine::{LightKind, PostProcessSettings, RenderEngine};
use crate::error::{PresetKind, Result, SceneError};
use crate::handle::{LightId, ShadowId};
use crate::state::{AmbientState, LightingState, Published, SubscriptionId};

/// A light added at runtime on top of the active preset.
pub type CustomLight = LightConfig;

#[derive(Clone, Debug)]
struct TrackedLight {
    id: String,
    handle: LightId,
    kind: LightKind,
    base_intensity: f32,
    shadow: Option<ShadowId>,
    custom: bool,
}

/// Snapshot of one tracked light for UI panels.
#[derive(Clone, Debug, PartialEq)]
pub struct LightInfo {
    pub id: String,
    pub name: String,
    pub kind: LightKind,
    pub position: Vec3,
    pub direction: Vec3,
    pub intensity: f32,
    pub base_intensity: f32,
    pub color: String,
    pub enabled: bool,
    pub casts_shadows: bool,
}

pub struct LightingManager {
    lights: Vec<TrackedLight>,
    preset: Option<&'static LightingPreset>,
    custom_lights: Vec<CustomLight>,
    customized: bool,
    intensity_percent: f32,
    enabled: bool,
    state: Published<LightingState>,
}

impl Default for LightingManager {
    fn default() -> Self {
        Self {
            lights: Vec::new(),
            preset: None,
            custom_lights: Vec::new(),
            customized: false,
            intensity_percent: 100.0,
            enabled: true,
            state: Published::new(),
        }
    }
}

impl LightingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current rig with preset `id`. Returns the number of lights
    /// built. Unknown ids fail before anything is disposed.
    pub fn apply_preset(&mut self, engine: &mut RenderEngine, catalog: &PresetCatalog, id: &str) -> Result<usize> {
        let Some(preset) = catalog.lighting_preset(id) else {
            log::error!("[lighting] preset not found: {}", id);
            return Err(SceneError::not_found(PresetKind::Lighting, id));
        };
        engine.require_running()?;

        self.dispose_lights(engine);
        self.custom_lights.clear();
        self.customized = false;

        for config in preset.lights {
            match self.build_light(engine, config, false) {
                Ok(()) => {}
                Err(e) => log::warn!("[lighting] skipping light '{}': {}", config.id, e),
            }
        }

        engine.set_ambient_intensity(preset.ambient_intensity);
        let post = preset.bloom.enabled.then(|| {
            PostProcessSettings::bloom(
                preset.bloom.intensity,
                preset.bloom.threshold,
                preset.color_grade_intensity,
            )
        });
        engine.set_post_process(post);

        self.preset = Some(preset);
        log::info!(
            "[lighting] applied '{}' ({}/{} lights, ambient x{})",
            preset.id,
            self.lights.len(),
            preset.lights.len(),
            preset.ambient_intensity
        );
        self.publish(engine);
        Ok(self.lights.len())
    }

    fn build_light(&mut self, engine: &mut RenderEngine, config: &LightConfig, custom: bool) -> Result<()> {
        let color = parse_hex(&config.color)?;
        let intensity = config.intensity.max(0.0);
        let handle = match config.kind {
            LightKind::Directional => engine.create_directional_light(
                &config.name,
                config.direction.unwrap_or(Vec3::NEG_Y),
                config.position,
                intensity,
                color,
            )?,
            LightKind::Point => {
                engine.create_point_light(&config.name, config.position, intensity, config.range, color)?
            }
            LightKind::Spot => {
                let cone = config
                    .spot
                    .ok_or_else(|| SceneError::MissingSpotCone(config.id.to_string()))?;
                engine.create_spot_light(
                    &config.name,
                    config.position,
                    config.direction.unwrap_or(Vec3::NEG_Y),
                    cone,
                    intensity,
                    config.range,
                    color,
                )?
            }
        };

        let mut shadow = None;
        if let Some(sc) = config.shadows.filter(|s| s.enabled) {
            if !config.kind.supports_shadows() {
                log::debug!("[lighting] '{}' is a point light; shadows ignored", config.id);
            } else if engine.shadows_enabled() {
                let sid = engine.create_shadow_map(handle, sc.map_size)?;
                if let Some(g) = engine.shadow_generator_mut(sid) {
                    g.bias = sc.bias;
                    g.normal_bias = sc.normal_bias;
                }
                shadow = Some(sid);
            }
        }

        if let Some(light) = engine.light_mut(handle) {
            light.intensity = self.effective(intensity);
            light.enabled = self.enabled;
        }
        self.lights.push(TrackedLight {
            id: config.id.to_string(),
            handle,
            kind: config.kind,
            base_intensity: intensity,
            shadow,
            custom,
        });
        Ok(())
    }

    fn effective(&self, base: f32) -> f32 {
        base * self.intensity_percent / 100.0
    }

    fn dispose_lights(&mut self, engine: &mut RenderEngine) {
        for tracked in self.lights.drain(..) {
            if let Some(sid) = tracked.shadow {
                engine.dispose_shadow_map(sid);
            }
            engine.dispose_light(tracked.handle);
        }
    }

    fn find(&self, id: &str) -> Option<&TrackedLight> {
        self.lights.iter().find(|l| l.id == id)
    }

    /// Sets a light's base intensity; the global percentage still applies.
    pub fn update_light_intensity(&mut self, engine: &mut RenderEngine, id: &str, value: f32) {
        let pct = self.intensity_percent;
        let Some(tracked) = self.lights.iter_mut().find(|l| l.id == id) else {
            log::debug!("[lighting] update intensity: unknown light '{}'", id);
            return;
        };
        tracked.base_intensity = value.max(0.0);
        if let Some(light) = engine.light_mut(tracked.handle) {
            light.intensity = tracked.base_intensity * pct / 100.0;
        }
        self.customized = true;
        self.publish(engine);
    }

    /// Sets diffuse and specular color. Unparsable colors are ignored.
    pub fn update_light_color(&mut self, engine: &mut RenderEngine, id: &str, hex: &str) {
        let Some(handle) = self.find(id).map(|l| l.handle) else {
            log::debug!("[lighting] update color: unknown light '{}'", id);
            return;
        };
        let color = match parse_hex(hex) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("[lighting] {}", e);
                return;
            }
        };
        if let Some(light) = engine.light_mut(handle) {
            light.diffuse = color;
            light.specular = color;
        }
        self.customized = true;
        self.publish(engine);
    }

    /// Moves a point or spot light. Directional lights keep their position.
    pub fn update_light_position(&mut self, engine: &mut RenderEngine, id: &str, position: Vec3) {
        let Some(tracked) = self.find(id) else {
            log::debug!("[lighting] update position: unknown light '{}'", id);
            return;
        };
        if tracked.kind == LightKind::Directional {
            return;
        }
        if let Some(light) = engine.light_mut(tracked.handle) {
            light.position = position;
        }
        self.customized = true;
        self.publish(engine);
    }

    /// Adds a light on top of the current rig. An existing light with the same
    /// id is replaced.
    pub fn add_custom_light(&mut self, engine: &mut RenderEngine, config: LightConfig) -> Result<()> {
        engine.require_running()?;
        self.remove_tracked(engine, &config.id);
        self.build_light(engine, &config, true)?;
        self.custom_lights.retain(|c| c.id != config.id);
        log::info!("[lighting] added custom light '{}'", config.id);
        self.custom_lights.push(config);
        self.customized = true;
        self.publish(engine);
        Ok(())
    }

    /// Disposes one tracked light. Returns false for unknown ids.
    pub fn remove_light(&mut self, engine: &mut RenderEngine, id: &str) -> bool {
        if !self.remove_tracked(engine, id) {
            return false;
        }
        self.custom_lights.retain(|c| c.id != id);
        self.customized = true;
        self.publish(engine);
        true
    }

    fn remove_tracked(&mut self, engine: &mut RenderEngine, id: &str) -> bool {
        let Some(pos) = self.lights.iter().position(|l| l.id == id) else {
            return false;
        };
        let tracked = self.lights.remove(pos);
        if let Some(sid) = tracked.shadow {
            engine.dispose_shadow_map(sid);
        }
        engine.dispose_light(tracked.handle);
        true
    }

    /// Scales every light to `percent` of its base intensity (0 to 200).
    pub fn set_intensity_percent(&mut self, engine: &mut RenderEngine, percent: f32) {
        let pct = if percent.is_finite() {
            percent.clamp(0.0, INTENSITY_PERCENT_MAX)
        } else {
            100.0
        };
        self.intensity_percent = pct;
        for tracked in &self.lights {
            if let Some(light) = engine.light_mut(tracked.handle) {
                light.intensity = tracked.base_intensity * pct / 100.0;
            }
        }
        self.publish(engine);
    }

    pub fn intensity_percent(&self) -> f32 {
        self.intensity_percent
    }

    pub fn set_lights_enabled(&mut self, engine: &mut RenderEngine, enabled: bool) {
        self.enabled = enabled;
        for tracked in &self.lights {
            if let Some(light) = engine.light_mut(tracked.handle) {
                light.enabled = enabled;
            }
        }
        self.publish(engine);
    }

    /// Flips all lights on or off; returns the new state.
    pub fn toggle_lights(&mut self, engine: &mut RenderEngine) -> bool {
        let next = !self.enabled;
        self.set_lights_enabled(engine, next);
        next
    }

    pub fn lights_enabled(&self) -> bool {
        self.enabled
    }

    pub fn light_info(&self, engine: &RenderEngine, id: &str) -> Option<LightInfo> {
        let tracked = self.find(id)?;
        let light = engine.light(tracked.handle)?;
        Some(LightInfo {
            id: tracked.id.clone(),
            name: light.name.clone(),
            kind: light.kind,
            position: light.position,
            direction: light.direction,
            intensity: light.intensity,
            base_intensity: tracked.base_intensity,
            color: to_hex(light.diffuse),
            enabled: light.enabled,
            casts_shadows: tracked.shadow.is_some(),
        })
    }

    pub fn all_light_info(&self, engine: &RenderEngine) -> Vec<LightInfo> {
        self.lights
            .iter()
            .filter_map(|l| self.light_info(engine, &l.id))
            .collect()
    }

    pub fn light_handle(&self, id: &str) -> Option<LightId> {
        self.find(id).map(|l| l.handle)
    }

    pub fn tracked_light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn custom_light_count(&self) -> usize {
        self.lights.iter().filter(|l| l.custom).count()
    }

    pub fn current_preset(&self) -> Option<&'static LightingPreset> {
        self.preset
    }

    pub fn state(&self) -> Option<&LightingState> {
        self.state.get()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&LightingState) + 'static) -> SubscriptionId {
        self.state.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    fn publish(&mut self, engine: &RenderEngine) {
        let state = LightingState {
            preset_id: self.preset.map(|p| p.id.to_string()),
            light_count: self.lights.len(),
            is_customized: self.customized,
            custom_lights: self.custom_lights.clone(),
            ambient: AmbientState {
                intensity: self.preset.map_or(1.0, |p| p.ambient_intensity),
                color: engine.ambient_color(),
            },
            intensity_percent: self.intensity_percent,
            lights_enabled: self.enabled,
        };
        self.state.publish(state);
    }

    /// Disposes every tracked light and shadow map and drops subscribers.
    pub fn dispose(&mut self, engine: &mut RenderEngine) {
        self.dispose_lights(engine);
        self.custom_lights.clear();
        self.preset = None;
        self.customized = false;
        engine.set_post_process(None);
        self.state.reset();
    }
}
