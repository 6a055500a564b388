//! Facade wiring the engine, catalog, material library and managers together
//! the way the host UI drives them.

use glam::Vec3;

use crate::camera::CameraController;
use crate::catalog::{LightConfig, PresetCatalog};
use crate::diagnostics::PerformanceInfo;
use crate::engine::{EngineConfig, RenderEngine};
use crate::environment::EnvironmentManager;
use crate::error::Result;
use crate::handle::NodeId;
use crate::lighting::{LightInfo, LightingManager};
use crate::materials::MaterialLibrary;
use crate::product::{Product3D, ProductManager};
use crate::state::EnvironmentState;

pub struct Viewer {
    catalog: PresetCatalog,
    engine: RenderEngine,
    materials: MaterialLibrary,
    lighting: LightingManager,
    environment: EnvironmentManager,
    camera: CameraController,
    products: ProductManager,
}

impl Viewer {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_catalog(config, PresetCatalog::builtin())
    }

    pub fn with_catalog(config: EngineConfig, catalog: PresetCatalog) -> Self {
        Self {
            catalog,
            engine: RenderEngine::new(config),
            materials: MaterialLibrary::new(),
            lighting: LightingManager::new(),
            environment: EnvironmentManager::new(),
            camera: CameraController::new(),
            products: ProductManager::new(),
        }
    }

    /// Starts the engine, reports catalog problems and places the default
    /// camera.
    pub fn initialize(&mut self, width: u32, height: u32) -> Result<()> {
        self.engine.initialize(width, height)?;
        let issues = self.catalog.validate();
        for issue in &issues {
            log::warn!("[catalog] {}", issue);
        }
        if !issues.is_empty() {
            log::warn!("[catalog] {} preset issue(s); affected items fall back to defaults", issues.len());
        }
        self.camera.initialize_camera(&mut self.engine, &self.catalog)
    }

    /// Loads a room and moves the camera to its first bundled shot.
    pub fn load_environment(&mut self, id: &str) -> Result<EnvironmentState> {
        let state = self
            .environment
            .load_environment(&mut self.engine, &mut self.materials, &self.catalog, id)?;
        if let Some(shot) = state.suggested_camera {
            if let Err(e) = self.camera.look_at(&mut self.engine, shot.position, shot.target) {
                log::warn!("[camera] suggested shot '{}' unusable: {}", shot.name, e);
            }
        }
        Ok(state)
    }

    pub fn apply_lighting(&mut self, id: &str) -> Result<usize> {
        self.lighting.apply_preset(&mut self.engine, &self.catalog, id)
    }

    pub fn apply_camera(&mut self, id: &str) -> Result<()> {
        self.camera.apply_preset(&mut self.engine, &self.catalog, id)
    }

    pub fn zoom_in(&mut self, amount: f32) {
        self.camera.zoom_in(&mut self.engine, amount);
    }

    pub fn zoom_out(&mut self, amount: f32) {
        self.camera.zoom_out(&mut self.engine, amount);
    }

    pub fn set_zoom(&mut self, value: f32) {
        self.camera.set_zoom(&mut self.engine, value);
    }

    pub fn zoom(&self) -> Option<f32> {
        self.camera.zoom(&self.engine)
    }

    pub fn look_at(&mut self, position: Vec3, target: Vec3) -> Result<()> {
        self.camera.look_at(&mut self.engine, position, target)
    }

    pub fn set_camera_target(&mut self, target: Vec3) {
        self.camera.set_target(&mut self.engine, target);
    }

    pub fn all_light_info(&self) -> Vec<LightInfo> {
        self.lighting.all_light_info(&self.engine)
    }

    pub fn update_light_intensity(&mut self, id: &str, value: f32) {
        self.lighting.update_light_intensity(&mut self.engine, id, value);
    }

    pub fn update_light_color(&mut self, id: &str, hex: &str) {
        self.lighting.update_light_color(&mut self.engine, id, hex);
    }

    pub fn update_light_position(&mut self, id: &str, position: Vec3) {
        self.lighting.update_light_position(&mut self.engine, id, position);
    }

    pub fn add_custom_light(&mut self, config: LightConfig) -> Result<()> {
        self.lighting.add_custom_light(&mut self.engine, config)
    }

    pub fn remove_light(&mut self, id: &str) -> bool {
        self.lighting.remove_light(&mut self.engine, id)
    }

    pub fn set_intensity_percent(&mut self, percent: f32) {
        self.lighting.set_intensity_percent(&mut self.engine, percent);
    }

    pub fn toggle_lights(&mut self) -> bool {
        self.lighting.toggle_lights(&mut self.engine)
    }

    pub fn light_info(&self, id: &str) -> Option<LightInfo> {
        self.lighting.light_info(&self.engine, id)
    }

    pub fn place_product(&mut self, product: &Product3D) -> Result<NodeId> {
        self.products.place(&mut self.engine, &mut self.materials, product)
    }

    pub fn remove_product(&mut self, id: &str) -> bool {
        self.products.remove(&mut self.engine, &mut self.materials, id)
    }

    pub fn clear_products(&mut self) {
        self.products.clear(&mut self.engine, &mut self.materials);
    }

    pub fn update_product_light_intensity(&mut self, id: &str, intensity: f32) -> bool {
        self.products.update_light_intensity(&mut self.engine, id, intensity)
    }

    pub fn update_product_light_color(&mut self, id: &str, hex: &str) -> Result<bool> {
        self.products.update_light_color(&mut self.engine, id, hex)
    }

    /// One host frame: engine bookkeeping, then camera animation. Returns
    /// false when nothing should be drawn.
    pub fn frame(&mut self, dt_sec: f32) -> bool {
        if !self.engine.frame(dt_sec) {
            return false;
        }
        self.camera.tick(&mut self.engine, dt_sec);
        true
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
    }

    pub fn performance_info(&self) -> PerformanceInfo {
        self.engine.performance_info()
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RenderEngine {
        &mut self.engine
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn lighting(&self) -> &LightingManager {
        &self.lighting
    }

    pub fn lighting_mut(&mut self) -> &mut LightingManager {
        &mut self.lighting
    }

    pub fn environment(&self) -> &EnvironmentManager {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut EnvironmentManager {
        &mut self.environment
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    pub fn products(&self) -> &ProductManager {
        &self.products
    }

    pub fn is_disposed(&self) -> bool {
        self.engine.state() == crate::engine::EngineState::Disposed
    }

    /// Tears everything down in reverse construction order.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.products.clear(&mut self.engine, &mut self.materials);
        self.lighting.dispose(&mut self.engine);
        self.environment.dispose(&mut self.engine);
        self.camera.dispose(&mut self.engine);
        self.materials.clear(&mut self.engine);
        self.engine.dispose();
    }
}
