//! Render engine adapter.
//!
//! Owns the retained scene graph (nodes, meshes, lights, shadow generators,
//! materials, the single camera) and the engine lifecycle. Managers only hold
//! typed ids into it and mutate through the methods here. The GPU front-end
//! reads the same graph every frame to draw it.

mod camera;
mod light;
mod material;
mod post;
mod scene;

pub use camera::{CameraMode, OrbitCamera, OrbitPose};
pub use light::{Light, LightKind, ShadowFilter, ShadowGenerator, SpotCone};
pub use material::PbrMaterial;
pub use post::{PostProcessSettings, ToneMapping};
pub use scene::{MeshDesc, MeshPart, SceneNode, Transform};

use glam::{Mat4, Vec3, Vec4};
use std::collections::BTreeMap;

use crate::constants::{
    BASE_AMBIENT_COLOR, BETA_EPSILON, CLEAR_COLOR, DEFAULT_SHADOW_MAP_SIZE, DEGENERATE_RADIUS,
    MAX_LIGHTS, MAX_SHADOW_MAP_SIZE, MIN_SHADOW_MAP_SIZE, STATIC_CAMERA_FOV,
};
use crate::diagnostics::{FpsCounter, PerformanceInfo};
use crate::error::{Result, SceneError};
use crate::handle::{LightId, MaterialId, NodeId, ShadowId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Running,
    Disposed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub clear_color: Vec4,
    /// Scene ambient before any preset multiplier.
    pub ambient_color: Vec3,
    pub shadows_enabled: bool,
    pub shadow_map_size: u32,
    pub max_lights: usize,
    pub show_fps: bool,
    pub log_level: log::Level,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clear_color: Vec4::from_array(CLEAR_COLOR),
            ambient_color: Vec3::from_array(BASE_AMBIENT_COLOR),
            shadows_enabled: true,
            shadow_map_size: DEFAULT_SHADOW_MAP_SIZE,
            max_lights: MAX_LIGHTS,
            show_fps: false,
            log_level: log::Level::Info,
        }
    }
}

pub struct RenderEngine {
    config: EngineConfig,
    state: EngineState,
    width: u32,
    height: u32,
    loop_running: bool,
    next_id: u32,
    nodes: BTreeMap<NodeId, SceneNode>,
    lights: BTreeMap<LightId, Light>,
    shadows: BTreeMap<ShadowId, ShadowGenerator>,
    materials: BTreeMap<MaterialId, PbrMaterial>,
    camera: Option<OrbitCamera>,
    ambient_color: Vec3,
    post: Option<PostProcessSettings>,
    fps: FpsCounter,
    frame_index: u64,
    elapsed: f32,
}

impl RenderEngine {
    pub fn new(config: EngineConfig) -> Self {
        let ambient_color = config.ambient_color;
        Self {
            config,
            state: EngineState::Uninitialized,
            width: 0,
            height: 0,
            loop_running: false,
            next_id: 1,
            nodes: BTreeMap::new(),
            lights: BTreeMap::new(),
            shadows: BTreeMap::new(),
            materials: BTreeMap::new(),
            camera: None,
            ambient_color,
            post: None,
            fps: FpsCounter::new(),
            frame_index: 0,
            elapsed: 0.0,
        }
    }

    // ---- lifecycle ----

    /// Sizes the surface, applies the base ambient and starts the frame loop.
    pub fn initialize(&mut self, width: u32, height: u32) -> Result<()> {
        match self.state {
            EngineState::Disposed => return Err(SceneError::Disposed),
            EngineState::Running => {
                log::warn!("[engine] initialize called twice; resizing only");
                self.resize(width, height);
                return Ok(());
            }
            EngineState::Uninitialized => {}
        }
        self.width = width.max(1);
        self.height = height.max(1);
        self.ambient_color = self.config.ambient_color;
        self.state = EngineState::Running;
        self.loop_running = true;
        log::info!(
            "[engine] initialized {}x{} shadows={}",
            self.width,
            self.height,
            self.config.shadows_enabled
        );
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `Ok` while running; otherwise the error a factory call would return.
    pub fn require_running(&self) -> Result<()> {
        match self.state {
            EngineState::Running => Ok(()),
            EngineState::Uninitialized => Err(SceneError::NotInitialized),
            EngineState::Disposed => Err(SceneError::Disposed),
        }
    }

    /// Window resize hook. Silently ignored once torn down.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.state != EngineState::Running || width == 0 || height == 0 {
            return;
        }
        if (width, height) != (self.width, self.height) {
            log::debug!("[engine] resize {}x{}", width, height);
            self.width = width;
            self.height = height;
        }
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Per-frame bookkeeping. Returns `false` (and does nothing) when the loop
    /// is stopped or the engine is not running.
    pub fn frame(&mut self, dt_sec: f32) -> bool {
        if self.state != EngineState::Running || !self.loop_running {
            return false;
        }
        if let Some(fps) = self.fps.record(dt_sec) {
            if self.config.show_fps {
                log::debug!("[engine] fps={:.1}", fps);
            }
        }
        self.frame_index += 1;
        self.elapsed += dt_sec.max(0.0);
        true
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn stop_render_loop(&mut self) {
        self.loop_running = false;
    }

    pub fn resume_render_loop(&mut self) {
        if self.state == EngineState::Running {
            self.loop_running = true;
        }
    }

    pub fn is_render_loop_running(&self) -> bool {
        self.loop_running && self.state == EngineState::Running
    }

    /// Releases every scene entity. All later factory calls fail with
    /// [`SceneError::Disposed`].
    pub fn dispose(&mut self) {
        if self.state == EngineState::Disposed {
            return;
        }
        self.loop_running = false;
        self.nodes.clear();
        self.lights.clear();
        self.shadows.clear();
        self.materials.clear();
        self.camera = None;
        self.post = None;
        self.fps.reset();
        self.state = EngineState::Disposed;
        log::info!("[engine] disposed");
    }

    fn next_raw(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ---- scene graph ----

    /// Empty transform node, used as a composite root.
    pub fn create_node(
        &mut self,
        name: &str,
        transform: Transform,
        parent: Option<NodeId>,
    ) -> Result<NodeId> {
        self.require_running()?;
        self.check_parent(parent)?;
        let id = NodeId::new(self.next_raw());
        self.nodes.insert(
            id,
            SceneNode {
                name: name.to_string(),
                transform,
                parent,
                mesh: None,
                visible: true,
            },
        );
        Ok(id)
    }

    /// Adds a mesh node. It is registered as a caster with every existing
    /// shadow generator.
    pub fn create_mesh(&mut self, desc: MeshDesc) -> Result<NodeId> {
        self.require_running()?;
        self.check_parent(desc.parent)?;
        if let Some(m) = desc.material {
            if !self.materials.contains_key(&m) {
                return Err(SceneError::UnknownHandle(m.to_string()));
            }
        }
        let id = NodeId::new(self.next_raw());
        self.nodes.insert(
            id,
            SceneNode {
                name: desc.name,
                transform: desc.transform,
                parent: desc.parent,
                mesh: Some(MeshPart {
                    shape: desc.shape,
                    material: desc.material,
                    receive_shadows: false,
                }),
                visible: true,
            },
        );
        for generator in self.shadows.values_mut() {
            generator.casters.insert(id);
        }
        Ok(id)
    }

    fn check_parent(&self, parent: Option<NodeId>) -> Result<()> {
        match parent {
            Some(p) if !self.nodes.contains_key(&p) => Err(SceneError::UnknownHandle(p.to_string())),
            _ => Ok(()),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().map(|(id, n)| (*id, n))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_mesh()).count()
    }

    /// Direct children of `id`.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(id))
            .map(|(cid, _)| *cid)
            .collect()
    }

    /// `id` followed by all of its descendants, parents before children.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        if !self.nodes.contains_key(&id) {
            return Vec::new();
        }
        let mut out = vec![id];
        let mut i = 0;
        while i < out.len() {
            let current = out[i];
            out.extend(self.children(current));
            i += 1;
        }
        out
    }

    /// Local-to-world matrix including every ancestor transform.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.nodes.get(&id)?;
        let mut m = node.transform.matrix();
        let mut guard = 0;
        while let Some(p) = node.parent {
            node = self.nodes.get(&p)?;
            m = node.transform.matrix() * m;
            guard += 1;
            if guard > 64 {
                break;
            }
        }
        Some(m)
    }

    /// Visible only if the node and all of its ancestors are.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = self.nodes.get(&id);
        while let Some(n) = current {
            if !n.visible {
                return false;
            }
            current = n.parent.and_then(|p| self.nodes.get(&p));
        }
        true
    }

    pub fn set_receive_shadows(&mut self, id: NodeId, receive: bool) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| SceneError::UnknownHandle(id.to_string()))?;
        if let Some(mesh) = node.mesh.as_mut() {
            mesh.receive_shadows = receive;
        }
        Ok(())
    }

    /// Disposes the node and its subtree, removing them from every shadow
    /// generator. Lights parented into the subtree go with it. Returns the
    /// number of nodes removed.
    pub fn dispose_node(&mut self, id: NodeId) -> usize {
        let doomed = self.subtree(id);
        for n in &doomed {
            self.nodes.remove(n);
            for generator in self.shadows.values_mut() {
                generator.casters.remove(n);
            }
        }
        let orphaned: Vec<LightId> = self
            .lights
            .iter()
            .filter(|(_, l)| l.parent.map_or(false, |p| doomed.contains(&p)))
            .map(|(lid, _)| *lid)
            .collect();
        for lid in orphaned {
            self.dispose_light(lid);
        }
        doomed.len()
    }

    // ---- lights ----

    fn insert_light(&mut self, light: Light) -> Result<LightId> {
        self.require_running()?;
        if self.lights.len() >= self.config.max_lights {
            log::warn!(
                "[engine] {} lights exceed max_lights={}; extra lights are not rendered",
                self.lights.len() + 1,
                self.config.max_lights
            );
        }
        let id = LightId::new(self.next_raw());
        log::debug!("[engine] {} {} ({})", id, light.name, light.kind.as_str());
        self.lights.insert(id, light);
        Ok(id)
    }

    fn base_light(name: &str, kind: LightKind, position: Vec3, intensity: f32, color: Vec3) -> Light {
        Light {
            name: name.to_string(),
            kind,
            position,
            direction: Vec3::NEG_Y,
            intensity: intensity.max(0.0),
            range: f32::MAX,
            diffuse: color,
            specular: color,
            cone: None,
            enabled: true,
            parent: None,
        }
    }

    pub fn create_directional_light(
        &mut self,
        name: &str,
        direction: Vec3,
        position: Vec3,
        intensity: f32,
        color: Vec3,
    ) -> Result<LightId> {
        let mut light = Self::base_light(name, LightKind::Directional, position, intensity, color);
        light.direction = direction.try_normalize().unwrap_or(Vec3::NEG_Y);
        self.insert_light(light)
    }

    pub fn create_point_light(
        &mut self,
        name: &str,
        position: Vec3,
        intensity: f32,
        range: f32,
        color: Vec3,
    ) -> Result<LightId> {
        let mut light = Self::base_light(name, LightKind::Point, position, intensity, color);
        light.range = range.max(0.0);
        self.insert_light(light)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_spot_light(
        &mut self,
        name: &str,
        position: Vec3,
        direction: Vec3,
        cone: SpotCone,
        intensity: f32,
        range: f32,
        color: Vec3,
    ) -> Result<LightId> {
        let mut light = Self::base_light(name, LightKind::Spot, position, intensity, color);
        light.direction = direction.try_normalize().unwrap_or(Vec3::NEG_Y);
        light.range = range.max(0.0);
        light.cone = Some(cone);
        self.insert_light(light)
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(&id)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(&id)
    }

    pub fn lights(&self) -> impl Iterator<Item = (LightId, &Light)> {
        self.lights.iter().map(|(id, l)| (*id, l))
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Attaches a light to a node so it follows the node's transform.
    pub fn parent_light(&mut self, light: LightId, node: NodeId) -> Result<()> {
        self.check_parent(Some(node))?;
        let l = self
            .lights
            .get_mut(&light)
            .ok_or_else(|| SceneError::UnknownHandle(light.to_string()))?;
        l.parent = Some(node);
        Ok(())
    }

    /// World-space position and direction of a light.
    pub fn light_world_frame(&self, id: LightId) -> Option<(Vec3, Vec3)> {
        let light = self.lights.get(&id)?;
        match light.parent.and_then(|p| self.world_matrix(p)) {
            Some(m) => Some((
                m.transform_point3(light.position),
                m.transform_vector3(light.direction).try_normalize().unwrap_or(light.direction),
            )),
            None => Some((light.position, light.direction)),
        }
    }

    /// Disposes a light together with any shadow generator bound to it.
    pub fn dispose_light(&mut self, id: LightId) -> bool {
        let removed = self.lights.remove(&id).is_some();
        self.shadows.retain(|_, g| g.light != id);
        removed
    }

    // ---- shadows ----

    /// Shadow generator for a directional or spot light. Every existing mesh
    /// becomes a caster and PCF soft filtering is enabled.
    pub fn create_shadow_map(&mut self, light: LightId, resolution: u32) -> Result<ShadowId> {
        self.require_running()?;
        let kind = self
            .lights
            .get(&light)
            .map(|l| l.kind)
            .ok_or_else(|| SceneError::UnknownHandle(light.to_string()))?;
        if !kind.supports_shadows() {
            return Err(SceneError::ShadowUnsupported);
        }
        let map_size = sanitize_shadow_map_size(resolution);
        if map_size != resolution {
            log::warn!(
                "[engine] shadow map size {} unsupported, using {}",
                resolution,
                map_size
            );
        }
        let mut generator = ShadowGenerator::new(light, map_size);
        generator.casters = self
            .nodes
            .iter()
            .filter(|(_, n)| n.is_mesh())
            .map(|(id, _)| *id)
            .collect();
        let id = ShadowId::new(self.next_raw());
        log::debug!(
            "[engine] {} for {} size={} casters={}",
            id,
            light,
            map_size,
            generator.casters.len()
        );
        self.shadows.insert(id, generator);
        Ok(id)
    }

    pub fn shadow_generator(&self, id: ShadowId) -> Option<&ShadowGenerator> {
        self.shadows.get(&id)
    }

    pub fn shadow_generator_mut(&mut self, id: ShadowId) -> Option<&mut ShadowGenerator> {
        self.shadows.get_mut(&id)
    }

    pub fn shadow_generators(&self) -> impl Iterator<Item = (ShadowId, &ShadowGenerator)> {
        self.shadows.iter().map(|(id, g)| (*id, g))
    }

    pub fn dispose_shadow_map(&mut self, id: ShadowId) -> bool {
        self.shadows.remove(&id).is_some()
    }

    pub fn shadows_enabled(&self) -> bool {
        self.config.shadows_enabled
    }

    // ---- materials ----

    pub fn create_pbr_material(
        &mut self,
        name: &str,
        color: Vec3,
        roughness: f32,
        metallic: f32,
        emissive: Option<Vec3>,
    ) -> Result<MaterialId> {
        self.require_running()?;
        let id = MaterialId::new(self.next_raw());
        self.materials.insert(
            id,
            PbrMaterial {
                name: name.to_string(),
                base_color: color,
                roughness: roughness.clamp(0.0, 1.0),
                metallic: metallic.clamp(0.0, 1.0),
                emissive: emissive.unwrap_or(Vec3::ZERO),
                alpha: 1.0,
            },
        );
        Ok(id)
    }

    pub fn material(&self, id: MaterialId) -> Option<&PbrMaterial> {
        self.materials.get(&id)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut PbrMaterial> {
        self.materials.get_mut(&id)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Releases a material; meshes still using it fall back to the default look.
    pub fn dispose_material(&mut self, id: MaterialId) -> bool {
        if self.materials.remove(&id).is_none() {
            return false;
        }
        for node in self.nodes.values_mut() {
            if let Some(mesh) = node.mesh.as_mut() {
                if mesh.material == Some(id) {
                    mesh.material = None;
                }
            }
        }
        true
    }

    // ---- camera ----

    /// Orbit camera with user input attached.
    pub fn create_orbit_camera(&mut self, alpha: f32, beta: f32, radius: f32, target: Vec3) -> Result<()> {
        self.require_running()?;
        let pose = checked_pose(alpha, beta, radius, target)?;
        self.camera = Some(OrbitCamera::new(pose, CameraMode::Orbit, STATIC_CAMERA_FOV));
        Ok(())
    }

    /// Camera with input bindings cleared and radius/beta limits locked to the
    /// given orbit.
    pub fn create_static_camera(&mut self, alpha: f32, beta: f32, radius: f32, target: Vec3) -> Result<()> {
        self.require_running()?;
        let pose = checked_pose(alpha, beta, radius, target)?;
        let mut camera = OrbitCamera::new(pose, CameraMode::Static, STATIC_CAMERA_FOV);
        camera.lower_radius_limit = pose.radius;
        camera.upper_radius_limit = pose.radius;
        camera.lower_beta_limit = pose.beta;
        camera.upper_beta_limit = pose.beta;
        self.camera = Some(camera);
        Ok(())
    }

    pub fn camera(&self) -> Option<&OrbitCamera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut OrbitCamera> {
        self.camera.as_mut()
    }

    pub fn dispose_camera(&mut self) {
        self.camera = None;
    }

    // ---- ambient and post ----

    /// Scene ambient = base ambient color x multiplier (never compounded).
    pub fn set_ambient_intensity(&mut self, multiplier: f32) {
        self.ambient_color = self.config.ambient_color * multiplier.max(0.0);
    }

    pub fn ambient_color(&self) -> Vec3 {
        self.ambient_color
    }

    pub fn base_ambient_color(&self) -> Vec3 {
        self.config.ambient_color
    }

    pub fn clear_color(&self) -> Vec4 {
        self.config.clear_color
    }

    pub fn set_post_process(&mut self, settings: Option<PostProcessSettings>) {
        self.post = settings;
    }

    pub fn post_process(&self) -> Option<&PostProcessSettings> {
        self.post.as_ref()
    }

    // ---- diagnostics ----

    pub fn performance_info(&self) -> PerformanceInfo {
        if self.state != EngineState::Running {
            return PerformanceInfo::default();
        }
        let triangles = self
            .nodes
            .values()
            .filter_map(|n| n.mesh.as_ref())
            .map(|m| m.shape.triangle_count())
            .sum();
        PerformanceInfo {
            fps: self.fps.fps(),
            meshes: self.mesh_count(),
            lights: self.lights.len(),
            triangles,
        }
    }
}

fn checked_pose(alpha: f32, beta: f32, radius: f32, target: Vec3) -> Result<OrbitPose> {
    if !(radius > DEGENERATE_RADIUS) || !radius.is_finite() {
        return Err(SceneError::DegenerateOrbit);
    }
    Ok(OrbitPose {
        alpha,
        beta: beta.clamp(BETA_EPSILON, std::f32::consts::PI - BETA_EPSILON),
        radius,
        target,
    })
}

/// Clamps into the supported range and rounds up to a power of two.
pub fn sanitize_shadow_map_size(requested: u32) -> u32 {
    requested
        .clamp(MIN_SHADOW_MAP_SIZE, MAX_SHADOW_MAP_SIZE)
        .next_power_of_two()
        .min(MAX_SHADOW_MAP_SIZE)
}
