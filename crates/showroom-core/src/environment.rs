//! Environment manager: builds a room shell plus its furniture from an
//! environment preset and tears it down again on the next load.

use glam::{Quat, Vec3};
use std::f32::consts::PI;

use crate::catalog::{CameraShot, EnvironmentPreset, PresetCatalog, RoomCategory};
use crate::constants::{CEILING_SUBDIVISIONS, FLOOR_SUBDIVISIONS, WALL_THICKNESS};
use crate::engine::{MeshDesc, RenderEngine};
use crate::error::{PresetKind, Result, SceneError};
use crate::geometry::{self, PrimaryMaterial, Shape};
use crate::handle::NodeId;
use crate::materials::MaterialLibrary;
use crate::state::{EnvironmentState, Published, SubscriptionId};

/// One instantiated furniture object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FurnitureEntry {
    pub id: String,
    pub kind: String,
    pub root: NodeId,
    /// True when the type tag was unknown and a cube stands in for it.
    pub placeholder: bool,
}

#[derive(Default)]
pub struct EnvironmentManager {
    current: Option<&'static EnvironmentPreset>,
    room: Vec<NodeId>,
    furniture: Vec<FurnitureEntry>,
    state: Published<EnvironmentState>,
}

impl EnvironmentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the displayed room with preset `id`. Unknown ids leave the
    /// current room in place.
    pub fn load_environment(
        &mut self,
        engine: &mut RenderEngine,
        materials: &mut MaterialLibrary,
        catalog: &PresetCatalog,
        id: &str,
    ) -> Result<EnvironmentState> {
        let Some(preset) = catalog.environment_preset(id) else {
            log::error!("[environment] preset not found: {}", id);
            return Err(SceneError::not_found(PresetKind::Environment, id));
        };
        engine.require_running()?;

        self.clear(engine);
        self.build_room(engine, materials, preset);
        for object in preset.geometry.objects {
            let composite = geometry::furniture_for_tag(object.kind, object.position);
            let primary = PrimaryMaterial {
                kind: object.material,
                color: object.color,
            };
            match geometry::instantiate(engine, materials, &composite, object.id, primary, object.scale) {
                Ok(root) => {
                    if object.yaw != 0.0 {
                        if let Some(node) = engine.node_mut(root) {
                            node.transform.rotation = Quat::from_rotation_y(object.yaw);
                        }
                    }
                    self.furniture.push(FurnitureEntry {
                        id: object.id.to_string(),
                        kind: object.kind.to_string(),
                        root,
                        placeholder: composite.kind.is_none(),
                    });
                }
                Err(e) => log::warn!("[environment] skipping '{}': {}", object.id, e),
            }
        }

        let roots: Vec<NodeId> = self
            .room
            .iter()
            .copied()
            .chain(self.furniture.iter().map(|f| f.root))
            .collect();
        for root in roots {
            for node in engine.subtree(root) {
                // The node was created above; an error here means it vanished.
                if let Err(e) = engine.set_receive_shadows(node, true) {
                    log::warn!("[environment] {}", e);
                }
            }
        }

        self.current = Some(preset);
        let state = EnvironmentState {
            environment_id: preset.id.to_string(),
            name: preset.name.to_string(),
            category: preset.category,
            suggested_camera: preset.camera_shots.first().copied(),
            room_mesh_count: self.room.len(),
            furniture_count: self.furniture.len(),
        };
        log::info!(
            "[environment] loaded '{}' ({} room meshes, {} objects)",
            preset.id,
            state.room_mesh_count,
            state.furniture_count
        );
        self.state.publish(state.clone());
        Ok(state)
    }

    /// Four walls centred on the room edges, a floor at y = 0 and a ceiling
    /// plane facing down at the wall height.
    fn build_room(&mut self, engine: &mut RenderEngine, materials: &mut MaterialLibrary, preset: &EnvironmentPreset) {
        let g = &preset.geometry;
        let w = g.walls;
        let half_h = w.height / 2.0;
        let walls = [
            ("wall_back", Shape::cuboid(w.width, w.height, WALL_THICKNESS), Vec3::new(0.0, half_h, -w.depth / 2.0)),
            ("wall_front", Shape::cuboid(w.width, w.height, WALL_THICKNESS), Vec3::new(0.0, half_h, w.depth / 2.0)),
            ("wall_left", Shape::cuboid(WALL_THICKNESS, w.height, w.depth), Vec3::new(-w.width / 2.0, half_h, 0.0)),
            ("wall_right", Shape::cuboid(WALL_THICKNESS, w.height, w.depth), Vec3::new(w.width / 2.0, half_h, 0.0)),
        ];
        for (name, shape, at) in walls {
            self.add_room_mesh(engine, materials, MeshDesc::new(name, shape).at(at), w.material, w.color);
        }

        let floor = Shape::ground(g.floor.width, g.floor.depth, FLOOR_SUBDIVISIONS);
        self.add_room_mesh(engine, materials, MeshDesc::new("floor", floor), g.floor.material, g.floor.color);

        let ceiling = Shape::ground(g.ceiling.width, g.ceiling.depth, CEILING_SUBDIVISIONS);
        self.add_room_mesh(
            engine,
            materials,
            MeshDesc::new("ceiling", ceiling)
                .at(Vec3::new(0.0, w.height, 0.0))
                .rotated(Quat::from_rotation_x(PI)),
            g.ceiling.material,
            g.ceiling.color,
        );
    }

    fn add_room_mesh(
        &mut self,
        engine: &mut RenderEngine,
        materials: &mut MaterialLibrary,
        desc: MeshDesc,
        material: &str,
        color: &str,
    ) {
        let name = desc.name.clone();
        let built = materials
            .get(engine, material, color)
            .and_then(|m| engine.create_mesh(desc.material(m)));
        match built {
            Ok(id) => self.room.push(id),
            Err(e) => log::warn!("[environment] skipping {}: {}", name, e),
        }
    }

    /// Disposes every room and furniture node built by the last load.
    pub fn clear(&mut self, engine: &mut RenderEngine) {
        let mut disposed = 0;
        for id in self.room.drain(..) {
            disposed += engine.dispose_node(id);
        }
        for entry in self.furniture.drain(..) {
            disposed += engine.dispose_node(entry.root);
        }
        if disposed > 0 {
            log::debug!("[environment] disposed {} nodes", disposed);
        }
        self.current = None;
    }

    pub fn current(&self) -> Option<&'static EnvironmentPreset> {
        self.current
    }

    pub fn room_meshes(&self) -> &[NodeId] {
        &self.room
    }

    pub fn room_mesh_count(&self) -> usize {
        self.room.len()
    }

    pub fn furniture(&self) -> &[FurnitureEntry] {
        &self.furniture
    }

    pub fn furniture_count(&self) -> usize {
        self.furniture.len()
    }

    pub fn recommended_lighting(&self, catalog: &PresetCatalog, id: &str) -> Option<&'static str> {
        catalog.environment_preset(id).map(|p| p.lighting_recommendation)
    }

    pub fn camera_shots(&self, catalog: &PresetCatalog, id: &str) -> &'static [CameraShot] {
        catalog.environment_preset(id).map_or(&[], |p| p.camera_shots)
    }

    pub fn environments_by_category(
        &self,
        catalog: &PresetCatalog,
        category: RoomCategory,
    ) -> Vec<&'static EnvironmentPreset> {
        catalog.environments_by_category(category)
    }

    pub fn state(&self) -> Option<&EnvironmentState> {
        self.state.get()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&EnvironmentState) + 'static) -> SubscriptionId {
        self.state.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    pub fn dispose(&mut self, engine: &mut RenderEngine) {
        self.clear(engine);
        self.state.reset();
    }
}
