//! Scene core for the interior showroom viewer: a retained scene graph,
//! compiled-in presets, and the managers that swap lighting rigs, rooms and
//! camera viewpoints. Rendering backends read the graph; nothing here touches
//! a GPU.

pub mod camera;
pub mod catalog;
pub mod color;
pub mod constants;
pub mod diagnostics;
pub mod engine;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod lighting;
pub mod materials;
pub mod product;
pub mod state;
pub mod viewer;

pub use camera::{cartesian_to_spherical, clamp_beta, spherical_to_cartesian, CameraController};
pub use catalog::PresetCatalog;
pub use diagnostics::PerformanceInfo;
pub use engine::{EngineConfig, EngineState, RenderEngine};
pub use environment::EnvironmentManager;
pub use error::{PresetKind, Result, SceneError};
pub use handle::{LightId, MaterialId, NodeId, ShadowId};
pub use lighting::{LightInfo, LightingManager};
pub use materials::MaterialLibrary;
pub use product::{Product3D, ProductLight, ProductManager, ProductMaterial};
pub use state::{EnvironmentState, LightingState, Published, SubscriptionId};
pub use viewer::Viewer;
