pub mod furniture;
pub mod primitives;

pub use furniture::{Composite, FurnitureKind, Part, PartMaterial};
pub use primitives::{MeshData, MeshVertex, Shape, UnitMesh};

use glam::Vec3;

use crate::engine::{MeshDesc, RenderEngine, Transform};
use crate::error::Result;
use crate::handle::NodeId;
use crate::materials::MaterialLibrary;

/// Material configured on the object that owns a composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimaryMaterial<'a> {
    pub kind: &'a str,
    pub color: &'a str,
}

/// Builds the furniture for a type tag, or a unit-cube placeholder when the
/// tag is not recognized.
pub fn furniture_for_tag(tag: &str, position: Vec3) -> Composite {
    match FurnitureKind::from_tag(tag) {
        Some(kind) => kind.build(position),
        None => {
            log::warn!("[geometry] unknown furniture type '{}', using placeholder", tag);
            furniture::placeholder(position)
        }
    }
}

/// Adds a composite to the scene: one root node carrying the placement and
/// scale, one child mesh per part. Returns the root.
///
/// A part that fails to build is logged and skipped; only a root failure is
/// returned as an error.
pub fn instantiate(
    engine: &mut RenderEngine,
    materials: &mut MaterialLibrary,
    composite: &Composite,
    name: &str,
    primary: PrimaryMaterial<'_>,
    scale: Vec3,
) -> Result<NodeId> {
    let root = engine.create_node(
        name,
        Transform::from_translation(composite.position).with_scale(scale),
        None,
    )?;
    for part in &composite.parts {
        let (kind, color) = match part.material {
            PartMaterial::Primary => (primary.kind, primary.color),
            PartMaterial::Fixed { kind, color } => (kind, color),
        };
        let built = materials.get(engine, kind, color).and_then(|material| {
            engine.create_mesh(
                MeshDesc::new(format!("{}/{}", name, part.name), part.shape)
                    .at(part.offset)
                    .rotated(part.rotation)
                    .parent(root)
                    .material(material),
            )
        });
        if let Err(e) = built {
            log::warn!("[geometry] skipped part {}/{}: {}", name, part.name, e);
        }
    }
    Ok(root)
}
