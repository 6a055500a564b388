use glam::{Mat4, Quat, Vec3};

use crate::geometry::Shape;
use crate::handle::{MaterialId, NodeId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Geometry attached to a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshPart {
    pub shape: Shape,
    pub material: Option<MaterialId>,
    pub receive_shadows: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub parent: Option<NodeId>,
    pub mesh: Option<MeshPart>,
    pub visible: bool,
}

impl SceneNode {
    pub fn is_mesh(&self) -> bool {
        self.mesh.is_some()
    }
}

/// Creation parameters for [`super::RenderEngine::create_mesh`].
#[derive(Clone, Debug)]
pub struct MeshDesc {
    pub name: String,
    pub shape: Shape,
    pub transform: Transform,
    pub parent: Option<NodeId>,
    pub material: Option<MaterialId>,
}

impl MeshDesc {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            transform: Transform::IDENTITY,
            parent: None,
            material: None,
        }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }
}
