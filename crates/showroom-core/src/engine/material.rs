use glam::Vec3;

/// Metallic/roughness material as consumed by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct PbrMaterial {
    pub name: String,
    pub base_color: Vec3,
    pub roughness: f32,
    pub metallic: f32,
    pub emissive: Vec3,
    pub alpha: f32,
}

impl PbrMaterial {
    pub fn is_transparent(&self) -> bool {
        self.alpha < 1.0
    }
}
