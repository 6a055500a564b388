use glam::Vec3;
use std::collections::BTreeSet;

use crate::constants::{SHADOW_BIAS, SHADOW_BLUR_KERNEL, SHADOW_CONTACT_HARDENING, SHADOW_NORMAL_BIAS};
use crate::handle::{LightId, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightKind {
    Point,
    Directional,
    Spot,
}

impl LightKind {
    pub fn supports_shadows(self) -> bool {
        matches!(self, LightKind::Directional | LightKind::Spot)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LightKind::Point => "point",
            LightKind::Directional => "directional",
            LightKind::Spot => "spot",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "point" => Some(LightKind::Point),
            "directional" => Some(LightKind::Directional),
            "spot" => Some(LightKind::Spot),
            _ => None,
        }
    }
}

/// Spotlight cone: full opening angle in radians, falloff exponent, decay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotCone {
    pub angle: f32,
    pub exponent: f32,
    pub decay: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    /// Local position; relative to `parent` when set.
    pub position: Vec3,
    /// Normalized direction for directional and spot lights.
    pub direction: Vec3,
    pub intensity: f32,
    pub range: f32,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub cone: Option<SpotCone>,
    pub enabled: bool,
    pub parent: Option<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowFilter {
    pub pcf: bool,
    pub contact_hardening: f32,
    pub blur_kernel: u32,
}

impl Default for ShadowFilter {
    fn default() -> Self {
        Self {
            pcf: true,
            contact_hardening: SHADOW_CONTACT_HARDENING,
            blur_kernel: SHADOW_BLUR_KERNEL,
        }
    }
}

/// Shadow map attached to one light, with the meshes it renders.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowGenerator {
    pub light: LightId,
    pub map_size: u32,
    pub bias: f32,
    pub normal_bias: f32,
    pub filter: ShadowFilter,
    pub casters: BTreeSet<NodeId>,
}

impl ShadowGenerator {
    pub(crate) fn new(light: LightId, map_size: u32) -> Self {
        Self {
            light,
            map_size,
            bias: SHADOW_BIAS,
            normal_bias: SHADOW_NORMAL_BIAS,
            filter: ShadowFilter::default(),
            casters: BTreeSet::new(),
        }
    }
}
