// Uniform layouts shared with the WGSL shaders, plus the pure packing that
// fills them from the core scene graph. No `wgpu` types in here.

use glam::{Mat4, Vec3};
use showroom_core::engine::{Light, LightKind, PbrMaterial, PostProcessSettings, ShadowFilter, ToneMapping};

use crate::constants::{
    BLOOM_REFERENCE_SPREAD, DRAW_UNIFORM_STRIDE, FALLBACK_BASE_COLOR, FALLBACK_ROUGHNESS,
    MAX_GPU_LIGHTS, PCF_KERNEL_PER_RADIUS, PCF_MAX_RADIUS, SHADOW_EYE_DISTANCE, SHADOW_FOCUS, SHADOW_NEAR, SHADOW_ORTHO_HALF_EXTENT,
    SPOT_SHADOW_FOV_MARGIN,
};

pub const LIGHT_KIND_DIRECTIONAL: f32 = 0.0;
pub const LIGHT_KIND_POINT: f32 = 1.0;
pub const LIGHT_KIND_SPOT: f32 = 2.0;

pub const POST_FLAG_BLOOM: u32 = 1;
pub const POST_FLAG_ACES: u32 = 1 << 1;
pub const POST_FLAG_FXAA: u32 = 1 << 2;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub position_range: [f32; 4],
    pub direction_kind: [f32; 4],
    pub color_intensity: [f32; 4],
    /// cos(half angle), exponent, decay, casts shadow.
    pub cone: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    /// xyz eye, w elapsed seconds.
    pub camera_pos: [f32; 4],
    /// rgb ambient, w active light count.
    pub ambient: [f32; 4],
    /// bias, normal bias, enabled, texel size.
    pub shadow: [f32; 4],
    /// pcf on, tap radius, light size (uv) for contact hardening, unused.
    pub shadow_filter: [f32; 4],
    pub lights: [GpuLight; MAX_GPU_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb, alpha.
    pub base_color: [f32; 4],
    /// rgb emissive, w receives shadows.
    pub emissive: [f32; 4],
    /// roughness, metallic, unused, unused.
    pub pbr: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub blur_dir: [f32; 2],
    pub bloom_weight: f32,
    pub bloom_threshold: f32,
    pub bloom_spread: f32,
    pub exposure: f32,
    pub contrast: f32,
    pub sharpen: f32,
    pub color_grade: f32,
    pub flags: u32,
}

#[inline]
pub fn draw_offset(index: usize) -> u64 {
    index as u64 * DRAW_UNIFORM_STRIDE
}

pub fn light_kind_code(kind: LightKind) -> f32 {
    match kind {
        LightKind::Directional => LIGHT_KIND_DIRECTIONAL,
        LightKind::Point => LIGHT_KIND_POINT,
        LightKind::Spot => LIGHT_KIND_SPOT,
    }
}

/// Packs one light in world space. Disabled lights keep their slot with zero
/// intensity so indices stay stable while toggling.
pub fn pack_light(light: &Light, world_pos: Vec3, world_dir: Vec3, casts_shadow: bool) -> GpuLight {
    let intensity = if light.enabled { light.intensity.max(0.0) } else { 0.0 };
    let (cos_half, exponent, decay) = match light.cone {
        Some(c) => ((c.angle * 0.5).cos(), c.exponent, c.decay),
        None => (-1.0, 0.0, 0.0),
    };
    GpuLight {
        position_range: [world_pos.x, world_pos.y, world_pos.z, light.range.max(0.0)],
        direction_kind: [world_dir.x, world_dir.y, world_dir.z, light_kind_code(light.kind)],
        color_intensity: [light.diffuse.x, light.diffuse.y, light.diffuse.z, intensity],
        cone: [cos_half, exponent, decay, if casts_shadow { 1.0 } else { 0.0 }],
    }
}

pub fn draw_uniforms(model: Mat4, material: Option<&PbrMaterial>, receive_shadows: bool) -> DrawUniforms {
    let normal = if model.determinant().abs() > 1e-8 {
        model.inverse().transpose()
    } else {
        model
    };
    let (base, alpha, emissive, roughness, metallic) = match material {
        Some(m) => (m.base_color, m.alpha, m.emissive, m.roughness, m.metallic),
        None => (
            Vec3::from_array(FALLBACK_BASE_COLOR),
            1.0,
            Vec3::ZERO,
            FALLBACK_ROUGHNESS,
            0.0,
        ),
    };
    DrawUniforms {
        model: model.to_cols_array_2d(),
        normal_matrix: normal.to_cols_array_2d(),
        base_color: [base.x, base.y, base.z, alpha.clamp(0.0, 1.0)],
        emissive: [
            emissive.x,
            emissive.y,
            emissive.z,
            if receive_shadows { 1.0 } else { 0.0 },
        ],
        pbr: [roughness.clamp(0.04, 1.0), metallic.clamp(0.0, 1.0), 0.0, 0.0],
    }
}

fn up_for(direction: Vec3) -> Vec3 {
    if direction.normalize_or_zero().dot(Vec3::Y).abs() > 0.99 {
        Vec3::Z
    } else {
        Vec3::Y
    }
}

/// Tap radius for a blur kernel: 0 means a single hardware-filtered tap.
pub fn pcf_radius(blur_kernel: u32) -> u32 {
    (blur_kernel / PCF_KERNEL_PER_RADIUS).min(PCF_MAX_RADIUS)
}

pub fn shadow_filter_uniform(filter: &ShadowFilter) -> [f32; 4] {
    if !filter.pcf {
        return [0.0; 4];
    }
    [
        1.0,
        pcf_radius(filter.blur_kernel) as f32,
        filter.contact_hardening.max(0.0),
        0.0,
    ]
}

/// View-projection for rendering a light's shadow map. Point lights have none.
pub fn light_view_proj(kind: LightKind, position: Vec3, direction: Vec3, cone_angle: Option<f32>, range: f32) -> Option<Mat4> {
    let dir = direction.try_normalize()?;
    match kind {
        LightKind::Directional => {
            let focus = Vec3::from_array(SHADOW_FOCUS);
            let eye = focus - dir * SHADOW_EYE_DISTANCE;
            let view = Mat4::look_at_rh(eye, focus, up_for(dir));
            let h = SHADOW_ORTHO_HALF_EXTENT;
            let proj = Mat4::orthographic_rh(-h, h, -h, h, SHADOW_NEAR, SHADOW_EYE_DISTANCE * 2.0);
            Some(proj * view)
        }
        LightKind::Spot => {
            let fov = (cone_angle? + SPOT_SHADOW_FOV_MARGIN).clamp(0.1, 3.0);
            let view = Mat4::look_at_rh(position, position + dir, up_for(dir));
            let proj = Mat4::perspective_rh(fov, 1.0, SHADOW_NEAR, range.max(SHADOW_NEAR * 10.0));
            Some(proj * view)
        }
        LightKind::Point => None,
    }
}

/// Blur tap spacing in bloom texels for a kernel size and scale.
pub fn bloom_spread(kernel: u32, scale: f32) -> f32 {
    (kernel as f32 * scale.max(0.0) / BLOOM_REFERENCE_SPREAD).max(0.0)
}

/// Post uniforms for one pass. Without settings the chain is a plain
/// pass-through with no bloom or tone mapping.
pub fn post_uniforms(settings: Option<&PostProcessSettings>, resolution: [f32; 2], blur_dir: [f32; 2]) -> PostUniforms {
    match settings {
        Some(s) => {
            let mut flags = 0;
            if s.bloom_weight > 0.0 {
                flags |= POST_FLAG_BLOOM;
            }
            if s.tone_mapping == ToneMapping::Aces {
                flags |= POST_FLAG_ACES;
            }
            if s.fxaa {
                flags |= POST_FLAG_FXAA;
            }
            PostUniforms {
                resolution,
                blur_dir,
                bloom_weight: s.bloom_weight,
                bloom_threshold: s.bloom_threshold,
                bloom_spread: bloom_spread(s.bloom_kernel, s.bloom_scale),
                exposure: s.exposure.max(0.0),
                contrast: s.contrast.max(0.0),
                sharpen: s.sharpen_edge.max(0.0),
                color_grade: s.color_grade.clamp(0.0, 1.0),
                flags,
            }
        }
        None => PostUniforms {
            resolution,
            blur_dir,
            exposure: 1.0,
            contrast: 1.0,
            ..PostUniforms::default()
        },
    }
}
