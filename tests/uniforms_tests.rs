// Host-side tests for GPU uniform packing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod uniforms {
    include!("../src/render/uniforms.rs");
}

use glam::{Mat4, Quat, Vec3, Vec4Swizzles};
use showroom_core::engine::{Light, LightKind, PbrMaterial, PostProcessSettings, ShadowFilter, SpotCone};
use uniforms::*;

fn light(kind: LightKind) -> Light {
    Light {
        name: "test".into(),
        kind,
        position: Vec3::new(0.0, 3.0, 0.0),
        direction: Vec3::NEG_Y,
        intensity: 1.5,
        range: 8.0,
        diffuse: Vec3::new(1.0, 0.9, 0.8),
        specular: Vec3::ONE,
        cone: None,
        enabled: true,
        parent: None,
    }
}

fn project(m: Mat4, p: Vec3) -> Vec3 {
    let clip = m * p.extend(1.0);
    clip.xyz() / clip.w
}

#[test]
fn layouts_match_the_wgsl_structs() {
    assert_eq!(std::mem::size_of::<GpuLight>(), 64);
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 64 * 2 + 16 * 4 + 64 * constants::MAX_GPU_LIGHTS);
    assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    assert_eq!(std::mem::size_of::<PostUniforms>(), 48);
    assert!(std::mem::size_of::<DrawUniforms>() as u64 <= constants::DRAW_UNIFORM_STRIDE);
}

#[test]
fn draw_offsets_step_by_stride() {
    assert_eq!(draw_offset(0), 0);
    assert_eq!(draw_offset(3), 3 * constants::DRAW_UNIFORM_STRIDE);
}

#[test]
fn packed_lights_carry_kind_color_and_cone() {
    let mut spot = light(LightKind::Spot);
    spot.cone = Some(SpotCone {
        angle: std::f32::consts::FRAC_PI_2,
        exponent: 2.0,
        decay: 1.0,
    });
    let packed = pack_light(&spot, spot.position, spot.direction, true);
    assert_eq!(packed.direction_kind[3], LIGHT_KIND_SPOT);
    assert!((packed.cone[0] - std::f32::consts::FRAC_PI_4.cos()).abs() < 1e-6);
    assert_eq!(packed.cone[3], 1.0);
    assert_eq!(packed.color_intensity, [1.0, 0.9, 0.8, 1.5]);
    assert_eq!(packed.position_range[3], 8.0);

    let point = pack_light(&light(LightKind::Point), Vec3::ZERO, Vec3::NEG_Y, false);
    assert_eq!(point.direction_kind[3], LIGHT_KIND_POINT);
    assert_eq!(point.cone[0], -1.0);
    assert_eq!(point.cone[3], 0.0);
}

#[test]
fn disabled_lights_keep_their_slot_dark() {
    let mut l = light(LightKind::Directional);
    l.enabled = false;
    let packed = pack_light(&l, l.position, l.direction, false);
    assert_eq!(packed.color_intensity[3], 0.0);
    assert_eq!(packed.direction_kind[3], LIGHT_KIND_DIRECTIONAL);
}

#[test]
fn draw_uniforms_use_inverse_transpose_for_normals() {
    let model = Mat4::from_scale_rotation_translation(
        Vec3::new(2.0, 1.0, 1.0),
        Quat::from_rotation_y(0.3),
        Vec3::new(1.0, 0.0, -2.0),
    );
    let u = draw_uniforms(model, None, true);
    let normal = Mat4::from_cols_array_2d(&u.normal_matrix);
    assert!(normal.abs_diff_eq(model.inverse().transpose(), 1e-5));
    assert_eq!(u.emissive[3], 1.0);
    assert_eq!(&u.base_color[..3], &constants::FALLBACK_BASE_COLOR[..]);
    assert_eq!(u.base_color[3], 1.0);
}

#[test]
fn draw_uniforms_copy_material_and_clamp() {
    let glass = PbrMaterial {
        name: "glass".into(),
        base_color: Vec3::new(0.9, 0.95, 1.0),
        roughness: 0.0,
        metallic: 1.5,
        emissive: Vec3::new(0.1, 0.0, 0.0),
        alpha: 0.3,
    };
    let u = draw_uniforms(Mat4::IDENTITY, Some(&glass), false);
    assert_eq!(u.base_color, [0.9, 0.95, 1.0, 0.3]);
    assert_eq!(u.emissive, [0.1, 0.0, 0.0, 0.0]);
    assert_eq!(u.pbr[0], 0.04);
    assert_eq!(u.pbr[1], 1.0);
}

#[test]
fn degenerate_model_matrix_does_not_produce_nan_normals() {
    let flat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
    let u = draw_uniforms(flat, None, false);
    assert!(u.normal_matrix.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn directional_shadow_frustum_is_centred_on_the_room() {
    let vp = light_view_proj(LightKind::Directional, Vec3::new(5.0, 10.0, 5.0), Vec3::new(-0.3, -1.0, -0.2), None, 100.0)
        .expect("directional lights cast");
    let focus = project(vp, Vec3::from_array(constants::SHADOW_FOCUS));
    assert!(focus.x.abs() < 1e-4 && focus.y.abs() < 1e-4);
    assert!(focus.z > 0.0 && focus.z < 1.0);
    let corner = project(vp, Vec3::new(4.0, 0.0, 4.0));
    assert!(corner.x.abs() <= 1.0 && corner.y.abs() <= 1.0);
}

#[test]
fn straight_down_directional_light_still_has_a_frustum() {
    assert!(light_view_proj(LightKind::Directional, Vec3::ZERO, Vec3::NEG_Y, None, 10.0).is_some());
}

#[test]
fn spot_shadow_looks_along_the_cone() {
    let vp = light_view_proj(LightKind::Spot, Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, Some(0.8), 10.0)
        .expect("spot lights cast");
    let below = project(vp, Vec3::new(0.0, 0.5, 0.0));
    assert!(below.x.abs() < 1e-4 && below.y.abs() < 1e-4);
    assert!(below.z > 0.0 && below.z < 1.0);
    assert!(light_view_proj(LightKind::Spot, Vec3::ZERO, Vec3::NEG_Y, None, 10.0).is_none());
}

#[test]
fn point_lights_and_zero_directions_have_no_shadow_frustum() {
    assert!(light_view_proj(LightKind::Point, Vec3::ONE, Vec3::NEG_Y, None, 5.0).is_none());
    assert!(light_view_proj(LightKind::Directional, Vec3::ONE, Vec3::ZERO, None, 5.0).is_none());
}

#[test]
fn no_post_settings_is_a_pass_through() {
    let u = post_uniforms(None, [800.0, 600.0], [0.0, 0.0]);
    assert_eq!(u.flags, 0);
    assert_eq!(u.exposure, 1.0);
    assert_eq!(u.contrast, 1.0);
    assert_eq!(u.bloom_weight, 0.0);
    assert_eq!(u.sharpen, 0.0);
    assert_eq!(u.resolution, [800.0, 600.0]);
}

#[test]
fn bloom_settings_enable_the_full_chain() {
    let s = PostProcessSettings::bloom(0.4, 0.8, 0.5);
    let u = post_uniforms(Some(&s), [400.0, 300.0], [1.0, 0.0]);
    assert_eq!(u.flags & POST_FLAG_BLOOM, POST_FLAG_BLOOM);
    assert_eq!(u.flags & POST_FLAG_ACES, POST_FLAG_ACES);
    assert_eq!(u.flags & POST_FLAG_FXAA, POST_FLAG_FXAA);
    assert_eq!(u.blur_dir, [1.0, 0.0]);
    assert_eq!(u.bloom_threshold, 0.8);
    assert_eq!(u.contrast, s.contrast);
    assert!((u.bloom_spread - 1.0).abs() < 1e-6);
    assert_eq!(u.color_grade, 0.5);

    let dark = PostProcessSettings::bloom(0.0, 0.8, 0.0);
    assert_eq!(post_uniforms(Some(&dark), [1.0, 1.0], [0.0, 0.0]).flags & POST_FLAG_BLOOM, 0);
}

#[test]
fn bloom_spread_scales_with_kernel() {
    assert_eq!(bloom_spread(64, 0.5), 1.0);
    assert_eq!(bloom_spread(128, 0.5), 2.0);
    assert_eq!(bloom_spread(64, -1.0), 0.0);
}

#[test]
fn default_shadow_filter_reaches_the_gpu() {
    let u = shadow_filter_uniform(&ShadowFilter::default());
    assert_eq!(u[0], 1.0);
    assert_eq!(u[1], 2.0);
    assert!((u[2] - 0.05).abs() < 1e-6);
}

#[test]
fn shadow_filter_off_or_small_kernel_means_fewer_taps() {
    let off = ShadowFilter {
        pcf: false,
        ..ShadowFilter::default()
    };
    assert_eq!(shadow_filter_uniform(&off), [0.0; 4]);

    let hard = ShadowFilter {
        pcf: true,
        contact_hardening: -1.0,
        blur_kernel: 4,
    };
    assert_eq!(shadow_filter_uniform(&hard), [1.0, 1.0, 0.0, 0.0]);
}

#[test]
fn pcf_radius_is_capped() {
    assert_eq!(pcf_radius(0), 0);
    assert_eq!(pcf_radius(3), 0);
    assert_eq!(pcf_radius(4), 1);
    assert_eq!(pcf_radius(64), constants::PCF_MAX_RADIUS);
}
