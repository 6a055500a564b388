// Host-side tests for renderer constants and how they line up with the core.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn gpu_light_slots_match_engine_light_budget() {
    assert_eq!(MAX_GPU_LIGHTS, showroom_core::constants::MAX_LIGHTS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn draw_stride_meets_webgpu_offset_alignment() {
    // Default min_uniform_buffer_offset_alignment is 256.
    assert_eq!(DRAW_UNIFORM_STRIDE % 256, 0);
    assert!(INITIAL_DRAW_CAPACITY > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn shadow_frustum_covers_the_largest_room() {
    let widest = showroom_core::catalog::ENVIRONMENT_PRESETS
        .iter()
        .map(|e| e.geometry.walls.width.max(e.geometry.walls.depth))
        .fold(0.0f32, f32::max);
    assert!(SHADOW_ORTHO_HALF_EXTENT * 2.0 >= widest);
    assert!(SHADOW_NEAR > 0.0 && SHADOW_NEAR < SHADOW_EYE_DISTANCE);
    assert!(SPOT_SHADOW_FOV_MARGIN >= 0.0);
}

#[test]
fn fallback_material_is_a_valid_color() {
    assert!(FALLBACK_BASE_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
    assert!((0.0..=1.0).contains(&FALLBACK_ROUGHNESS));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_delta_is_capped_sensibly() {
    assert!(MAX_FRAME_DT_SEC > 1.0 / 60.0);
    assert!(MAX_FRAME_DT_SEC <= 1.0);
    assert!(BLOOM_REFERENCE_SPREAD > 0.0);
}
