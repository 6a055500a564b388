// Renderer tuning for the WebGPU front-end.

// Lights packed into the scene uniform block
pub const MAX_GPU_LIGHTS: usize = 8;

// Per-draw uniforms live in one buffer addressed with dynamic offsets
pub const DRAW_UNIFORM_STRIDE: u64 = 256;
pub const INITIAL_DRAW_CAPACITY: usize = 256;

// Directional shadow frustum, centred on the room
pub const SHADOW_FOCUS: [f32; 3] = [0.0, 1.0, 0.0];
pub const SHADOW_ORTHO_HALF_EXTENT: f32 = 9.0;
pub const SHADOW_EYE_DISTANCE: f32 = 20.0;
pub const SHADOW_NEAR: f32 = 0.1;
pub const SPOT_SHADOW_FOV_MARGIN: f32 = 0.15; // radians added to the cone angle
pub const SHADOW_DEPTH_BIAS_CONSTANT: i32 = 2;
pub const SHADOW_DEPTH_BIAS_SLOPE: f32 = 2.0;
// PCF taps reach this many texels out; the blur kernel picks the radius below it
pub const PCF_MAX_RADIUS: u32 = 2;
pub const PCF_KERNEL_PER_RADIUS: u32 = 4;

// Meshes without a material
pub const FALLBACK_BASE_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
pub const FALLBACK_ROUGHNESS: f32 = 0.7;

// Blur spread of 1 texel per tap at the default kernel and scale
pub const BLOOM_REFERENCE_SPREAD: f32 = 32.0;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.25;
