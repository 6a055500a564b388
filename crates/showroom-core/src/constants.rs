// Shared tuning constants for the scene engine and its managers.

// Scene defaults
pub const CLEAR_COLOR: [f32; 4] = [0.17, 0.17, 0.17, 1.0];
pub const BASE_AMBIENT_COLOR: [f32; 3] = [0.1, 0.1, 0.15];
pub const MAX_LIGHTS: usize = 8;

// Shadows
pub const DEFAULT_SHADOW_MAP_SIZE: u32 = 2048;
pub const MIN_SHADOW_MAP_SIZE: u32 = 256;
pub const MAX_SHADOW_MAP_SIZE: u32 = 4096;
pub const SHADOW_BIAS: f32 = 0.000_05;
pub const SHADOW_NORMAL_BIAS: f32 = 0.01;
pub const SHADOW_BLUR_KERNEL: u32 = 8;
pub const SHADOW_CONTACT_HARDENING: f32 = 0.05;

// Cameras
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const STATIC_CAMERA_FOV: f32 = 0.8; // radians
pub const ORBIT_MIN_RADIUS: f32 = 0.1;
pub const ORBIT_MAX_RADIUS: f32 = 100.0;
pub const BETA_EPSILON: f32 = 0.1; // polar angle stays inside (eps, pi - eps)
pub const DEGENERATE_RADIUS: f32 = 1e-5;
pub const DEFAULT_CAMERA_PRESET: &str = "default";

// Camera transitions: 60 steps at 60 steps/s
pub const TRANSITION_STEPS: u32 = 60;
pub const TRANSITION_STEPS_PER_SEC: f32 = 60.0;

// Room construction
pub const WALL_THICKNESS: f32 = 0.1;
pub const FLOOR_SUBDIVISIONS: u32 = 50;
pub const CEILING_SUBDIVISIONS: u32 = 30;

// Post-processing
pub const BLOOM_KERNEL: u32 = 64;
pub const BLOOM_SCALE: f32 = 0.5;
pub const TONE_EXPOSURE: f32 = 1.0;
pub const TONE_CONTRAST: f32 = 1.2;
pub const SHARPEN_EDGE_AMOUNT: f32 = 0.3;

// Live adjustment
pub const INTENSITY_PERCENT_MAX: f32 = 200.0;

// Diagnostics
pub const FPS_SMOOTHING: f32 = 0.1; // exponential moving average weight of the newest sample
pub const FPS_REPORT_INTERVAL_SEC: f32 = 0.5;

// Products
pub const PRODUCT_PLACEHOLDER_HEIGHT: f32 = 1.0;
pub const PRODUCT_PLACEHOLDER_DIAMETER: f32 = 0.3;
pub const PRODUCT_LIGHT_TEMPERATURE_K: f32 = 3000.0;
