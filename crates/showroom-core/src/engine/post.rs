use crate::constants::{BLOOM_KERNEL, BLOOM_SCALE, SHARPEN_EDGE_AMOUNT, TONE_CONTRAST, TONE_EXPOSURE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneMapping {
    Aces,
    None,
}

/// Post-processing pipeline applied after the HDR scene pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostProcessSettings {
    pub bloom_weight: f32,
    pub bloom_threshold: f32,
    pub bloom_kernel: u32,
    pub bloom_scale: f32,
    pub tone_mapping: ToneMapping,
    pub exposure: f32,
    pub contrast: f32,
    pub fxaa: bool,
    pub sharpen_edge: f32,
    pub color_grade: f32,
}

impl PostProcessSettings {
    /// Bloom chain with the default tone mapping and antialiasing.
    pub fn bloom(weight: f32, threshold: f32, color_grade: f32) -> Self {
        Self {
            bloom_weight: weight.max(0.0),
            bloom_threshold: threshold.max(0.0),
            bloom_kernel: BLOOM_KERNEL,
            bloom_scale: BLOOM_SCALE,
            tone_mapping: ToneMapping::Aces,
            exposure: TONE_EXPOSURE,
            contrast: TONE_CONTRAST,
            fxaa: true,
            sharpen_edge: SHARPEN_EDGE_AMOUNT,
            color_grade: color_grade.max(0.0),
        }
    }
}
