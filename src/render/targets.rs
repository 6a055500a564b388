use super::helpers;

pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen targets sized to the canvas.
///
/// - `hdr_*` hold the lit scene in Rgba16Float, with `depth_*` for the scene pass.
/// - `bloom_*` are half-res ping-pong buffers for the bright pass and blur.
pub struct RenderTargets {
    pub hdr_view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    pub bloom_a_view: wgpu::TextureView,
    pub bloom_b_view: wgpu::TextureView,
    bloom_size: (u32, u32),
    _textures: [wgpu::Texture; 4],
}

impl RenderTargets {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, "scene_depth", width, height, false);
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) = helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT);
        let (bloom_b, bloom_b_view) = helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT);
        Self {
            hdr_view,
            depth_view,
            bloom_a_view,
            bloom_b_view,
            bloom_size: (bw, bh),
            _textures: [hdr_tex, depth_tex, bloom_a, bloom_b],
        }
    }

    pub fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }

    pub fn bloom_resolution(&self) -> [f32; 2] {
        [self.bloom_size.0 as f32, self.bloom_size.1 as f32]
    }
}
