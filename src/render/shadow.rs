use super::helpers;
use super::scene::vertex_layout;
use crate::constants::{SHADOW_DEPTH_BIAS_CONSTANT, SHADOW_DEPTH_BIAS_SLOPE};

const SHADOW_POSITION_ONLY: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// Depth map for the first shadow generator in the scene. Starts as a 1x1
/// placeholder so the scene bind group is always valid.
pub struct ShadowResources {
    pub uniforms: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub pipeline: wgpu::RenderPipeline,
    pub sampler: wgpu::Sampler,
    pub view: wgpu::TextureView,
    _texture: wgpu::Texture,
    size: u32,
}

impl ShadowResources {
    pub fn new(device: &wgpu::Device, shader: &wgpu::ShaderModule, draw_bgl: &wgpu::BindGroupLayout) -> Self {
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX, None)],
        });
        let uniforms = helpers::uniform_buffer(device, "shadow_uniforms", 64);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_shadow"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_shadow"),
            bind_group_layouts: &[&bgl, draw_bgl],
            push_constant_ranges: &[],
        });
        let mut buffer_layout = vertex_layout();
        buffer_layout.attributes = &SHADOW_POSITION_ONLY;
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_shadow"),
                buffers: &[buffer_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: helpers::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState {
                    constant: SHADOW_DEPTH_BIAS_CONSTANT,
                    slope_scale: SHADOW_DEPTH_BIAS_SLOPE,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: None,
            cache: None,
            multiview: None,
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let (texture, view) = helpers::create_depth_texture(device, "shadow_map", 1, 1, true);
        Self {
            uniforms,
            bind_group,
            pipeline,
            sampler,
            view,
            _texture: texture,
            size: 1,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Reallocates the map at `size` texels square. Returns true when the
    /// view changed and bind groups sampling it must be rebuilt.
    pub fn ensure_size(&mut self, device: &wgpu::Device, size: u32) -> bool {
        let size = size.clamp(1, device.limits().max_texture_dimension_2d);
        if size == self.size {
            return false;
        }
        log::debug!("[gpu] shadow map {}x{}", size, size);
        let (texture, view) = helpers::create_depth_texture(device, "shadow_map", size, size, true);
        self._texture = texture;
        self.view = view;
        self.size = size;
        true
    }
}
