use showroom_core::geometry::primitives::{MeshVertex, UnitMesh};
use wgpu::util::DeviceExt;

use super::helpers;
use super::targets::HDR_FORMAT;
use super::uniforms::{DrawUniforms, SceneUniforms};
use crate::constants::DRAW_UNIFORM_STRIDE;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// One uploaded unit tessellation, shared by every node with the same shape key.
pub struct GpuMesh {
    pub vertices: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, unit: UnitMesh) -> Self {
        let data = unit.tessellate();
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices,
            index_count: data.indices.len() as u32,
        }
    }
}

pub fn draw_binding_size() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<DrawUniforms>() as u64)
}

/// Per-draw uniform storage addressed with dynamic offsets. Grows by
/// doubling; the bind group is rebuilt whenever the buffer is replaced.
pub struct DrawBuffer {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    capacity: usize,
}

impl DrawBuffer {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let buffer = helpers::uniform_buffer(device, "draw_uniforms", capacity as u64 * DRAW_UNIFORM_STRIDE);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_draw"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: draw_binding_size(),
                }),
            }],
        });
        Self {
            buffer,
            bind_group,
            capacity,
        }
    }

    /// Returns true when the buffer had to be reallocated.
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout, draws: usize) -> bool {
        if draws <= self.capacity {
            return false;
        }
        let capacity = draws.next_power_of_two();
        log::debug!("[gpu] draw buffer grows to {} slots", capacity);
        *self = Self::new(device, layout, capacity);
        true
    }
}

pub struct SceneResources {
    pub scene_bgl: wgpu::BindGroupLayout,
    pub draw_bgl: wgpu::BindGroupLayout,
    pub scene_uniforms: wgpu::Buffer,
    pub opaque_pipeline: wgpu::RenderPipeline,
    pub transparent_pipeline: wgpu::RenderPipeline,
}

fn scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            // Planes (floor, ceiling) are seen from both sides.
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: helpers::DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub fn create_scene_resources(device: &wgpu::Device, shader: &wgpu::ShaderModule) -> SceneResources {
    let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT, None),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                count: None,
            },
        ],
    });
    let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("draw_bgl"),
        entries: &[helpers::uniform_entry(
            0,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            draw_binding_size(),
        )],
    });
    let scene_uniforms = helpers::uniform_buffer(
        device,
        "scene_uniforms",
        std::mem::size_of::<SceneUniforms>() as u64,
    );
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_scene"),
        bind_group_layouts: &[&scene_bgl, &draw_bgl],
        push_constant_ranges: &[],
    });
    let opaque_pipeline = scene_pipeline(device, &layout, shader, "scene_opaque", Some(wgpu::BlendState::REPLACE), true);
    let transparent_pipeline = scene_pipeline(
        device,
        &layout,
        shader,
        "scene_transparent",
        Some(wgpu::BlendState::ALPHA_BLENDING),
        false,
    );
    SceneResources {
        scene_bgl,
        draw_bgl,
        scene_uniforms,
        opaque_pipeline,
        transparent_pipeline,
    }
}

/// Scene uniforms plus the shadow map the fragment stage samples.
pub fn scene_bind_group(
    device: &wgpu::Device,
    scene: &SceneResources,
    shadow_view: &wgpu::TextureView,
    shadow_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_scene"),
        layout: &scene.scene_bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: scene.scene_uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(shadow_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(shadow_sampler),
            },
        ],
    })
}
