use super::helpers;
use super::targets::RenderTargets;
use super::uniforms::PostUniforms;

/// Pipelines and uniform buffers of the bloom and tone-mapping chain.
///
/// Each pass that reads different uniforms owns its buffer, since every
/// `write_buffer` in a frame lands before the encoder is submitted.
pub struct PostResources {
    pub bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub main_uniforms: wgpu::Buffer,
    pub blur_h_uniforms: wgpu::Buffer,
    pub blur_v_uniforms: wgpu::Buffer,
    pub bright_pipeline: wgpu::RenderPipeline,
    pub blur_pipeline: wgpu::RenderPipeline,
    pub composite_pipeline: wgpu::RenderPipeline,
}

pub struct PostBindGroups {
    /// HDR scene with the main uniforms: bright pass and composite.
    pub hdr: wgpu::BindGroup,
    pub from_bloom_a: wgpu::BindGroup,
    pub from_bloom_b: wgpu::BindGroup,
    pub bloom_a_only: wgpu::BindGroup,
}

pub fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    bloom_format: wgpu::TextureFormat,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            helpers::texture_entry(0),
            helpers::sampler_entry(1),
            helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT, None),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[helpers::texture_entry(0), helpers::sampler_entry(1)],
    });
    let size = std::mem::size_of::<PostUniforms>() as u64;
    let main_uniforms = helpers::uniform_buffer(device, "post_uniforms", size);
    let blur_h_uniforms = helpers::uniform_buffer(device, "post_uniforms_blur_h", size);
    let blur_v_uniforms = helpers::uniform_buffer(device, "post_uniforms_blur_v", size);

    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bright_pipeline = helpers::make_post_pipeline(device, &pl_single, post_shader, "fs_bright", bloom_format);
    let blur_pipeline = helpers::make_post_pipeline(device, &pl_single, post_shader, "fs_blur", bloom_format);
    let composite_pipeline =
        helpers::make_post_pipeline(device, &pl_composite, post_shader, "fs_composite", swap_format);

    PostResources {
        bgl0,
        bgl1,
        main_uniforms,
        blur_h_uniforms,
        blur_v_uniforms,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

fn source_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: Option<&wgpu::Buffer>,
) -> wgpu::BindGroup {
    let mut entries = vec![
        wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::TextureView(view),
        },
        wgpu::BindGroupEntry {
            binding: 1,
            resource: wgpu::BindingResource::Sampler(sampler),
        },
    ];
    if let Some(buf) = uniforms {
        entries.push(wgpu::BindGroupEntry {
            binding: 2,
            resource: buf.as_entire_binding(),
        });
    }
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &entries,
    })
}

/// Bind groups referencing the current targets; rebuilt after every resize.
pub fn bind_groups(
    device: &wgpu::Device,
    post: &PostResources,
    sampler: &wgpu::Sampler,
    targets: &RenderTargets,
) -> PostBindGroups {
    PostBindGroups {
        hdr: source_group(device, "bg_hdr", &post.bgl0, &targets.hdr_view, sampler, Some(&post.main_uniforms)),
        from_bloom_a: source_group(
            device,
            "bg_from_bloom_a",
            &post.bgl0,
            &targets.bloom_a_view,
            sampler,
            Some(&post.blur_h_uniforms),
        ),
        from_bloom_b: source_group(
            device,
            "bg_from_bloom_b",
            &post.bgl0,
            &targets.bloom_b_view,
            sampler,
            Some(&post.blur_v_uniforms),
        ),
        bloom_a_only: source_group(device, "bg_bloom_a_only", &post.bgl1, &targets.bloom_a_view, sampler, None),
    }
}

pub fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
