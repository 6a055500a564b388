use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use showroom_core::engine::{LightKind, ShadowFilter};
use showroom_core::geometry::UnitMesh;
use showroom_core::RenderEngine;
use smallvec::SmallVec;
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod shadow;
mod targets;
pub mod uniforms;

use crate::constants::{INITIAL_DRAW_CAPACITY, MAX_GPU_LIGHTS};
use scene::{DrawBuffer, GpuMesh, SceneResources};
use shadow::ShadowResources;
use targets::RenderTargets;
use uniforms::{GpuLight, SceneUniforms};

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
static SHADOW_WGSL: &str = include_str!("../shaders/shadow.wgsl");
static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

struct DrawItem {
    mesh: UnitMesh,
    slot: usize,
    transparent: bool,
    caster: bool,
    eye_distance: f32,
}

/// Everything needed to shadow the scene from one light this frame.
struct ShadowPlan {
    view_proj: Mat4,
    map_size: u32,
    bias: f32,
    normal_bias: f32,
    filter: ShadowFilter,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    scene: SceneResources,
    scene_bind_group: wgpu::BindGroup,
    draw_buffer: DrawBuffer,
    shadow: ShadowResources,
    meshes: FnvHashMap<UnitMesh, GpuMesh>,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    post_groups: post::PostBindGroups,

    draws: Vec<DrawItem>,
    draw_bytes: Vec<u8>,
    width: u32,
    height: u32,
    time_accum: f32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits on web avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(SHADOW_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });

        let scene = scene::create_scene_resources(&device, &scene_shader);
        let draw_buffer = DrawBuffer::new(&device, &scene.draw_bgl, INITIAL_DRAW_CAPACITY);
        let shadow = ShadowResources::new(&device, &shadow_shader, &scene.draw_bgl);
        let scene_bind_group = scene::scene_bind_group(&device, &scene, &shadow.view, &shadow.sampler);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, targets::HDR_FORMAT, format);
        let post_groups = post::bind_groups(&device, &post, &linear_sampler, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            scene_bind_group,
            draw_buffer,
            shadow,
            meshes: FnvHashMap::default(),
            targets,
            linear_sampler,
            post,
            post_groups,
            draws: Vec::new(),
            draw_bytes: Vec::new(),
            width,
            height,
            time_accum: 0.0,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post_groups = post::bind_groups(&self.device, &self.post, &self.linear_sampler, &self.targets);
        }
    }

    /// Reconfigures after the surface was lost or went stale.
    pub fn reconfigure(&mut self) {
        log::warn!("[gpu] surface lost; reconfiguring");
        self.surface.configure(&self.device, &self.config);
    }

    /// Draws the engine's scene graph: shadow pass, HDR scene pass, bloom and
    /// composite.
    pub fn render(&mut self, engine: &RenderEngine, dt_sec: f32) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let Some(camera) = engine.camera() else {
            return self.present_clear(engine);
        };
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let eye = camera.position();
        let view_proj = camera.projection_matrix(aspect) * camera.view_matrix();

        let shadow_plan = self.plan_shadow(engine);
        let (lights, shadow_light_slot) = self.pack_lights(engine);
        self.collect_draws(engine, eye, shadow_plan.as_ref());
        self.upload_draws();

        let mut scene_uniforms = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, self.time_accum],
            ..SceneUniforms::default()
        };
        let ambient = engine.ambient_color();
        scene_uniforms.ambient = [ambient.x, ambient.y, ambient.z, lights.len() as f32];
        for (dst, src) in scene_uniforms.lights.iter_mut().zip(lights.iter()) {
            *dst = *src;
        }
        if let (Some(plan), Some(_)) = (shadow_plan.as_ref(), shadow_light_slot) {
            if self.shadow.ensure_size(&self.device, plan.map_size) {
                self.scene_bind_group =
                    scene::scene_bind_group(&self.device, &self.scene, &self.shadow.view, &self.shadow.sampler);
            }
            scene_uniforms.light_view_proj = plan.view_proj.to_cols_array_2d();
            scene_uniforms.shadow = [plan.bias, plan.normal_bias, 1.0, 1.0 / self.shadow.size() as f32];
            scene_uniforms.shadow_filter = uniforms::shadow_filter_uniform(&plan.filter);
            self.queue
                .write_buffer(&self.shadow.uniforms, 0, bytemuck::bytes_of(&plan.view_proj.to_cols_array_2d()));
        }
        self.queue
            .write_buffer(&self.scene.scene_uniforms, 0, bytemuck::bytes_of(&scene_uniforms));

        let settings = engine.post_process();
        let full_res = [self.width as f32, self.height as f32];
        let bloom_res = self.targets.bloom_resolution();
        let main = uniforms::post_uniforms(settings, full_res, [0.0, 0.0]);
        let bloom_on = main.flags & uniforms::POST_FLAG_BLOOM != 0;
        self.queue
            .write_buffer(&self.post.main_uniforms, 0, bytemuck::bytes_of(&main));
        if bloom_on {
            let h = uniforms::post_uniforms(settings, bloom_res, [1.0, 0.0]);
            let v = uniforms::post_uniforms(settings, bloom_res, [0.0, 1.0]);
            self.queue
                .write_buffer(&self.post.blur_h_uniforms, 0, bytemuck::bytes_of(&h));
            self.queue
                .write_buffer(&self.post.blur_v_uniforms, 0, bytemuck::bytes_of(&v));
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: shadow map
        if shadow_plan.is_some() && shadow_light_slot.is_some() {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.shadow.pipeline);
            rpass.set_bind_group(0, &self.shadow.bind_group, &[]);
            for item in self.draws.iter().filter(|d| d.caster) {
                self.draw_item(&mut rpass, item);
            }
        }

        // Pass 2: lit scene into HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(helpers::to_wgpu_color(engine.clear_color())),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_pipeline(&self.scene.opaque_pipeline);
            for item in self.draws.iter().filter(|d| !d.transparent) {
                self.draw_item(&mut rpass, item);
            }
            rpass.set_pipeline(&self.scene.transparent_pipeline);
            for item in self.draws.iter().filter(|d| d.transparent) {
                self.draw_item(&mut rpass, item);
            }
        }

        // Passes 3-5: bright pass and separable blur at half resolution
        if bloom_on {
            post::blit(
                &mut encoder,
                "bright_pass",
                &self.targets.bloom_a_view,
                &self.post.bright_pipeline,
                &self.post_groups.hdr,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_h",
                &self.targets.bloom_b_view,
                &self.post.blur_pipeline,
                &self.post_groups.from_bloom_a,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_v",
                &self.targets.bloom_a_view,
                &self.post.blur_pipeline,
                &self.post_groups.from_bloom_b,
                None,
            );
        }

        // Pass 6: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            &self.post.composite_pipeline,
            &self.post_groups.hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Frame with no camera yet: clear to the engine's background.
    fn present_clear(&mut self, engine: &RenderEngine) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("clear_encoder"),
            });
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("clear_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(helpers::to_wgpu_color(engine.clear_color())),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn draw_item(&self, rpass: &mut wgpu::RenderPass<'_>, item: &DrawItem) {
        let Some(mesh) = self.meshes.get(&item.mesh) else {
            return;
        };
        let offset = uniforms::draw_offset(item.slot) as u32;
        rpass.set_bind_group(1, &self.draw_buffer.bind_group, &[offset]);
        rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
        rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    /// The renderer shadows from the first generator only.
    fn plan_shadow(&self, engine: &RenderEngine) -> Option<ShadowPlan> {
        if !engine.shadows_enabled() {
            return None;
        }
        let (_, generator) = engine.shadow_generators().next()?;
        let light = engine.light(generator.light)?;
        if !light.enabled {
            return None;
        }
        let (position, direction) = engine.light_world_frame(generator.light)?;
        let view_proj = uniforms::light_view_proj(
            light.kind,
            position,
            direction,
            light.cone.map(|c| c.angle),
            light.range,
        )?;
        Some(ShadowPlan {
            view_proj,
            map_size: generator.map_size,
            bias: generator.bias,
            normal_bias: generator.normal_bias,
            filter: generator.filter,
        })
    }

    /// Packs up to [`MAX_GPU_LIGHTS`] lights; returns the slot of the light
    /// that owns the shadow map, if it made the cut.
    fn pack_lights(&self, engine: &RenderEngine) -> (SmallVec<[GpuLight; MAX_GPU_LIGHTS]>, Option<usize>) {
        let shadow_light = if engine.shadows_enabled() {
            engine.shadow_generators().next().map(|(_, g)| g.light)
        } else {
            None
        };
        let mut packed = SmallVec::new();
        let mut shadow_slot = None;
        for (id, light) in engine.lights() {
            if packed.len() == MAX_GPU_LIGHTS {
                log::debug!("[gpu] more than {} lights; extra lights skipped", MAX_GPU_LIGHTS);
                break;
            }
            let Some((position, direction)) = engine.light_world_frame(id) else {
                continue;
            };
            let casts = shadow_light == Some(id) && light.kind != LightKind::Point;
            if casts {
                shadow_slot = Some(packed.len());
            }
            packed.push(uniforms::pack_light(light, position, direction, casts));
        }
        (packed, shadow_slot)
    }

    fn collect_draws(&mut self, engine: &RenderEngine, eye: Vec3, shadow: Option<&ShadowPlan>) {
        self.draws.clear();
        self.draw_bytes.clear();
        let casters = shadow.and_then(|_| engine.shadow_generators().next().map(|(_, g)| &g.casters));
        let stride = uniforms::draw_offset(1) as usize;
        for (id, node) in engine.nodes() {
            let Some(part) = node.mesh.as_ref() else {
                continue;
            };
            if !engine.is_visible(id) {
                continue;
            }
            let Some(world) = engine.world_matrix(id) else {
                continue;
            };
            let (unit, scale) = part.shape.unit_mesh();
            let model = world * Mat4::from_scale(scale);
            let material = part.material.and_then(|m| engine.material(m));
            let u = uniforms::draw_uniforms(model, material, part.receive_shadows);

            let slot = self.draws.len();
            self.draw_bytes.extend_from_slice(bytemuck::bytes_of(&u));
            self.draw_bytes.resize((slot + 1) * stride, 0);

            let device = &self.device;
            self.meshes
                .entry(unit)
                .or_insert_with(|| GpuMesh::upload(device, unit));

            self.draws.push(DrawItem {
                mesh: unit,
                slot,
                transparent: material.is_some_and(|m| m.is_transparent()),
                caster: casters.is_some_and(|c| c.contains(&id)),
                eye_distance: world.w_axis.truncate().distance(eye),
            });
        }
        // Transparent draws back to front; opaque order is irrelevant with depth.
        self.draws.sort_by(|a, b| match (a.transparent, b.transparent) {
            (true, true) => b.eye_distance.total_cmp(&a.eye_distance),
            _ => a.transparent.cmp(&b.transparent),
        });
    }

    fn upload_draws(&mut self) {
        if self.draws.is_empty() {
            return;
        }
        self.draw_buffer
            .ensure_capacity(&self.device, &self.scene.draw_bgl, self.draws.len());
        self.queue
            .write_buffer(&self.draw_buffer.buffer, 0, &self.draw_bytes);
    }
}
