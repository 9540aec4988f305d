use crate::core::{RenderInfo, StressState};
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;

use post::{PostBindGroups, PostResources};
use scene::SceneResources;
use targets::RenderTargets;

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    scene: SceneResources,

    // Post-processing resources
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    bind_groups: PostBindGroups,

    info: RenderInfo,
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
                    // Default limits on web avoid passing unknown fields to older WebGPU impls;
                    // only the buffer size is raised to what the adapter offers
                    required_limits: wgpu::Limits {
                        max_buffer_size: adapter.limits().max_buffer_size,
                        ..wgpu::Limits::default()
                    },
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
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
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        // Scene renders into HDR; post passes resolve into the swapchain
        let targets = RenderTargets::new(&device, width, height);
        let scene = scene::create_scene_resources(&device, helpers::HDR_FORMAT);

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
        let post = post::create_post_resources(&device, helpers::HDR_FORMAT, format);
        let bind_groups = post.bind_groups(&device, &linear_sampler, &targets);
        post.write_uniforms(&queue, targets.bloom_size);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            linear_sampler,
            post,
            bind_groups,
            info: RenderInfo::default(),
        })
    }

    /// Counters from the most recent `render`.
    pub fn info(&self) -> &RenderInfo {
        &self.info
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, width, height);
        self.bind_groups = self
            .post
            .bind_groups(&self.device, &self.linear_sampler, &self.targets);
        self.post.write_uniforms(&self.queue, self.targets.bloom_size);
        log::debug!("[gpu] resized to {}x{}", width, height);
    }

    /// Configure the surface again after it was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, state: &StressState) -> Result<(), wgpu::SurfaceError> {
        self.info.reset();
        self.scene.prepare(&self.device, &self.queue, state);

        let frame = self.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Scene pass into HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
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
            self.scene
                .draw(&mut rpass, state.toggles.wireframe, &mut self.info);
        }

        let bg = &self.bind_groups;
        if state.toggles.bloom_enabled {
            // Bright pass: HDR -> bloom A
            post::blit(
                &mut encoder,
                "bright_pass",
                &self.targets.bloom_a_view,
                CLEAR_COLOR,
                &self.post.bright_pipeline,
                &bg.hdr,
                None,
            );
            // Blur H: A -> B
            post::blit(
                &mut encoder,
                "blur_h",
                &self.targets.bloom_b_view,
                CLEAR_COLOR,
                &self.post.blur_pipeline,
                &bg.blur_h_from_a,
                None,
            );
            // Blur V: B -> A
            post::blit(
                &mut encoder,
                "blur_v",
                &self.targets.bloom_a_view,
                CLEAR_COLOR,
                &self.post.blur_pipeline,
                &bg.blur_v_from_b,
                None,
            );
            // Composite HDR + bloom A to the swapchain
            post::blit(
                &mut encoder,
                "composite",
                &swap_view,
                CLEAR_COLOR,
                &self.post.composite_pipeline,
                &bg.hdr,
                Some(&bg.bloom_a_only),
            );
        } else {
            post::blit(
                &mut encoder,
                "tonemap",
                &swap_view,
                CLEAR_COLOR,
                &self.post.tonemap_pipeline,
                &bg.hdr,
                None,
            );
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
