use super::helpers;
use super::targets::RenderTargets;
use crate::config::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD, TONE_MAPPING_EXPOSURE};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
    radius: f32,
    exposure: f32,
}

impl PostUniforms {
    fn new(resolution: [f32; 2], blur_dir: [f32; 2]) -> Self {
        Self {
            resolution,
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            radius: BLOOM_RADIUS,
            exposure: TONE_MAPPING_EXPOSURE,
        }
    }
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    // One uniform block per pass: queue writes land before the whole
    // encoder runs, so passes cannot share a buffer with different values.
    pub(crate) base_uniforms: wgpu::Buffer,
    pub(crate) blur_h_uniforms: wgpu::Buffer,
    pub(crate) blur_v_uniforms: wgpu::Buffer,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
    pub(crate) tonemap_pipeline: wgpu::RenderPipeline,
}

/// Bind groups that point at the current render targets.
pub(crate) struct PostBindGroups {
    pub(crate) hdr: wgpu::BindGroup,
    pub(crate) blur_h_from_a: wgpu::BindGroup,
    pub(crate) blur_v_from_b: wgpu::BindGroup,
    pub(crate) bloom_a_only: wgpu::BindGroup,
}

fn texture_entries() -> [wgpu::BindGroupLayoutEntry; 2] {
    [
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ]
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    bloom_format: wgpu::TextureFormat,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("post_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
    });
    let [tex_entry, sampler_entry] = texture_entries();
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            tex_entry,
            sampler_entry,
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &texture_entries(),
    });
    let size = std::mem::size_of::<PostUniforms>();
    let base_uniforms = helpers::uniform_buffer(device, "post_uniforms", size);
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
    let bright_pipeline = helpers::make_post_pipeline(
        device,
        &pl_single,
        &post_shader,
        "fs_bright",
        bloom_format,
        None,
    );
    let blur_pipeline = helpers::make_post_pipeline(
        device,
        &pl_single,
        &post_shader,
        "fs_blur",
        bloom_format,
        None,
    );
    let composite_pipeline = helpers::make_post_pipeline(
        device,
        &pl_composite,
        &post_shader,
        "fs_composite",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );
    let tonemap_pipeline = helpers::make_post_pipeline(
        device,
        &pl_single,
        &post_shader,
        "fs_tonemap",
        swap_format,
        Some(wgpu::BlendState::REPLACE),
    );

    PostResources {
        bgl0,
        bgl1,
        base_uniforms,
        blur_h_uniforms,
        blur_v_uniforms,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
        tonemap_pipeline,
    }
}

impl PostResources {
    pub(crate) fn bind_groups(
        &self,
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let with_uniforms = |label: &str, view: &wgpu::TextureView, buf: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: buf.as_entire_binding(),
                    },
                ],
            })
        };
        let hdr = with_uniforms("bg_hdr", &targets.hdr_view, &self.base_uniforms);
        let blur_h_from_a =
            with_uniforms("bg_blur_h", &targets.bloom_a_view, &self.blur_h_uniforms);
        let blur_v_from_b =
            with_uniforms("bg_blur_v", &targets.bloom_b_view, &self.blur_v_uniforms);
        let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom_a_only"),
            layout: &self.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        PostBindGroups {
            hdr,
            blur_h_from_a,
            blur_v_from_b,
            bloom_a_only,
        }
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, bloom_size: [u32; 2]) {
        let res = [bloom_size[0] as f32, bloom_size[1] as f32];
        let write = |buf: &wgpu::Buffer, dir: [f32; 2]| {
            queue.write_buffer(buf, 0, bytemuck::bytes_of(&PostUniforms::new(res, dir)));
        };
        write(&self.base_uniforms, [0.0, 0.0]);
        write(&self.blur_h_uniforms, [1.0, 0.0]);
        write(&self.blur_v_uniforms, [0.0, 1.0]);
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
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
                load: wgpu::LoadOp::Clear(clear),
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
