use super::helpers::{self, DEPTH_FORMAT};
use crate::config::{MATERIAL_SHININESS, MATERIAL_SPECULAR_HEX, MIN_INSTANCE_CAPACITY};
use crate::core::capacity::{max_instance_slots, next_instance_capacity};
use crate::core::color::hex_to_linear_rgb;
use crate::core::{GeometryKind, Primitive, RenderInfo, StressState, Vertex};
use glam::Mat4;
use std::ops::Range;
use wgpu::util::DeviceExt;

pub(crate) const MAX_LIGHTS: usize = 8;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
    // rgb colour, a = 1 lit / 0 unlit
    color: [f32; 4],
}

impl InstanceRaw {
    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
    ];
    const STRIDE: u64 = std::mem::size_of::<InstanceRaw>() as u64;

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

const VERTEX_ATTRIBS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBS,
    }
}

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
struct LightUniform {
    position_range: [f32; 4],
    color_intensity: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalsUniform {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    lights: [LightUniform; MAX_LIGHTS],
    light_count: u32,
    shininess: f32,
    specular: f32,
    _pad: f32,
}

/// GPU copy of one primitive, shared by every object of that kind.
pub(crate) struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    wire_index_buffer: wgpu::Buffer,
    index_count: u32,
    wire_index_count: u32,
}

impl MeshBuffers {
    fn new(device: &wgpu::Device, kind: GeometryKind) -> Self {
        let mesh = kind.build();
        let wire = mesh.wire_indices();
        let label = format!("{:?}", kind);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertices")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let wire_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_wire_indices")),
            contents: bytemuck::cast_slice(&wire),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            wire_index_buffer,
            index_count: mesh.indices.len() as u32,
            wire_index_count: wire.len() as u32,
        }
    }
}

/// Per-instance storage sized to the pool.
///
/// Sizing follows `next_instance_capacity`, so removing objects gives GPU
/// memory back. `max_slots` is the most the device lets one buffer hold.
pub(crate) struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    max_slots: usize,
}

impl InstanceBuffer {
    fn with_capacity(device: &wgpu::Device, capacity: usize) -> Self {
        let max_slots = max_instance_slots(device.limits().max_buffer_size, InstanceRaw::STRIDE);
        let capacity = capacity.min(max_slots);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: capacity as u64 * InstanceRaw::STRIDE,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity,
            max_slots,
        }
    }

    fn fit(&mut self, device: &wgpu::Device, needed: usize) {
        if let Some(target) = next_instance_capacity(self.capacity, needed, self.max_slots) {
            let old = std::mem::replace(self, Self::with_capacity(device, target));
            old.buffer.destroy();
            log::debug!("[scene] instance buffer {} -> {} slots", old.capacity, self.capacity);
        }
    }
}

pub(crate) struct SceneResources {
    solid_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    meshes: Vec<MeshBuffers>,
    instances: InstanceBuffer,
    scratch: Vec<InstanceRaw>,
    batches: [Range<u32>; GeometryKind::COUNT],
    markers: Range<u32>,
    warned_over_limit: bool,
}

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let label = match topology {
        wgpu::PrimitiveTopology::LineList => "scene_wire_pipeline",
        _ => "scene_solid_pipeline",
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout(), InstanceRaw::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> SceneResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let solid_pipeline = make_scene_pipeline(
        device,
        &layout,
        &shader,
        color_format,
        wgpu::PrimitiveTopology::TriangleList,
    );
    let wire_pipeline = make_scene_pipeline(
        device,
        &layout,
        &shader,
        color_format,
        wgpu::PrimitiveTopology::LineList,
    );
    let globals_buffer =
        helpers::uniform_buffer(device, "scene_globals", std::mem::size_of::<GlobalsUniform>());
    let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: globals_buffer.as_entire_binding(),
        }],
    });
    let meshes = GeometryKind::ALL
        .iter()
        .map(|&kind| MeshBuffers::new(device, kind))
        .collect();

    SceneResources {
        solid_pipeline,
        wire_pipeline,
        globals_buffer,
        globals_bind_group,
        meshes,
        instances: InstanceBuffer::with_capacity(device, MIN_INSTANCE_CAPACITY),
        scratch: Vec::new(),
        batches: Default::default(),
        markers: 0..0,
        warned_over_limit: false,
    }
}

impl SceneResources {
    /// Upload camera, lights and every instance for this frame.
    ///
    /// Instances are grouped by geometry kind so each kind is one draw.
    /// Light markers follow the objects.
    pub(crate) fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, state: &StressState) {
        let mut lights = [LightUniform::default(); MAX_LIGHTS];
        for (slot, light) in lights.iter_mut().zip(state.lights.iter()) {
            let p = light.position;
            let c = light.color;
            *slot = LightUniform {
                position_range: [p.x, p.y, p.z, light.distance],
                color_intensity: [c[0], c[1], c[2], light.intensity],
            };
        }
        let eye = state.camera.eye;
        let globals = GlobalsUniform {
            view_proj: state.camera.view_projection().to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, 1.0],
            lights,
            light_count: state.lights.len().min(MAX_LIGHTS) as u32,
            shininess: MATERIAL_SHININESS,
            specular: hex_to_linear_rgb(MATERIAL_SPECULAR_HEX)[0],
            _pad: 0.0,
        };
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        // Markers always fit; objects past the buffer limit are not drawn
        let object_slots = self.instances.max_slots.saturating_sub(state.lights.len());
        let pool_len = state.pool.len();
        if pool_len > object_slots && !self.warned_over_limit {
            log::warn!(
                "[scene] {} objects exceed the {} instance slots this device allows, drawing the first {}",
                pool_len,
                self.instances.max_slots,
                object_slots
            );
            self.warned_over_limit = true;
        } else if pool_len <= object_slots {
            self.warned_over_limit = false;
        }

        self.scratch.clear();
        for kind in GeometryKind::ALL {
            let start = self.scratch.len() as u32;
            let room = object_slots.saturating_sub(self.scratch.len());
            self.scratch.extend(state.pool.iter().filter(|o| o.kind == kind).take(room).map(|o| {
                let c = o.color;
                InstanceRaw {
                    model: o.model_matrix().to_cols_array_2d(),
                    color: [c[0], c[1], c[2], 1.0],
                }
            }));
            self.batches[kind.index()] = start..self.scratch.len() as u32;
        }
        let start = self.scratch.len() as u32;
        self.scratch.extend(state.lights.iter().map(|l| {
            let m = Mat4::from_scale_rotation_translation(
                glam::Vec3::splat(l.marker_radius / crate::core::geometry::SPHERE_RADIUS),
                glam::Quat::IDENTITY,
                l.position,
            );
            InstanceRaw {
                model: m.to_cols_array_2d(),
                color: [l.color[0], l.color[1], l.color[2], 0.0],
            }
        }));
        self.markers = start..self.scratch.len() as u32;

        self.instances.fit(device, self.scratch.len());
        queue.write_buffer(&self.instances.buffer, 0, bytemuck::cast_slice(&self.scratch));
    }

    /// Record the scene draws into `rpass`, accounting each one in `info`.
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, wireframe: bool, info: &mut RenderInfo) {
        rpass.set_bind_group(0, &self.globals_bind_group, &[]);

        let (pipeline, primitive) = if wireframe {
            (&self.wire_pipeline, Primitive::Lines)
        } else {
            (&self.solid_pipeline, Primitive::Triangles)
        };
        rpass.set_pipeline(pipeline);
        for kind in GeometryKind::ALL {
            let range = self.batches[kind.index()].clone();
            let mesh = &self.meshes[kind.index()];
            let (index_buffer, index_count) = if wireframe {
                (&mesh.wire_index_buffer, mesh.wire_index_count)
            } else {
                (&mesh.index_buffer, mesh.index_count)
            };
            self.draw_batch(rpass, mesh, index_buffer, index_count, range, primitive, info);
        }

        // Markers are always solid spheres
        rpass.set_pipeline(&self.solid_pipeline);
        let sphere = &self.meshes[GeometryKind::Sphere.index()];
        self.draw_batch(
            rpass,
            sphere,
            &sphere.index_buffer,
            sphere.index_count,
            self.markers.clone(),
            Primitive::Triangles,
            info,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_batch(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        mesh: &MeshBuffers,
        index_buffer: &wgpu::Buffer,
        index_count: u32,
        instances: Range<u32>,
        primitive: Primitive,
        info: &mut RenderInfo,
    ) {
        let n = instances.end - instances.start;
        if n == 0 {
            return;
        }
        let from = instances.start as u64 * InstanceRaw::STRIDE;
        let to = instances.end as u64 * InstanceRaw::STRIDE;
        rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        rpass.set_vertex_buffer(1, self.instances.buffer.slice(from..to));
        rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..index_count, 0, 0..n);
        info.record(primitive, index_count, n);
    }
}
