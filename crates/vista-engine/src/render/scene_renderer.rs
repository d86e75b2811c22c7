use std::collections::HashMap;

use crate::camera::PerspectiveCamera;
use crate::coords::Color;
use crate::device::DEPTH_FORMAT;
use crate::geometry::Topology;
use crate::material::Side;
use crate::scene::{GeometryId, Scene};

use super::draws::{collect_draws, PipelineKey};
use super::mesh::{point_layout, GpuGeometry, MeshVertex};
use super::uniforms::{draw_stride, DrawUniform, FrameUniform};
use super::{RenderCtx, RenderTarget};

/// Forward renderer for a [`Scene`].
///
/// One shader module serves every draw; pipelines are created lazily per
/// [`PipelineKey`]. Geometry is uploaded on first use and cached by id, so
/// scenes must not replace geometry behind an existing [`GeometryId`].
#[derive(Default)]
pub struct SceneRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    shader: Option<wgpu::ShaderModule>,
    pipeline_layout: Option<wgpu::PipelineLayout>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    frame_bgl: Option<wgpu::BindGroupLayout>,
    draw_bgl: Option<wgpu::BindGroupLayout>,

    frame_ubo: Option<wgpu::Buffer>,
    frame_bind_group: Option<wgpu::BindGroup>,

    draw_ubo: Option<wgpu::Buffer>,
    draw_bind_group: Option<wgpu::BindGroup>,
    draw_capacity: usize,
    draw_stride: u64,

    geometries: HashMap<(GeometryId, bool), GpuGeometry>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears to `clear` and draws every visible node of `scene`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &Scene,
        camera: &PerspectiveCamera,
        clear: Color,
    ) {
        self.ensure_layout(ctx);
        self.ensure_frame_bindings(ctx);

        let draws = collect_draws(scene, camera);

        // Mutating methods must happen before borrowing pipelines/buffers immutably.
        for item in &draws {
            self.ensure_pipeline(ctx, item.key);
            self.ensure_geometry(ctx, scene, item.geometry, item.edges);
        }
        self.ensure_draw_capacity(ctx, draws.len());
        self.write_frame_uniform(ctx, scene, camera);
        self.write_draw_uniforms(ctx, draws.iter().map(|d| &d.uniform));

        let Some(frame_bg) = self.frame_bind_group.as_ref() else { return };
        let Some(draw_bg) = self.draw_bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vista scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(clear.r),
                        g: f64::from(clear.g),
                        b: f64::from(clear.b),
                        a: f64::from(clear.a),
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, frame_bg, &[]);

        for (i, item) in draws.iter().enumerate() {
            let Some(pipeline) = self.pipelines.get(&item.key) else { continue };
            let Some(gpu) = self.geometries.get(&(item.geometry, item.edges)) else { continue };
            if gpu.count == 0 {
                continue;
            }

            let offset = (i as u64 * self.draw_stride) as u32;
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(1, draw_bg, &[offset]);
            rpass.set_vertex_buffer(0, gpu.vertices.slice(..));

            if item.key.topology == Topology::Points {
                rpass.draw(0..6, 0..gpu.count);
            } else if let Some(ibo) = gpu.indices.as_ref() {
                rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..gpu.count, 0, 0..1);
            } else {
                rpass.draw(0..gpu.count, 0..1);
            }
        }
    }

    fn ensure_layout(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline_layout.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vista scene shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let frame_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vista frame bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<FrameUniform>() as u64),
                },
                count: None,
            }],
        });

        let draw_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vista draw bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniform>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vista scene pipeline layout"),
            bind_group_layouts: &[&frame_bgl, &draw_bgl],
            immediate_size: 0,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.shader = Some(shader);
        self.pipeline_layout = Some(pipeline_layout);
        self.frame_bgl = Some(frame_bgl);
        self.draw_bgl = Some(draw_bgl);
        self.draw_stride = draw_stride(ctx.device.limits().min_uniform_buffer_offset_alignment);

        // Everything derived from the old layout goes.
        self.pipelines.clear();
        self.frame_ubo = None;
        self.frame_bind_group = None;
        self.draw_ubo = None;
        self.draw_bind_group = None;
        self.draw_capacity = 0;
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        let Some(shader) = self.shader.as_ref() else { return };
        let Some(layout) = self.pipeline_layout.as_ref() else { return };

        let points = key.topology == Topology::Points;
        let mesh_buffers = [MeshVertex::layout()];
        let point_buffers = [point_layout()];

        let (topology, strip_index_format) = match key.topology {
            Topology::Triangles | Topology::Points => (wgpu::PrimitiveTopology::TriangleList, None),
            Topology::Lines => (wgpu::PrimitiveTopology::LineList, None),
            Topology::LineStrip => (wgpu::PrimitiveTopology::LineStrip, Some(wgpu::IndexFormat::Uint32)),
        };

        let cull_mode = match key.side {
            Side::Front => Some(wgpu::Face::Back),
            Side::Back => Some(wgpu::Face::Front),
            Side::Double => None,
        };

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vista scene pipeline"),
            layout: Some(layout),

            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(if points { "vs_point" } else { "vs_main" }),
                compilation_options: Default::default(),
                buffers: if points { &point_buffers } else { &mesh_buffers },
            },

            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: key.blend.then_some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: key.depth_write,
                depth_compare: if key.depth_test {
                    wgpu::CompareFunction::LessEqual
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!("created scene pipeline for {key:?}");
        self.pipelines.insert(key, pipeline);
    }

    fn ensure_frame_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.frame_bind_group.is_some() && self.frame_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.frame_bgl.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vista frame ubo"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vista frame bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.frame_ubo = Some(ubo);
        self.frame_bind_group = Some(bind_group);
    }

    fn ensure_draw_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.draw_capacity && self.draw_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.draw_bgl.as_ref() else { return };

        let capacity = required.next_power_of_two().max(16);
        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vista draw ubo"),
            size: capacity as u64 * self.draw_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vista draw bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniform>() as u64),
                }),
            }],
        });

        self.draw_ubo = Some(ubo);
        self.draw_bind_group = Some(bind_group);
        self.draw_capacity = capacity;
    }

    fn ensure_geometry(&mut self, ctx: &RenderCtx<'_>, scene: &Scene, id: GeometryId, edges: bool) {
        if self.geometries.contains_key(&(id, edges)) {
            return;
        }
        let Some(geometry) = scene.geometry(id) else { return };
        self.geometries
            .insert((id, edges), GpuGeometry::upload(ctx.device, geometry, edges));
    }

    fn write_frame_uniform(&self, ctx: &RenderCtx<'_>, scene: &Scene, camera: &PerspectiveCamera) {
        let Some(ubo) = self.frame_ubo.as_ref() else { return };
        let u = FrameUniform::new(scene, camera, ctx.target_size, ctx.pixel_ratio);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn write_draw_uniforms<'u>(&self, ctx: &RenderCtx<'_>, uniforms: impl ExactSizeIterator<Item = &'u DrawUniform>) {
        let Some(ubo) = self.draw_ubo.as_ref() else { return };
        if uniforms.len() == 0 {
            return;
        }

        let stride = self.draw_stride as usize;
        let mut bytes = vec![0u8; uniforms.len() * stride];
        for (chunk, u) in bytes.chunks_exact_mut(stride).zip(uniforms) {
            chunk[..std::mem::size_of::<DrawUniform>()].copy_from_slice(bytemuck::bytes_of(u));
        }
        ctx.queue.write_buffer(ubo, 0, &bytes);
    }
}
