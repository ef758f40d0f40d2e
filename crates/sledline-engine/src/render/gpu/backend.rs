use std::collections::{HashMap, HashSet};

use wgpu::util::DeviceExt;

use crate::batch::{TextureHandle, VertexBatch};
use crate::render::{BlendMode, Capability, Primitive, RenderBackend};

use super::common::{
    blend_state, topology, viewport_ubo_min_binding_size, GpuVertex, ViewportUniform,
};
use super::GpuFrame;

/// Pipeline variant: blend equation (or none) x primitive topology.
type PipelineKey = (Option<BlendMode>, Primitive);

/// A contiguous run of uploaded vertices drawn with one pipeline + texture.
#[derive(Debug, Copy, Clone)]
struct DrawSpan {
    first: u32,
    count: u32,
    key: PipelineKey,
    texture: TextureHandle,
}

/// wgpu backend.
///
/// `draw` calls are recorded on the CPU together with the state they were issued
/// under; [`flush`](Self::flush) uploads everything into one vertex buffer and
/// replays the spans in order inside a single `LoadOp::Load` render pass.
///
/// Textures are registered with [`insert_texture`](Self::insert_texture).
/// Untextured draws, and draws referencing an unknown handle, sample a 1x1
/// white texture, so vertex color passes through unchanged.
#[derive(Default)]
pub struct WgpuBackend {
    // recorded state
    blend_enabled: bool,
    texture_enabled: bool,
    blend_mode: BlendMode,
    vertices: Vec<GpuVertex>,
    spans: Vec<DrawSpan>,

    // GPU resources (lazily created)
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    pipeline_layout: Option<wgpu::PipelineLayout>,
    shader: Option<wgpu::ShaderModule>,

    viewport_bgl: Option<wgpu::BindGroupLayout>,
    texture_bgl: Option<wgpu::BindGroupLayout>,
    viewport_ubo: Option<wgpu::Buffer>,
    viewport_bind_group: Option<wgpu::BindGroup>,

    sampler: Option<wgpu::Sampler>,
    white_bind_group: Option<wgpu::BindGroup>,
    textures: HashMap<TextureHandle, wgpu::BindGroup>,
    warned_missing: HashSet<TextureHandle>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

impl WgpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded draws waiting for [`flush`](Self::flush).
    pub fn pending_draws(&self) -> usize {
        self.spans.len()
    }

    /// Associates `handle` with a texture view. Replaces any previous binding.
    pub fn insert_texture(
        &mut self,
        device: &wgpu::Device,
        handle: TextureHandle,
        view: &wgpu::TextureView,
    ) {
        if handle.is_none() {
            log::debug!("ignoring texture registration for the untextured handle");
            return;
        }
        self.ensure_layouts(device);
        self.ensure_sampler(device);
        let (Some(bgl), Some(sampler)) = (self.texture_bgl.as_ref(), self.sampler.as_ref()) else {
            return;
        };
        let bind_group = texture_bind_group(device, bgl, view, sampler, "sledline batch texture");
        self.textures.insert(handle, bind_group);
        self.warned_missing.remove(&handle);
    }

    /// Uploads recorded draws and encodes them into `frame`. Clears the recording.
    pub fn flush(&mut self, frame: &mut GpuFrame<'_>) {
        if self.spans.is_empty() {
            self.vertices.clear();
            return;
        }

        let device = frame.device;
        self.ensure_layouts(device);
        self.ensure_sampler(device);
        self.ensure_white_texture(device, frame.queue);
        self.ensure_bindings(device);
        let keys: HashSet<PipelineKey> = self.spans.iter().map(|s| s.key).collect();
        for key in keys {
            self.ensure_pipeline(device, frame.format, key);
        }
        self.ensure_vertex_capacity(device, self.vertices.len());
        self.write_viewport_uniform(frame);

        if let Some(vbo) = self.vbo.as_ref() {
            frame.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.vertices));
        }

        self.encode(frame);

        self.spans.clear();
        self.vertices.clear();
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn encode(&mut self, frame: &mut GpuFrame<'_>) {
        let Some(vbo) = self.vbo.as_ref() else { return };
        let Some(viewport_bg) = self.viewport_bind_group.as_ref() else { return };
        let Some(white_bg) = self.white_bind_group.as_ref() else { return };

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sledline batch pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, viewport_bg, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        for span in &self.spans {
            let Some(pipeline) = self.pipelines.get(&span.key) else { continue };
            let texture_bg = if span.texture.is_none() {
                white_bg
            } else {
                match self.textures.get(&span.texture) {
                    Some(bg) => bg,
                    None => {
                        if self.warned_missing.insert(span.texture) {
                            log::debug!("texture {:?} was never registered; drawing untextured", span.texture);
                        }
                        white_bg
                    }
                }
            };
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(1, texture_bg, &[]);
            rpass.draw(span.first..span.first + span.count, 0..1);
        }
    }

    fn ensure_layouts(&mut self, device: &wgpu::Device) {
        if self.viewport_bgl.is_some() && self.texture_bgl.is_some() {
            return;
        }

        let viewport_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sledline viewport bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(viewport_ubo_min_binding_size()),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sledline texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        self.viewport_bgl = Some(viewport_bgl);
        self.texture_bgl = Some(texture_bgl);
    }

    fn ensure_pipeline(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        key: PipelineKey,
    ) {
        if self.pipeline_format != Some(format) {
            // Target format changed: every cached pipeline is stale.
            self.pipelines.clear();
            self.pipeline_format = Some(format);
        }
        if self.pipelines.contains_key(&key) {
            return;
        }
        let (Some(viewport_bgl), Some(texture_bgl)) =
            (self.viewport_bgl.as_ref(), self.texture_bgl.as_ref())
        else {
            return;
        };

        let shader: &wgpu::ShaderModule = self.shader.get_or_insert_with(|| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("sledline batch shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/batch.wgsl").into()),
            })
        });

        let layout: &wgpu::PipelineLayout = self.pipeline_layout.get_or_insert_with(|| {
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("sledline batch pipeline layout"),
                bind_group_layouts: &[viewport_bgl, texture_bgl],
                immediate_size: 0,
            })
        });

        let (blend, primitive) = key;
        log::debug!("creating batch pipeline: blend={blend:?} primitive={primitive:?}");

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sledline batch pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[GpuVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: blend_state(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: topology(primitive),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipelines.insert(key, pipeline);
    }

    fn ensure_sampler(&mut self, device: &wgpu::Device) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sledline batch sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_white_texture(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        if self.white_bind_group.is_some() {
            return;
        }
        let (Some(bgl), Some(sampler)) = (self.texture_bgl.as_ref(), self.sampler.as_ref()) else {
            return;
        };

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("sledline white texture"),
                size: wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &[255, 255, 255, 255],
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.white_bind_group =
            Some(texture_bind_group(device, bgl, &view, sampler, "sledline white texture bind group"));
    }

    fn ensure_bindings(&mut self, device: &wgpu::Device) {
        if self.viewport_bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.viewport_bgl.as_ref() else { return };

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sledline viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sledline viewport bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.viewport_bind_group = Some(bind_group);
    }

    fn write_viewport_uniform(&mut self, frame: &GpuFrame<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let viewport = frame.viewport();
        frame.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [viewport.width, viewport.height],
                _pad: [0.0; 2],
            }),
        );
    }

    fn ensure_vertex_capacity(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(1024);
        log::debug!("growing batch vertex buffer to {new_cap} vertices");
        self.vbo = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sledline batch vbo"),
            size: (new_cap * std::mem::size_of::<GpuVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}

impl RenderBackend for WgpuBackend {
    fn enable(&mut self, cap: Capability) {
        match cap {
            Capability::Blend => self.blend_enabled = true,
            Capability::Texture2D => self.texture_enabled = true,
        }
    }

    fn disable(&mut self, cap: Capability) {
        match cap {
            Capability::Blend => self.blend_enabled = false,
            Capability::Texture2D => self.texture_enabled = false,
        }
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    fn draw(&mut self, batch: &VertexBatch, primitive: Primitive) {
        if batch.is_empty() {
            return;
        }
        let blend = self.blend_enabled.then_some(self.blend_mode);
        let texture = if self.texture_enabled { batch.texture() } else { TextureHandle::NONE };

        let first = self.vertices.len() as u32;
        self.vertices
            .extend(batch.vertices().iter().map(|v| GpuVertex::from_vertex(v, blend)));

        log::trace!("wgpu draw: {primitive:?} x{} texture={texture:?}", batch.len());
        self.spans.push(DrawSpan {
            first,
            count: batch.len() as u32,
            key: (blend, primitive),
            texture,
        });
    }
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn triangle() -> VertexBatch {
        let mut batch = VertexBatch::new();
        batch.set_texture(TextureHandle::new(3));
        batch.push_triangle(Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Color::WHITE);
        batch
    }

    #[test]
    fn draws_record_state_without_a_device() {
        let mut backend = WgpuBackend::new();
        let batch = triangle();

        backend.draw(&batch, Primitive::Triangles);
        backend.enable(Capability::Blend);
        backend.enable(Capability::Texture2D);
        backend.set_blend(BlendMode::Premultiplied);
        backend.draw(&batch, Primitive::Triangles);

        assert_eq!(backend.pending_draws(), 2);
        assert_eq!(backend.spans[0].key, (None, Primitive::Triangles));
        assert_eq!(backend.spans[0].texture, TextureHandle::NONE);
        assert_eq!(backend.spans[1].key, (Some(BlendMode::Premultiplied), Primitive::Triangles));
        assert_eq!(backend.spans[1].texture, TextureHandle::new(3));
        assert_eq!(backend.spans[1].first, 3);
    }

    #[test]
    fn empty_batches_are_skipped() {
        let mut backend = WgpuBackend::new();
        backend.draw(&VertexBatch::new(), Primitive::Lines);
        assert_eq!(backend.pending_draws(), 0);
    }
}
