use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;
use crate::paint::Color;
use crate::render::{Surface, TextureId};

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Instance data layout (32 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  color    [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    color: [f32; 4],
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn new(dst: Rect, color: Color) -> Self {
        Self {
            dst_min: [dst.x, dst.y],
            dst_max: [dst.right(), dst.bottom()],
            color: color.to_f32_array(),
        }
    }
}

struct GpuTexture {
    // Kept alive for the bind group.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

/// Consecutive instances sharing one texture and one clip.
struct Batch {
    texture: TextureId,
    clip: Option<Rect>,
    instances: Range<u32>,
}

// ── surface ───────────────────────────────────────────────────────────────

/// wgpu-backed [`Surface`].
///
/// Draw calls are recorded as instanced quads between [`begin_frame`] and
/// [`flush`]; fills sample a 1×1 white texture so every primitive goes
/// through a single pipeline. Consecutive quads with the same texture and
/// clip share one draw call, which keeps call order intact.
///
/// Geometry is in logical pixels; clips become scissor rects in physical
/// pixels using the frame's scale factor.
///
/// [`begin_frame`]: GpuSurface::begin_frame
/// [`flush`]: GpuSurface::flush
pub struct GpuSurface {
    device: wgpu::Device,
    queue: wgpu::Queue,

    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    viewport_ubo: wgpu::Buffer,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    textures: HashMap<TextureId, GpuTexture>,
    next_texture: u64,
    white: TextureId,

    viewport: (f32, f32),
    scale_factor: f32,
    clip: Option<Rect>,
    instances: Vec<QuadInstance>,
    batches: Vec<Batch>,
}

impl GpuSurface {
    /// Builds the pipeline for `format` targets.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiai quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kiai quad bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ViewportUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kiai quad pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kiai quad pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), QuadInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
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

        // Binary coverage: no filtering between texels.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("kiai quad sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kiai viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("kiai quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("kiai quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let mut surface = Self {
            device: device.clone(),
            queue: queue.clone(),
            pipeline,
            bind_group_layout,
            sampler,
            viewport_ubo,
            quad_vbo,
            quad_ibo,
            instance_vbo: None,
            instance_capacity: 0,
            textures: HashMap::new(),
            next_texture: 0,
            white: TextureId::from_raw(0),
            viewport: (1.0, 1.0),
            scale_factor: 1.0,
            clip: None,
            instances: Vec::new(),
            batches: Vec::new(),
        };
        surface.white = surface.upload(1, 1, &Color::WHITE.to_array());
        surface
    }

    /// Starts recording a frame for a `width` × `height` logical viewport.
    ///
    /// Drops anything recorded but not flushed and resets the clip.
    pub fn begin_frame(&mut self, width: f32, height: f32, scale_factor: f32) {
        self.viewport = (width.max(1.0), height.max(1.0));
        self.scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        self.clip = None;
        self.instances.clear();
        self.batches.clear();
    }

    /// Encodes everything recorded since [`begin_frame`](Self::begin_frame)
    /// as one render pass that loads and stores `view`.
    pub fn flush(&mut self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        if self.instances.is_empty() {
            return;
        }

        let (vw, vh) = self.viewport;
        self.queue.write_buffer(
            &self.viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform { viewport: [vw, vh], _pad: [0.0; 2] }),
        );
        self.ensure_instance_capacity(self.instances.len());
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        self.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("kiai quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
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

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for batch in &self.batches {
            // Destroyed after recording; nothing left to sample.
            let Some(texture) = self.textures.get(&batch.texture) else { continue };
            let Some((sx, sy, sw, sh)) =
                logical_clip_to_scissor(batch.clip, self.viewport, self.scale_factor)
            else {
                continue;
            };
            rpass.set_bind_group(0, &texture.bind_group, &[]);
            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.draw_indexed(0..6, 0, batch.instances.clone());
        }
        drop(rpass);

        self.instances.clear();
        self.batches.clear();
    }

    fn push_quad(&mut self, texture: TextureId, dst: Rect, color: Color) {
        if !(dst.width > 0.0 && dst.height > 0.0) {
            return;
        }
        let index = self.instances.len() as u32;
        self.instances.push(QuadInstance::new(dst, color));

        match self.batches.last_mut() {
            Some(last) if last.texture == texture && last.clip == self.clip => {
                last.instances.end = index + 1;
            }
            _ => self.batches.push(Batch { texture, clip: self.clip, instances: index..index + 1 }),
        }
    }

    fn upload(&mut self, width: u32, height: u32, rgba: &[u8]) -> TextureId {
        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kiai texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kiai texture bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: self.viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.next_texture += 1;
        let id = TextureId::from_raw(self.next_texture);
        self.textures.insert(id, GpuTexture { _texture: texture, bind_group, width, height });
        id
    }

    fn ensure_instance_capacity(&mut self, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kiai quad instance vbo"),
            size: (new_cap * std::mem::size_of::<QuadInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

impl Surface for GpuSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push_quad(self.white, rect, color);
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Option<TextureId> {
        let max = self.device.limits().max_texture_dimension_2d;
        let len = width as usize * height as usize * 4;
        if width == 0 || height == 0 || width > max || height > max || rgba.len() < len {
            log::debug!("GpuSurface: rejected {width}x{height} texture ({} bytes)", rgba.len());
            return None;
        }
        Some(self.upload(width, height, &rgba[..len]))
    }

    fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&texture).map(|t| (t.width, t.height))
    }

    fn blit(&mut self, texture: TextureId, dst: Rect) {
        if texture == self.white || !self.textures.contains_key(&texture) {
            return;
        }
        self.push_quad(texture, dst, Color::WHITE);
    }

    fn set_clip(&mut self, rect: Rect) {
        self.clip = Some(rect);
    }

    fn clear_clip(&mut self) {
        self.clip = None;
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        if texture == self.white {
            return;
        }
        self.textures.remove(&texture);
    }
}

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a logical-pixel clip rect to physical scissor rect arguments.
///
/// `None` clip means the full viewport. Returns `None` for zero-area
/// results so the draw is skipped.
fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: (f32, f32),
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.0 * scale).max(1.0) as u32;
    let phys_vh = (viewport.1 * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_vw, phys_vh),
        Some(r) => {
            // Same pixel-center rule as the CPU surface: a pixel is inside
            // when its center is.
            let edge = |v: f32, max: u32| ((v * scale - 0.5).ceil().max(0.0) as u32).min(max);
            let (x, y) = (edge(r.x, phys_vw), edge(r.y, phys_vh));
            let (x2, y2) = (edge(r.right(), phys_vw), edge(r.bottom(), phys_vh));
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}
