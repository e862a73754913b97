//! # Text Pass
//!
//! Draws [`GlyphQuad`]s from the text engine as alpha-blended textured
//! rectangles in full-viewport pixel coordinates. Vertices are rebuilt each
//! frame; one draw per glyph, each with that glyph's own bind group.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use spectra_text::GlyphQuad;
use tracing::debug;

use crate::context::check_scope;
use crate::glyphs::WgpuGlyphTextures;

const TEXT_SHADER: &str = r"
struct Screen {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0) var<uniform> screen: Screen;
@group(1) @binding(0) var glyph_texture: texture_2d<f32>;
@group(1) @binding(1) var glyph_sampler: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_text(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let ndc = vec2<f32>(
        in.position.x / screen.size.x * 2.0 - 1.0,
        1.0 - in.position.y / screen.size.y * 2.0,
    );
    out.clip = vec4<f32>(ndc, 0.0, 1.0);
    out.uv = in.uv;
    out.color = in.color;
    return out;
}

@fragment
fn fs_text(in: VertexOutput) -> @location(0) vec4<f32> {
    let coverage = textureSample(glyph_texture, glyph_sampler, in.uv).r;
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
";

/// Vertices per glyph quad (two triangles).
pub const VERTICES_PER_QUAD: u32 = 6;

/// Pixel-space glyph vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    /// Pixel position, origin top-left.
    pub position: [f32; 2],
    /// Texture coordinate inside the glyph bitmap.
    pub uv: [f32; 2],
    /// Straight RGBA.
    pub color: [f32; 4],
}

impl TextVertex {
    /// Vertex attributes: position, uv, color.
    pub const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x4,
    ];

    /// Vertex buffer layout descriptor.
    #[must_use]
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Two triangles covering `quad`, top-left first.
#[must_use]
pub fn quad_vertices(quad: &GlyphQuad) -> [TextVertex; 6] {
    let (left, top) = (quad.x, quad.y);
    let (right, bottom) = (quad.x + quad.width, quad.y + quad.height);
    let [r, g, b] = quad.color;
    let color = [r, g, b, 1.0];
    let vertex = |x: f32, y: f32, u: f32, v: f32| TextVertex {
        position: [x, y],
        uv: [u, v],
        color,
    };
    [
        vertex(left, top, 0.0, 0.0),
        vertex(right, top, 1.0, 0.0),
        vertex(left, bottom, 0.0, 1.0),
        vertex(right, top, 1.0, 0.0),
        vertex(right, bottom, 1.0, 1.0),
        vertex(left, bottom, 0.0, 1.0),
    ]
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ScreenUniform {
    size: [f32; 2],
    padding: [f32; 2],
}

/// Pipeline, screen uniform and per-frame vertex buffer for glyph quads.
pub struct TextPass {
    device: Arc<wgpu::Device>,
    pipeline: wgpu::RenderPipeline,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    glyph_layout: Arc<wgpu::BindGroupLayout>,
    sampler: Arc<wgpu::Sampler>,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    vertices: Vec<TextVertex>,
}

impl std::fmt::Debug for TextPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPass")
            .field("vertex_capacity", &self.vertex_capacity)
            .field("queued_vertices", &self.vertices.len())
            .finish_non_exhaustive()
    }
}

impl TextPass {
    const INITIAL_QUADS: usize = 256;

    /// Builds the glyph pipeline for `format`.
    pub async fn new(device: Arc<wgpu::Device>, format: wgpu::TextureFormat) -> Self {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Text Shader"),
            source: wgpu::ShaderSource::Wgsl(TEXT_SHADER.into()),
        });

        let screen_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Screen Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let glyph_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Glyph Layout"),
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Text Pipeline Layout"),
            bind_group_layouts: &[&screen_layout, &glyph_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Text Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_text",
                buffers: &[TextVertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_text",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let screen_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Screen"),
            size: std::mem::size_of::<ScreenUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Screen Bind Group"),
            layout: &screen_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Glyph Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let vertex_capacity = Self::INITIAL_QUADS * VERTICES_PER_QUAD as usize;
        let vertex_buffer = create_vertex_buffer(&device, vertex_capacity);

        if check_scope("Text", device.pop_error_scope().await) {
            debug!(?format, "Text pipeline ready");
        }

        Self {
            device,
            pipeline,
            screen_buffer,
            screen_bind_group,
            glyph_layout: Arc::new(glyph_layout),
            sampler: Arc::new(sampler),
            vertex_buffer,
            vertex_capacity,
            vertices: Vec::with_capacity(vertex_capacity),
        }
    }

    /// Layout every glyph bind group must follow.
    #[must_use]
    pub fn glyph_layout(&self) -> &Arc<wgpu::BindGroupLayout> {
        &self.glyph_layout
    }

    /// Sampler shared by all glyph textures.
    #[must_use]
    pub fn sampler(&self) -> &Arc<wgpu::Sampler> {
        &self.sampler
    }

    /// Uploads the screen size and the vertices for `quads`.
    pub fn prepare(&mut self, queue: &wgpu::Queue, surface: (u32, u32), quads: &[GlyphQuad]) {
        #[allow(clippy::cast_precision_loss)]
        let screen = ScreenUniform {
            size: [surface.0.max(1) as f32, surface.1.max(1) as f32],
            padding: [0.0; 2],
        };
        queue.write_buffer(&self.screen_buffer, 0, bytemuck::bytes_of(&screen));

        self.vertices.clear();
        self.vertices.extend(quads.iter().flat_map(quad_vertices));
        if self.vertices.is_empty() {
            return;
        }
        if self.vertices.len() > self.vertex_capacity {
            self.vertex_capacity = self.vertices.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
            debug!(capacity = self.vertex_capacity, "Text vertex buffer grown");
        }
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
    }

    /// Draws the quads passed to the last [`Self::prepare`], in order.
    ///
    /// Quads whose texture is no longer live are skipped.
    pub fn draw<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        glyphs: &'a WgpuGlyphTextures,
        quads: &[GlyphQuad],
    ) {
        if self.vertices.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.screen_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        for (quad, first) in quads.iter().zip((0..).step_by(VERTICES_PER_QUAD as usize)) {
            let Some(bind_group) = glyphs.bind_group(quad.texture) else {
                continue;
            };
            pass.set_bind_group(1, bind_group, &[]);
            pass.draw(first..first + VERTICES_PER_QUAD, 0..1);
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertices: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Text Vertices"),
        size: (vertices * std::mem::size_of::<TextVertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectra_text::TextureHandle;

    fn quad() -> GlyphQuad {
        GlyphQuad {
            texture: TextureHandle(3),
            x: 10.0,
            y: 20.0,
            width: 8.0,
            height: 12.0,
            color: [0.3, 0.95, 0.5],
        }
    }

    #[test]
    fn test_vertex_stride() {
        assert_eq!(std::mem::size_of::<TextVertex>(), 32);
        assert_eq!(TextVertex::desc().array_stride, 32);
    }

    #[test]
    fn test_quad_covers_glyph_box() {
        let vertices = quad_vertices(&quad());
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().copied().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().copied().fold(f32::MIN, f32::max), 18.0);
        assert_eq!(ys.iter().copied().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().copied().fold(f32::MIN, f32::max), 32.0);
    }

    #[test]
    fn test_quad_uv_follows_corners() {
        let vertices = quad_vertices(&quad());
        assert_eq!(vertices[0].position, [10.0, 20.0]);
        assert_eq!(vertices[0].uv, [0.0, 0.0]);
        assert_eq!(vertices[4].position, [18.0, 32.0]);
        assert_eq!(vertices[4].uv, [1.0, 1.0]);
        for v in vertices {
            assert_eq!(v.color, [0.3, 0.95, 0.5, 1.0]);
        }
    }

    #[test]
    fn test_shader_entry_points() {
        assert!(TEXT_SHADER.contains("fn vs_text"));
        assert!(TEXT_SHADER.contains("fn fs_text"));
    }

    #[test]
    fn test_shader_validates() {
        let module = naga::front::wgsl::parse_str(TEXT_SHADER)
            .unwrap_or_else(|err| panic!("{}", err.emit_to_string(TEXT_SHADER)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .unwrap_or_else(|err| panic!("{err:?}"));
    }
}
