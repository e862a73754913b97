//! # Pattern Pass
//!
//! One oversized triangle per draw; the catalog runs in the fragment
//! shader. The same shader also paints overlay panel backgrounds: a second
//! uniform block carries the `-1` sentinel index and the draw is restricted
//! to the panel's sub-viewport with alpha blending on.

use bytemuck::{Pod, Zeroable};
use spectra_core::Category;
use spectra_patterns::{OVERLAY_SENTINEL, PATTERN_SHADER};
use spectra_ui::Rect;
use tracing::debug;

use crate::context::check_scope;

/// Per-frame uniform block, laid out exactly as `PatternParams` in WGSL.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PatternParams {
    /// Surface size in pixels.
    pub resolution: [f32; 2],
    /// Pattern clock, seconds.
    pub time: f32,
    /// [`Category::id`].
    pub category: i32,
    /// Index inside the category, or the overlay sentinel.
    pub index: i32,
    /// Copy of `index` for DYNAMIC, else `0`.
    pub variant: i32,
    /// Keeps the block a multiple of its 8-byte alignment.
    pub padding: [i32; 2],
}

impl PatternParams {
    /// Parameters for pattern `index` of `category`.
    #[must_use]
    pub fn new(resolution: (u32, u32), time: f64, category: Category, index: usize) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let index = index as i32;
        #[allow(clippy::cast_possible_wrap)]
        let category_id = category.id() as i32;
        #[allow(clippy::cast_possible_truncation)]
        let time = time as f32;
        Self {
            resolution: surface_extent(resolution),
            time,
            category: category_id,
            index,
            variant: if category == Category::Dynamic { index } else { 0 },
            padding: [0; 2],
        }
    }

    /// Parameters that make the shader emit the overlay background.
    #[must_use]
    pub fn background(resolution: (u32, u32)) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let sentinel = OVERLAY_SENTINEL as i32;
        Self {
            resolution: surface_extent(resolution),
            time: 0.0,
            category: 0,
            index: sentinel,
            variant: 0,
            padding: [0; 2],
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn surface_extent((width, height): (u32, u32)) -> [f32; 2] {
    [width as f32, height as f32]
}

/// Panel bounds clipped to the surface; `None` when nothing is visible.
#[must_use]
pub fn panel_viewport(bounds: &Rect, surface: (u32, u32)) -> Option<Rect> {
    let [width, height] = surface_extent(surface);
    bounds.clip_to_surface(width, height)
}

struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<PatternParams>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }
}

/// Pipelines and uniforms for the full-screen pattern and panel backgrounds.
pub struct PatternPass {
    opaque: wgpu::RenderPipeline,
    blended: wgpu::RenderPipeline,
    pattern: UniformSlot,
    background: UniformSlot,
}

impl std::fmt::Debug for PatternPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternPass").finish_non_exhaustive()
    }
}

impl PatternPass {
    /// Compiles the pattern shader for `format`.
    ///
    /// Validation failures are logged, not returned; the frame loop keeps
    /// running with whatever the driver makes of the invalid pipeline.
    pub async fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Pattern Shader"),
            source: wgpu::ShaderSource::Wgsl(PATTERN_SHADER.into()),
        });
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Pattern Params Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pattern Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = |label: &str, blend: wgpu::BlendState| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_fullscreen",
                    buffers: &[],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_pattern",
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        };
        let opaque = pipeline("Pattern Pipeline", wgpu::BlendState::REPLACE);
        let blended = pipeline("Panel Pipeline", wgpu::BlendState::ALPHA_BLENDING);

        let pattern = UniformSlot::new(device, &layout, "Pattern Params");
        let background = UniformSlot::new(device, &layout, "Panel Params");

        if check_scope("Pattern", device.pop_error_scope().await) {
            debug!(?format, "Pattern pipelines ready");
        }

        Self {
            opaque,
            blended,
            pattern,
            background,
        }
    }

    /// Uploads this frame's pattern and panel uniforms.
    pub fn write(&self, queue: &wgpu::Queue, pattern: &PatternParams, background: &PatternParams) {
        queue.write_buffer(&self.pattern.buffer, 0, bytemuck::bytes_of(pattern));
        queue.write_buffer(&self.background.buffer, 0, bytemuck::bytes_of(background));
    }

    /// Fills the whole target with the active pattern.
    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.opaque);
        pass.set_bind_group(0, &self.pattern.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    /// Blends the translucent background into `viewport`.
    ///
    /// `viewport` must already lie inside the target; see [`panel_viewport`].
    /// The caller restores the full viewport afterwards.
    pub fn draw_panel<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, viewport: &Rect) {
        pass.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height, 0.0, 1.0);
        pass.set_pipeline(&self.blended);
        pass.set_bind_group(0, &self.background.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<PatternParams>(), 32);
        let params = PatternParams::new((1920, 1080), 1.5, Category::Auxiliary, 4);
        let bytes = bytemuck::bytes_of(&params);
        assert_eq!(&bytes[0..4], &1920.0_f32.to_ne_bytes());
        assert_eq!(&bytes[8..12], &1.5_f32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &2_i32.to_ne_bytes());
        assert_eq!(&bytes[16..20], &4_i32.to_ne_bytes());
    }

    #[test]
    fn test_variant_only_for_dynamic() {
        let dynamic = PatternParams::new((640, 480), 0.0, Category::Dynamic, 7);
        assert_eq!(dynamic.variant, 7);
        let fixed = PatternParams::new((640, 480), 0.0, Category::Static, 7);
        assert_eq!(fixed.variant, 0);
    }

    #[test]
    fn test_background_uses_sentinel() {
        let params = PatternParams::background((800, 600));
        assert_eq!(params.index, -1);
        assert_eq!(params.resolution, [800.0, 600.0]);
    }

    #[test]
    fn test_panel_viewport_clips_to_surface() {
        let inside = Rect::new(24.0, 40.0, 300.0, 200.0);
        assert_eq!(panel_viewport(&inside, (1920, 1080)), Some(inside));

        let overhang = Rect::new(1800.0, 1000.0, 300.0, 200.0);
        assert_eq!(
            panel_viewport(&overhang, (1920, 1080)),
            Some(Rect::new(1800.0, 1000.0, 120.0, 80.0))
        );

        let outside = Rect::new(2000.0, 40.0, 100.0, 100.0);
        assert_eq!(panel_viewport(&outside, (1920, 1080)), None);
    }
}
