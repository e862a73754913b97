//! # Frame Renderer
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        ONE RENDER PASS                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  full-screen pattern (opaque)                                 │
//! │      ↓                                                        │
//! │  panel backgrounds, one sub-viewport each (alpha 0.7)         │
//! │      ↓                                                        │
//! │  full viewport restored → glyph quads (alpha by coverage)     │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use spectra_text::GlyphQuad;
use spectra_ui::{Rect, SystemInfo};
use tracing::{debug, warn};

use crate::context::GpuContext;
use crate::error::{RenderError, RenderResult};
use crate::glyphs::WgpuGlyphTextures;
use crate::pattern_pass::{panel_viewport, PatternParams, PatternPass};
use crate::text_pass::TextPass;

/// What one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct FrameContent<'a> {
    /// Active pattern uniforms.
    pub pattern: PatternParams,
    /// Overlay panel boxes in surface pixels.
    pub panels: &'a [Rect],
    /// Glyphs queued by the text engine this frame.
    pub quads: &'a [GlyphQuad],
}

/// Outcome of [`Renderer::render_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame reached the surface.
    Presented,
    /// No surface texture this time; the surface was reconfigured or timed out.
    Skipped,
}

/// GPU context plus both passes.
#[derive(Debug)]
pub struct Renderer {
    context: GpuContext,
    patterns: PatternPass,
    text: TextPass,
}

impl Renderer {
    /// Opens the device for `target` and builds every pipeline.
    ///
    /// # Errors
    ///
    /// See [`GpuContext::new`]. Shader problems are logged, not returned.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        vsync: bool,
    ) -> RenderResult<Self> {
        let context = GpuContext::new(target, size, vsync).await?;
        let format = context.format();
        let patterns = PatternPass::new(context.device(), format).await;
        let text = TextPass::new(context.device().clone(), format).await;
        Ok(Self {
            context,
            patterns,
            text,
        })
    }

    /// The underlying device and surface.
    #[must_use]
    pub const fn context(&self) -> &GpuContext {
        &self.context
    }

    /// Surface size in pixels.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    /// Follows a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    /// Applies a vsync toggle to the surface.
    pub fn set_vsync(&mut self, enabled: bool) {
        self.context.set_vsync(enabled);
    }

    /// Adapter facts for the status panel.
    #[must_use]
    pub fn system_info(&self, refresh_hz: Option<u32>) -> SystemInfo {
        self.context.system_info(refresh_hz)
    }

    /// Fresh texture store whose bind groups fit the text pipeline.
    #[must_use]
    pub fn glyph_store(&self) -> WgpuGlyphTextures {
        WgpuGlyphTextures::new(
            self.context.device().clone(),
            self.context.queue().clone(),
            self.text.glyph_layout().clone(),
            self.text.sampler().clone(),
        )
    }

    /// Records, submits and presents one frame.
    ///
    /// # Errors
    ///
    /// Only [`RenderError::OutOfMemory`]; lost or outdated surfaces are
    /// reconfigured and the frame is skipped.
    pub fn render_frame(
        &mut self,
        content: &FrameContent<'_>,
        glyphs: &WgpuGlyphTextures,
    ) -> RenderResult<FrameStatus> {
        let output = match self.context.acquire() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost or outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(FrameStatus::Skipped);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(err) => {
                warn!(%err, "Surface texture unavailable");
                return Ok(FrameStatus::Skipped);
            }
        };

        let size = self.context.size();
        let queue = self.context.queue();
        self.patterns
            .write(queue, &content.pattern, &PatternParams::background(size));
        self.text.prepare(queue, size, content.quads);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            self.patterns.draw(&mut pass);

            let mut narrowed = false;
            for bounds in content.panels {
                if let Some(viewport) = panel_viewport(bounds, size) {
                    self.patterns.draw_panel(&mut pass, &viewport);
                    narrowed = true;
                }
            }
            if narrowed {
                #[allow(clippy::cast_precision_loss)]
                pass.set_viewport(0.0, 0.0, size.0 as f32, size.1 as f32, 0.0, 1.0);
            }

            self.text.draw(&mut pass, glyphs, content.quads);
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(FrameStatus::Presented)
    }
}
