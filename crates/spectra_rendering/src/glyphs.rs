//! GPU glyph textures.
//!
//! Every glyph bitmap becomes its own `R8Unorm` texture with a ready-made
//! bind group. There is no atlas; the diagnostic alphabet stays small.

use std::collections::HashMap;
use std::sync::Arc;

use spectra_text::{GlyphTextureStore, TextureHandle};
use tracing::trace;

struct GlyphTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// [`GlyphTextureStore`] backed by wgpu textures.
pub struct WgpuGlyphTextures {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    layout: Arc<wgpu::BindGroupLayout>,
    sampler: Arc<wgpu::Sampler>,
    textures: HashMap<u32, GlyphTexture>,
    next_id: u32,
}

impl std::fmt::Debug for WgpuGlyphTextures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuGlyphTextures")
            .field("live", &self.textures.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl WgpuGlyphTextures {
    /// Store whose bind groups match `layout` (texture at 0, sampler at 1).
    #[must_use]
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        layout: Arc<wgpu::BindGroupLayout>,
        sampler: Arc<wgpu::Sampler>,
    ) -> Self {
        Self {
            device,
            queue,
            layout,
            sampler,
            textures: HashMap::new(),
            next_id: 0,
        }
    }

    /// Bind group for a live handle.
    #[must_use]
    pub fn bind_group(&self, handle: TextureHandle) -> Option<&wgpu::BindGroup> {
        self.textures.get(&handle.0).map(|glyph| &glyph.bind_group)
    }

    /// Textures currently alive.
    #[must_use]
    pub fn live(&self) -> usize {
        self.textures.len()
    }
}

impl GlyphTextureStore for WgpuGlyphTextures {
    fn upload(&mut self, width: u32, height: u32, coverage: &[u8]) -> TextureHandle {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Glyph"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let expected = (size.width * size.height) as usize;
        if coverage.len() >= expected {
            self.queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &coverage[..expected],
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(size.width),
                    rows_per_image: Some(size.height),
                },
                size,
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Glyph Bind Group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let handle = TextureHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.textures.insert(
            handle.0,
            GlyphTexture {
                texture,
                bind_group,
            },
        );
        trace!(id = handle.0, width, height, "Glyph texture uploaded");
        handle
    }

    fn release(&mut self, handle: TextureHandle) {
        if let Some(glyph) = self.textures.remove(&handle.0) {
            glyph.texture.destroy();
        }
    }
}
