//! Where glyph bitmaps live once rasterized.

/// Opaque id of one uploaded glyph texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Single-channel texture storage, typically on the GPU.
///
/// The engine uploads each distinct bitmap exactly once and releases every
/// handle it was given when its font is replaced or it is dropped.
pub trait GlyphTextureStore {
    /// Stores a `width × height` coverage bitmap.
    fn upload(&mut self, width: u32, height: u32, coverage: &[u8]) -> TextureHandle;

    /// Frees a texture previously returned by [`Self::upload`].
    fn release(&mut self, handle: TextureHandle);
}

/// Host-memory store; keeps bitmaps in a vector.
///
/// Used for headless measurement and in tests.
#[derive(Debug, Default)]
pub struct MemoryTextureStore {
    slots: Vec<Option<(u32, u32, Vec<u8>)>>,
    uploads: usize,
}

impl MemoryTextureStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total uploads since creation.
    #[must_use]
    pub const fn uploads(&self) -> usize {
        self.uploads
    }

    /// Textures currently held.
    #[must_use]
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Size and coverage of a live texture.
    #[must_use]
    pub fn get(&self, handle: TextureHandle) -> Option<(u32, u32, &[u8])> {
        let (w, h, data) = self.slots.get(handle.0 as usize)?.as_ref()?;
        Some((*w, *h, data.as_slice()))
    }
}

impl GlyphTextureStore for MemoryTextureStore {
    fn upload(&mut self, width: u32, height: u32, coverage: &[u8]) -> TextureHandle {
        self.uploads += 1;
        #[allow(clippy::cast_possible_truncation)]
        let handle = TextureHandle(self.slots.len() as u32);
        self.slots.push(Some((width, height, coverage.to_vec())));
        handle
    }

    fn release(&mut self, handle: TextureHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0 as usize) {
            *slot = None;
        }
    }
}
