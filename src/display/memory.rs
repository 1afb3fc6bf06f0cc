use rustc_hash::FxHashMap;

use super::{HardwareHandle, TextureHandle, TextureHost};
use crate::gpu::DisplayFormat;

#[derive(Debug)]
struct StoredTexture {
    format: DisplayFormat,
    pixels: Vec<u8>,
}

/// Texture host that keeps pixels in memory and counts host calls.
#[derive(Debug, Default)]
pub struct MemoryTextureHost {
    textures: FxHashMap<u64, StoredTexture>,
    next_id: u64,
    creates: usize,
    updates: usize,
    removes: usize,
}

impl MemoryTextureHost {
    /// Number of `create_texture` calls.
    #[must_use]
    pub fn creates(&self) -> usize {
        self.creates
    }

    /// Number of `update_texture` calls.
    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Number of `remove_texture` calls.
    #[must_use]
    pub fn removes(&self) -> usize {
        self.removes
    }

    /// Textures currently alive.
    #[must_use]
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Last uploaded pixels of a texture.
    #[must_use]
    pub fn pixels(&self, handle: TextureHandle) -> Option<&[u8]> {
        self.textures.get(&handle.0).map(|t| t.pixels.as_slice())
    }

    /// Format a texture was created with.
    #[must_use]
    pub fn format(&self, handle: TextureHandle) -> Option<DisplayFormat> {
        self.textures.get(&handle.0).map(|t| t.format)
    }
}

impl TextureHost for MemoryTextureHost {
    fn create_texture(
        &mut self,
        _width: u32,
        _height: u32,
        format: DisplayFormat,
        pixels: &[u8],
    ) -> TextureHandle {
        self.creates += 1;
        self.next_id += 1;
        let _ = self.textures.insert(
            self.next_id,
            StoredTexture {
                format,
                pixels: pixels.to_vec(),
            },
        );
        TextureHandle(self.next_id)
    }

    fn update_texture(&mut self, handle: TextureHandle, pixels: &[u8]) {
        self.updates += 1;
        if let Some(texture) = self.textures.get_mut(&handle.0) {
            texture.pixels.clear();
            texture.pixels.extend_from_slice(pixels);
        } else {
            log::warn!("update of unknown texture {}", handle.0);
        }
    }

    fn remove_texture(&mut self, handle: TextureHandle) {
        self.removes += 1;
        let _ = self.textures.remove(&handle.0);
    }

    fn hardware_handle(&self, handle: TextureHandle) -> HardwareHandle {
        HardwareHandle(handle.0)
    }
}
