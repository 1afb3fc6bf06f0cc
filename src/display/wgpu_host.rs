use rustc_hash::FxHashMap;

use super::{HardwareHandle, TextureHandle, TextureHost};
use crate::gpu::DisplayFormat;

/// Texture host that uploads display textures to a wgpu device.
///
/// The hardware handle is the texture id; a UI integration resolves it with
/// [`WgpuTextureHost::texture`] when it builds its draw list.
pub struct WgpuTextureHost {
    device: wgpu::Device,
    queue: wgpu::Queue,
    textures: FxHashMap<u64, wgpu::Texture>,
    next_id: u64,
}

impl WgpuTextureHost {
    /// Host uploading through the given device and queue.
    #[must_use]
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            textures: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Texture behind a hardware handle.
    #[must_use]
    pub fn texture(&self, handle: HardwareHandle) -> Option<&wgpu::Texture> {
        self.textures.get(&handle.0)
    }

    fn upload(&self, texture: &wgpu::Texture, pixels: &[u8]) {
        let bytes_per_pixel = texture
            .format()
            .block_copy_size(None)
            .unwrap_or_default();
        let size = texture.size();
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(size.width * bytes_per_pixel),
                rows_per_image: Some(size.height),
            },
            size,
        );
    }
}

impl TextureHost for WgpuTextureHost {
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: DisplayFormat,
        pixels: &[u8],
    ) -> TextureHandle {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Viewport Display Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: format.to_wgpu(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.upload(&texture, pixels);

        self.next_id += 1;
        let _ = self.textures.insert(self.next_id, texture);
        TextureHandle(self.next_id)
    }

    fn update_texture(&mut self, handle: TextureHandle, pixels: &[u8]) {
        match self.textures.get(&handle.0) {
            Some(texture) => self.upload(texture, pixels),
            None => log::warn!("update of unknown texture {}", handle.0),
        }
    }

    fn remove_texture(&mut self, handle: TextureHandle) {
        if let Some(texture) = self.textures.remove(&handle.0) {
            texture.destroy();
        }
    }

    fn hardware_handle(&self, handle: TextureHandle) -> HardwareHandle {
        HardwareHandle(handle.0)
    }
}
