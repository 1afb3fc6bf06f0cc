//! Display textures for rendered frames.
//!
//! A frame travels renderer attachment → [`ColorAttachmentReader`] → CPU
//! staging buffer → persistent display texture owned by a [`TextureHost`].
//! [`FrameReadback`] owns the reader and the per-viewport capture state and
//! returns a [`DisplayImage`] the UI can blit.

mod capture;
/// Recording texture host for headless use and tests.
pub mod memory;
/// Texture host backed by wgpu textures.
pub mod wgpu_host;

use glam::Vec2;

pub use capture::TextureCapture;
pub use memory::MemoryTextureHost;
pub use wgpu_host::WgpuTextureHost;

use crate::gpu::{ColorAttachmentReader, DisplayFormat, ReadbackError};
use crate::renderer::ColorAttachment;

/// Host-side handle of a display texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Platform id the UI layer draws a texture by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareHandle(pub u64);

/// Texture upload API of the hosting application.
pub trait TextureHost {
    /// Create a texture initialized with tightly packed `pixels`.
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: DisplayFormat,
        pixels: &[u8],
    ) -> TextureHandle;

    /// Overwrite a texture's pixels. The size and format are unchanged.
    fn update_texture(&mut self, handle: TextureHandle, pixels: &[u8]);

    /// Release a texture.
    fn remove_texture(&mut self, handle: TextureHandle);

    /// Id the UI draws the texture by.
    fn hardware_handle(&self, handle: TextureHandle) -> HardwareHandle;
}

/// A display texture ready to be drawn over the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayImage {
    /// Texture to draw.
    pub handle: HardwareHandle,
    /// Size in pixels.
    pub size: Vec2,
    /// UV at the top-left corner.
    pub uv_min: Vec2,
    /// UV at the bottom-right corner.
    pub uv_max: Vec2,
}

impl DisplayImage {
    /// Full-texture image with the rows flipped vertically.
    #[must_use]
    pub fn flipped(handle: HardwareHandle, width: u32, height: u32) -> Self {
        Self {
            handle,
            size: Vec2::new(width as f32, height as f32),
            uv_min: Vec2::new(0.0, 1.0),
            uv_max: Vec2::new(1.0, 0.0),
        }
    }
}

/// Reader plus capture state of one viewport.
pub struct FrameReadback {
    reader: Box<dyn ColorAttachmentReader>,
    capture: TextureCapture,
}

impl FrameReadback {
    /// Readback through the given reader, with no texture yet.
    #[must_use]
    pub fn new(reader: Box<dyn ColorAttachmentReader>) -> Self {
        Self {
            reader,
            capture: TextureCapture::default(),
        }
    }

    /// Capture state, for inspection.
    #[must_use]
    pub fn capture(&self) -> &TextureCapture {
        &self.capture
    }

    /// Copy the frame into the display texture.
    ///
    /// # Errors
    ///
    /// Returns [`ReadbackError`] if the attachment cannot be read. The
    /// previous display texture is left untouched.
    pub fn capture_frame(
        &mut self,
        attachment: &ColorAttachment<'_>,
        width: u32,
        height: u32,
        host: &mut dyn TextureHost,
    ) -> Result<DisplayImage, ReadbackError> {
        self.capture
            .capture(self.reader.as_mut(), attachment, width, height, host)
    }

    /// Release the display texture, if any.
    pub fn release(&mut self, host: &mut dyn TextureHost) {
        self.capture.release(host);
    }
}
