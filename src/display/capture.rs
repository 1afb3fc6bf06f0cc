use super::{DisplayImage, TextureHandle, TextureHost};
use crate::gpu::{
    display_format_for, ColorAttachmentReader, DisplayFormat, ReadbackError,
};
use crate::renderer::ColorAttachment;

/// Display texture and staging buffer reused across frames.
///
/// The staging buffer grows to the largest frame seen and never shrinks.
/// The texture is updated in place while size and format stay the same and
/// recreated otherwise.
#[derive(Debug, Default)]
pub struct TextureCapture {
    width: u32,
    height: u32,
    format: Option<DisplayFormat>,
    handle: Option<TextureHandle>,
    staging: Vec<u8>,
}

impl TextureCapture {
    /// Current display texture, if one exists.
    #[must_use]
    pub fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    /// Size of the current display texture.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes held by the staging buffer.
    #[must_use]
    pub fn staging_len(&self) -> usize {
        self.staging.len()
    }

    pub(crate) fn capture(
        &mut self,
        reader: &mut dyn ColorAttachmentReader,
        attachment: &ColorAttachment<'_>,
        width: u32,
        height: u32,
        host: &mut dyn TextureHost,
    ) -> Result<DisplayImage, ReadbackError> {
        let source = match attachment {
            ColorAttachment::Unsupported(kind) => {
                return Err(ReadbackError::UnsupportedResource(*kind));
            }
            other => other.format().ok_or(ReadbackError::UnsupportedResource(
                "attachment without a format",
            ))?,
        };
        let mapping = display_format_for(source)
            .ok_or(ReadbackError::UnsupportedFormat(source))?;

        let required = width as usize
            * height as usize
            * mapping.display.bytes_per_pixel();
        if self.staging.len() < required {
            self.staging.resize(required, 0);
        }
        let pixels = &mut self.staging[..required];
        reader.read(attachment, width, height, pixels)?;
        mapping.convert(pixels);

        let reusable = self.handle.filter(|_| {
            (self.width, self.height) == (width, height)
                && self.format == Some(mapping.display)
        });
        let handle = if let Some(handle) = reusable {
            host.update_texture(handle, pixels);
            handle
        } else {
            if let Some(old) = self.handle.take() {
                host.remove_texture(old);
            }
            log::debug!(
                "creating {width}x{height} {:?} display texture",
                mapping.display
            );
            let handle =
                host.create_texture(width, height, mapping.display, pixels);
            self.width = width;
            self.height = height;
            self.format = Some(mapping.display);
            self.handle = Some(handle);
            handle
        };

        Ok(DisplayImage::flipped(
            host.hardware_handle(handle),
            width,
            height,
        ))
    }

    pub(crate) fn release(&mut self, host: &mut dyn TextureHost) {
        if let Some(handle) = self.handle.take() {
            host.remove_texture(handle);
        }
        self.width = 0;
        self.height = 0;
        self.format = None;
    }
}
