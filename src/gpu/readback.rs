//! GPU → CPU color attachment readback.
//!
//! A [`ColorAttachmentReader`] copies a renderer's color attachment into a
//! tightly packed host buffer. The mapped-buffer reader does a blocking
//! whole-frame texture-to-buffer copy; the host-memory reader serves
//! renderers (and backends) whose attachments already live on the CPU.
//! [`select_reader`] picks one from the detected backend at startup.

use std::fmt;
use std::sync::mpsc;

use crate::renderer::{ColorAttachment, HostPixels};

/// Errors from reading back a color attachment.
#[derive(Debug)]
pub enum ReadbackError {
    /// The attachment is a resource kind this reader cannot copy from.
    UnsupportedResource(&'static str),
    /// The attachment format has no per-texel copy size.
    UnsupportedFormat(wgpu::TextureFormat),
    /// Attachment size differs from the requested viewport size.
    SizeMismatch {
        /// Requested `(width, height)`.
        expected: (u32, u32),
        /// Attachment `(width, height)`.
        actual: (u32, u32),
    },
    /// Destination buffer is smaller than the frame.
    DestinationTooSmall {
        /// Bytes needed.
        needed: usize,
        /// Bytes available.
        available: usize,
    },
    /// Device poll failed while waiting for the copy.
    Poll(wgpu::PollError),
    /// Mapping the staging buffer failed.
    Map(wgpu::BufferAsyncError),
    /// The map callback never reported back.
    MapAbandoned,
}

impl fmt::Display for ReadbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedResource(kind) => {
                write!(f, "cannot read back {kind}")
            }
            Self::UnsupportedFormat(format) => {
                write!(f, "no texel copy size for {format:?}")
            }
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "attachment is {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::DestinationTooSmall { needed, available } => write!(
                f,
                "destination holds {available} bytes, frame needs {needed}"
            ),
            Self::Poll(e) => write!(f, "device poll failed: {e}"),
            Self::Map(e) => write!(f, "staging buffer map failed: {e}"),
            Self::MapAbandoned => write!(f, "staging buffer map was abandoned"),
        }
    }
}

impl std::error::Error for ReadbackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Poll(e) => Some(e),
            Self::Map(e) => Some(e),
            _ => None,
        }
    }
}

/// Copies a color attachment into host memory.
pub trait ColorAttachmentReader {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Copy the whole `width x height` attachment into `dst` as tightly
    /// packed rows in the attachment's own format.
    ///
    /// # Errors
    ///
    /// Returns [`ReadbackError`] if the attachment cannot be read or does
    /// not match the requested size.
    fn read(
        &mut self,
        attachment: &ColorAttachment<'_>,
        width: u32,
        height: u32,
        dst: &mut [u8],
    ) -> Result<(), ReadbackError>;
}

/// Bytes per texel of a copyable color or depth format.
pub fn texel_size(format: wgpu::TextureFormat) -> Result<u32, ReadbackError> {
    if format.block_dimensions() != (1, 1) {
        return Err(ReadbackError::UnsupportedFormat(format));
    }
    format
        .block_copy_size(None)
        .ok_or(ReadbackError::UnsupportedFormat(format))
}

fn check_size(
    actual: (u32, u32),
    width: u32,
    height: u32,
) -> Result<(), ReadbackError> {
    if actual == (width, height) {
        Ok(())
    } else {
        Err(ReadbackError::SizeMismatch {
            expected: (width, height),
            actual,
        })
    }
}

fn frame_len(
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    dst: &[u8],
) -> Result<usize, ReadbackError> {
    let needed =
        texel_size(format)? as usize * width as usize * height as usize;
    if dst.len() < needed {
        return Err(ReadbackError::DestinationTooSmall {
            needed,
            available: dst.len(),
        });
    }
    Ok(needed)
}

fn copy_host_pixels(
    host: &HostPixels<'_>,
    width: u32,
    height: u32,
    dst: &mut [u8],
) -> Result<(), ReadbackError> {
    check_size((host.width, host.height), width, height)?;
    let len = frame_len(host.format, width, height, dst)?;
    let Some(src) = host.pixels.get(..len) else {
        return Err(ReadbackError::UnsupportedResource(
            "host pixels shorter than their declared size",
        ));
    };
    dst[..len].copy_from_slice(src);
    Ok(())
}

/// Reader for attachments that are already CPU-resident.
#[derive(Debug, Default)]
pub struct HostMemoryReader;

impl ColorAttachmentReader for HostMemoryReader {
    fn name(&self) -> &'static str {
        "host memory"
    }

    fn read(
        &mut self,
        attachment: &ColorAttachment<'_>,
        width: u32,
        height: u32,
        dst: &mut [u8],
    ) -> Result<(), ReadbackError> {
        match attachment {
            ColorAttachment::HostPixels(host) => {
                copy_host_pixels(host, width, height, dst)
            }
            ColorAttachment::Texture(_) => Err(
                ReadbackError::UnsupportedResource("GPU texture without a device"),
            ),
            ColorAttachment::Unsupported(kind) => {
                Err(ReadbackError::UnsupportedResource(*kind))
            }
        }
    }
}

/// Reader that copies GPU textures through a mappable staging buffer.
///
/// The staging buffer only grows. Rows are padded to
/// [`wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`] on the GPU side and unpadded on
/// the way out.
pub struct MappedBufferReader {
    device: wgpu::Device,
    queue: wgpu::Queue,
    staging: Option<wgpu::Buffer>,
}

impl MappedBufferReader {
    /// Reader bound to a device and its queue.
    #[must_use]
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            staging: None,
        }
    }

    /// Size of the staging buffer in bytes (0 before the first read).
    #[must_use]
    pub fn staging_size(&self) -> u64 {
        self.staging.as_ref().map_or(0, wgpu::Buffer::size)
    }

    fn read_texture(
        &mut self,
        texture: &wgpu::Texture,
        width: u32,
        height: u32,
        dst: &mut [u8],
    ) -> Result<(), ReadbackError> {
        check_size((texture.width(), texture.height()), width, height)?;
        let format = texture.format();
        let len = frame_len(format, width, height, dst)?;

        let unpadded_row = texel_size(format)? * width;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row = unpadded_row.div_ceil(align) * align;
        let staging = grow_staging(
            &self.device,
            &mut self.staging,
            u64::from(padded_row) * u64::from(height),
        );

        let aspect = if format.has_depth_aspect() {
            wgpu::TextureAspect::DepthOnly
        } else {
            wgpu::TextureAspect::All
        };

        let mut encoder =
            self.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Readback Encoder"),
                });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let _ = self.queue.submit(Some(encoder.finish()));

        let slice = staging.slice(..u64::from(padded_row) * u64::from(height));
        if let Err(e) = map_blocking(&self.device, slice) {
            // A map may still be pending on the buffer; start over next frame
            self.staging = None;
            return Err(e);
        }

        {
            let data = slice.get_mapped_range();
            let rows = data.chunks_exact(padded_row as usize);
            for (dst_row, src_row) in dst[..len]
                .chunks_exact_mut(unpadded_row as usize)
                .zip(rows)
            {
                dst_row.copy_from_slice(&src_row[..unpadded_row as usize]);
            }
        }
        staging.unmap();
        Ok(())
    }
}

/// Map `slice` for reading and wait for the device to finish.
fn map_blocking(
    device: &wgpu::Device,
    slice: wgpu::BufferSlice<'_>,
) -> Result<(), ReadbackError> {
    let (sender, receiver) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });
    let _ = device
        .poll(wgpu::PollType::Wait)
        .map_err(ReadbackError::Poll)?;
    receiver
        .recv()
        .map_err(|_| ReadbackError::MapAbandoned)?
        .map_err(ReadbackError::Map)
}

/// Staging buffer of at least `size` bytes, replacing a smaller one.
fn grow_staging<'a>(
    device: &wgpu::Device,
    staging: &'a mut Option<wgpu::Buffer>,
    size: u64,
) -> &'a wgpu::Buffer {
    if staging.as_ref().is_none_or(|buffer| buffer.size() < size) {
        log::debug!("growing readback staging buffer to {size} bytes");
        *staging = None;
    }
    staging.get_or_insert_with(|| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Staging Buffer"),
            size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        })
    })
}

impl ColorAttachmentReader for MappedBufferReader {
    fn name(&self) -> &'static str {
        "mapped buffer"
    }

    fn read(
        &mut self,
        attachment: &ColorAttachment<'_>,
        width: u32,
        height: u32,
        dst: &mut [u8],
    ) -> Result<(), ReadbackError> {
        match attachment {
            ColorAttachment::Texture(texture) => {
                self.read_texture(texture, width, height, dst)
            }
            ColorAttachment::HostPixels(host) => {
                copy_host_pixels(host, width, height, dst)
            }
            ColorAttachment::Unsupported(kind) => {
                Err(ReadbackError::UnsupportedResource(*kind))
            }
        }
    }
}

/// Pick a reader for the device the host renders with.
///
/// Without a device, or on the no-op backend, nothing can be mapped and the
/// host-memory reader is used.
#[must_use]
pub fn select_reader(
    gpu: Option<(wgpu::Device, wgpu::Queue, wgpu::Backend)>,
) -> Box<dyn ColorAttachmentReader> {
    let reader: Box<dyn ColorAttachmentReader> = match gpu {
        Some((_, _, wgpu::Backend::Noop)) | None => Box::new(HostMemoryReader),
        Some((device, queue, _)) => {
            Box::new(MappedBufferReader::new(device, queue))
        }
    };
    log::debug!("using {} readback", reader.name());
    reader
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(pixels: &[u8], width: u32, height: u32) -> ColorAttachment<'_> {
        ColorAttachment::HostPixels(HostPixels {
            pixels,
            width,
            height,
            format: wgpu::TextureFormat::Rgba8Unorm,
        })
    }

    #[test]
    fn host_reader_copies_whole_frame() {
        let pixels: Vec<u8> = (0..32).collect();
        let mut dst = vec![0_u8; 40];
        HostMemoryReader
            .read(&host(&pixels, 4, 2), 4, 2, &mut dst)
            .unwrap();
        assert_eq!(&dst[..32], pixels.as_slice());
        assert_eq!(&dst[32..], &[0; 8]);
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let pixels = [0_u8; 16];
        let mut dst = vec![0_u8; 64];
        let err = HostMemoryReader
            .read(&host(&pixels, 2, 2), 4, 4, &mut dst)
            .unwrap_err();
        assert!(matches!(
            err,
            ReadbackError::SizeMismatch {
                expected: (4, 4),
                actual: (2, 2)
            }
        ));
    }

    #[test]
    fn short_destination_is_rejected() {
        let pixels = [0_u8; 16];
        let mut dst = vec![0_u8; 8];
        let err = HostMemoryReader
            .read(&host(&pixels, 2, 2), 2, 2, &mut dst)
            .unwrap_err();
        assert!(matches!(
            err,
            ReadbackError::DestinationTooSmall {
                needed: 16,
                available: 8
            }
        ));
    }

    #[test]
    fn unsupported_attachment_is_an_error() {
        let mut dst = vec![0_u8; 4];
        let err = HostMemoryReader
            .read(&ColorAttachment::Unsupported("render buffer"), 1, 1, &mut dst)
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot read back render buffer");
    }

    #[test]
    fn texel_sizes() {
        assert_eq!(texel_size(wgpu::TextureFormat::Rgba16Float).unwrap(), 8);
        assert_eq!(texel_size(wgpu::TextureFormat::Depth32Float).unwrap(), 4);
        assert!(texel_size(wgpu::TextureFormat::Bc1RgbaUnorm).is_err());
    }

    #[test]
    fn no_device_selects_host_reader() {
        assert_eq!(select_reader(None).name(), "host memory");
    }

    #[test]
    fn mapped_reader_unpads_rows_and_only_grows_staging() {
        use crate::gpu::{RenderContext, RenderTarget};
        use wgpu::TextureFormat as F;

        let Ok(context) = pollster::block_on(RenderContext::headless()) else {
            return;
        };
        let mut reader = MappedBufferReader::new(
            context.device.clone(),
            context.queue.clone(),
        );
        assert_eq!(reader.staging_size(), 0);

        let red = wgpu::Color {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        };
        let one = half::f16::ONE.to_le_bytes();
        let zero = half::f16::ZERO.to_le_bytes();
        // (width, height, format, expected texel, staging size after read)
        let cases = [
            (3, 2, F::Rgba8Unorm, vec![255, 0, 0, 255], 512),
            (1, 1, F::Rgba8Unorm, vec![255, 0, 0, 255], 512),
            (70, 3, F::Rgba16Float, [one, zero, zero, one].concat(), 2304),
            (5, 5, F::Bgra8Unorm, vec![0, 0, 255, 255], 2304),
        ];

        for (width, height, format, texel, staging) in cases {
            let target = RenderTarget::new(&context.device, width, height, format);
            target.clear(&context, red);

            let mut dst = vec![0_u8; (width * height) as usize * texel.len()];
            reader
                .read(&ColorAttachment::Texture(&target.texture), width, height, &mut dst)
                .unwrap();
            assert!(
                dst.chunks_exact(texel.len()).all(|px| px == texel.as_slice()),
                "{width}x{height} {format:?}"
            );
            assert_eq!(reader.staging_size(), staging, "{width}x{height} {format:?}");
        }
    }
}
