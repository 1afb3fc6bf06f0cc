//! Source-to-display pixel format mapping.
//!
//! Renderers hand back color buffers in whatever format their pipeline
//! uses. Display textures only come in four formats; this module picks one
//! per source format and converts pixels in place where the byte layouts
//! differ.

use half::f16;

/// Pixel format of a display texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayFormat {
    /// 8-bit normalized RGBA.
    Rgba8Unorm,
    /// Half-float RGBA.
    Rgba16Float,
    /// Float RGBA.
    Rgba32Float,
    /// Single float channel (depth).
    R32Float,
}

impl DisplayFormat {
    /// Bytes per pixel.
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8Unorm | Self::R32Float => 4,
            Self::Rgba16Float => 8,
            Self::Rgba32Float => 16,
        }
    }

    /// Matching wgpu texture format.
    #[must_use]
    pub fn to_wgpu(self) -> wgpu::TextureFormat {
        match self {
            Self::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            Self::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
            Self::Rgba32Float => wgpu::TextureFormat::Rgba32Float,
            Self::R32Float => wgpu::TextureFormat::R32Float,
        }
    }
}

/// In-place pixel rewrite between source and display layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Bytes are already in display layout.
    Copy,
    /// Swap the red and blue channels of 8-bit BGRA.
    SwizzleBgra,
    /// Re-encode 16-bit normalized channels as half floats.
    Unorm16ToHalf,
}

/// How a source format is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatMapping {
    /// Display texture format.
    pub display: DisplayFormat,
    /// Pixel conversion applied after readback.
    pub conversion: Conversion,
}

impl FormatMapping {
    const fn new(display: DisplayFormat, conversion: Conversion) -> Self {
        Self {
            display,
            conversion,
        }
    }

    /// Rewrite tightly packed source pixels into display layout.
    pub fn convert(&self, pixels: &mut [u8]) {
        match self.conversion {
            Conversion::Copy => {}
            Conversion::SwizzleBgra => {
                for px in pixels.chunks_exact_mut(4) {
                    px.swap(0, 2);
                }
            }
            Conversion::Unorm16ToHalf => {
                for channel in pixels.chunks_exact_mut(2) {
                    let unorm: u16 = bytemuck::pod_read_unaligned(channel);
                    let value =
                        f16::from_f32(f32::from(unorm) / f32::from(u16::MAX));
                    channel.copy_from_slice(bytemuck::bytes_of(&value));
                }
            }
        }
    }
}

/// Pick the display format for a source format.
///
/// Returns `None` when the source cannot be shown: formats without a
/// per-texel copy size (block compressed, combined depth-stencil) and
/// unrecognized formats whose texel size differs from the half-float
/// RGBA fallback.
#[must_use]
pub fn display_format_for(source: wgpu::TextureFormat) -> Option<FormatMapping> {
    use wgpu::TextureFormat as F;

    let mapping = match source {
        F::Rgba16Float => FormatMapping::new(DisplayFormat::Rgba16Float, Conversion::Copy),
        F::Rgba32Float => FormatMapping::new(DisplayFormat::Rgba32Float, Conversion::Copy),
        F::Rgba16Unorm => {
            FormatMapping::new(DisplayFormat::Rgba16Float, Conversion::Unorm16ToHalf)
        }
        F::Rgba8Unorm | F::Rgba8UnormSrgb => {
            FormatMapping::new(DisplayFormat::Rgba8Unorm, Conversion::Copy)
        }
        F::Bgra8Unorm | F::Bgra8UnormSrgb => {
            FormatMapping::new(DisplayFormat::Rgba8Unorm, Conversion::SwizzleBgra)
        }
        F::Depth32Float | F::R32Float => {
            FormatMapping::new(DisplayFormat::R32Float, Conversion::Copy)
        }
        other => {
            if other.block_dimensions() != (1, 1) {
                return None;
            }
            let texel = other.block_copy_size(None)?;
            if texel as usize != DisplayFormat::Rgba16Float.bytes_per_pixel() {
                log::debug!("no display format for {other:?} ({texel} bytes per texel)");
                return None;
            }
            FormatMapping::new(DisplayFormat::Rgba16Float, Conversion::Copy)
        }
    };
    Some(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    fn display(source: F) -> Option<DisplayFormat> {
        display_format_for(source).map(|m| m.display)
    }

    #[test]
    fn mapping_table() {
        assert_eq!(display(F::Rgba16Float), Some(DisplayFormat::Rgba16Float));
        assert_eq!(display(F::Rgba32Float), Some(DisplayFormat::Rgba32Float));
        assert_eq!(display(F::Rgba16Unorm), Some(DisplayFormat::Rgba16Float));
        assert_eq!(display(F::Rgba8UnormSrgb), Some(DisplayFormat::Rgba8Unorm));
        assert_eq!(display(F::Bgra8Unorm), Some(DisplayFormat::Rgba8Unorm));
        assert_eq!(display(F::Depth32Float), Some(DisplayFormat::R32Float));
        assert_eq!(display(F::R32Float), Some(DisplayFormat::R32Float));
    }

    #[test]
    fn unrecognized_eight_byte_format_falls_back_to_half_rgba() {
        assert_eq!(display(F::Rgba16Uint), Some(DisplayFormat::Rgba16Float));
        assert_eq!(display(F::Rg32Float), Some(DisplayFormat::Rgba16Float));
    }

    #[test]
    fn unusable_formats_are_rejected() {
        assert_eq!(display(F::Bc1RgbaUnorm), None);
        assert_eq!(display(F::Depth24PlusStencil8), None);
        assert_eq!(display(F::R8Unorm), None);
    }

    #[test]
    fn mapping_preserves_texel_size() {
        for source in [F::Rgba16Unorm, F::Bgra8UnormSrgb, F::Depth32Float, F::Rgba32Float] {
            let mapping = display_format_for(source).unwrap();
            assert_eq!(
                source.block_copy_size(None).map(|s| s as usize),
                Some(mapping.display.bytes_per_pixel()),
                "{source:?}"
            );
        }
    }

    #[test]
    fn bgra_swizzles_to_rgba() {
        let mapping = display_format_for(F::Bgra8Unorm).unwrap();
        let mut pixels = vec![1, 2, 3, 4, 10, 20, 30, 40];
        mapping.convert(&mut pixels);
        assert_eq!(pixels, [3, 2, 1, 4, 30, 20, 10, 40]);
    }

    #[test]
    fn unorm16_becomes_half_float() {
        let mapping = display_format_for(F::Rgba16Unorm).unwrap();
        let mut pixels = Vec::new();
        for v in [0_u16, u16::MAX, 32768, u16::MAX] {
            pixels.extend_from_slice(&v.to_le_bytes());
        }
        mapping.convert(&mut pixels);

        let halves: Vec<f32> = pixels
            .chunks_exact(2)
            .map(|c| f16::from_le_bytes([c[0], c[1]]).to_f32())
            .collect();
        assert_eq!(halves[0], 0.0);
        assert_eq!(halves[1], 1.0);
        assert!((halves[2] - 0.5).abs() < 1e-3);
        assert_eq!(halves[3], 1.0);
    }

    #[test]
    fn copy_leaves_pixels_untouched() {
        let mapping = display_format_for(F::Rgba8Unorm).unwrap();
        let mut pixels = vec![9, 8, 7, 6];
        mapping.convert(&mut pixels);
        assert_eq!(pixels, [9, 8, 7, 6]);
    }
}
