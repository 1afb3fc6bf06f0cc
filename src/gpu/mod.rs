//! GPU plumbing for offscreen rendering and frame readback.
//!
//! Provides headless wgpu device initialization, offscreen render targets,
//! color attachment readers, and source-to-display format mapping.

/// Source-to-display pixel format mapping and conversion.
pub mod format;
/// Color attachment readers (mapped staging buffer, host memory).
pub mod readback;
/// wgpu device and queue initialization.
pub mod render_context;
/// Offscreen render-target texture.
pub mod texture;

pub use format::{display_format_for, DisplayFormat, FormatMapping};
pub use readback::{
    select_reader, ColorAttachmentReader, HostMemoryReader,
    MappedBufferReader, ReadbackError,
};
pub use render_context::{RenderContext, RenderContextError};
pub use texture::RenderTarget;
