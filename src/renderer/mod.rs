//! Rendering backend surface.
//!
//! The viewport does not rasterize anything itself. A [`Renderer`] draws the
//! scene for the current camera and exposes the resulting color attachment,
//! which the readback pipeline copies into a display texture. Renderers are
//! created by plugin id through a [`RendererFactory`] so the user can switch
//! backends at runtime.

use std::fmt;

use glam::{DMat4, DVec3, Vec2};

use crate::error::ViewportError;
use crate::scene::{PrimPath, SceneModel};

/// Identifier of a renderer plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PluginId(String);

impl PluginId {
    /// Wrap a plugin identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Result of a screen-space intersection query.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    /// Prim that was hit.
    pub path: PrimPath,
    /// World-space hit point.
    pub world_point: DVec3,
    /// World-space surface normal at the hit.
    pub world_normal: DVec3,
}

/// Scene-independent lights the viewport menus toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightToggles {
    /// Uniform ambient light.
    pub ambient: bool,
    /// Environment dome light.
    pub dome: bool,
}

/// CPU-resident pixels of a color attachment.
#[derive(Debug, Clone, Copy)]
pub struct HostPixels<'a> {
    /// Tightly packed rows, top row first.
    pub pixels: &'a [u8],
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format of `pixels`.
    pub format: wgpu::TextureFormat,
}

/// The final color buffer of a frame.
#[derive(Debug, Clone, Copy)]
pub enum ColorAttachment<'a> {
    /// GPU texture with `COPY_SRC` usage.
    Texture(&'a wgpu::Texture),
    /// Pixels the renderer already holds in host memory.
    HostPixels(HostPixels<'a>),
    /// A resource the readback pipeline cannot consume.
    Unsupported(&'static str),
}

impl ColorAttachment<'_> {
    /// Pixel format, if the attachment is readable.
    #[must_use]
    pub fn format(&self) -> Option<wgpu::TextureFormat> {
        match self {
            Self::Texture(texture) => Some(texture.format()),
            Self::HostPixels(host) => Some(host.format),
            Self::Unsupported(_) => None,
        }
    }

    /// Size in pixels, if the attachment is readable.
    #[must_use]
    pub fn size(&self) -> Option<(u32, u32)> {
        match self {
            Self::Texture(texture) => Some((texture.width(), texture.height())),
            Self::HostPixels(host) => Some((host.width, host.height)),
            Self::Unsupported(_) => None,
        }
    }
}

/// A rendering backend instance.
///
/// Per frame the viewport calls, in order: [`Renderer::set_render_size`],
/// [`Renderer::set_camera_matrices`], [`Renderer::prepare`],
/// [`Renderer::render`], then reads [`Renderer::color_attachment`].
pub trait Renderer {
    /// Plugin this renderer was created from.
    fn current_plugin(&self) -> &PluginId;

    /// Prims to highlight as selected.
    fn set_selection(&mut self, paths: &[PrimPath]);

    /// Output size in pixels.
    fn set_render_size(&mut self, width: u32, height: u32);

    /// World-to-camera and projection matrices for the next frame.
    fn set_camera_matrices(&mut self, view: DMat4, projection: DMat4);

    /// Enable or disable the viewport-owned lights.
    fn set_lighting(&mut self, _lights: LightToggles) {}

    /// Sync renderer state from the scene.
    fn prepare(&mut self, scene: &dyn SceneModel);

    /// Render one frame.
    fn render(&mut self);

    /// Color buffer of the last rendered frame, `None` if nothing was
    /// produced.
    fn color_attachment(&self) -> Option<ColorAttachment<'_>>;

    /// Intersect the scene at a viewport-local pixel position.
    fn intersect(&mut self, point: Vec2) -> Option<Intersection>;
}

/// Creates renderers by plugin id.
pub trait RendererFactory {
    /// Available plugins, in menu order.
    fn plugins(&self) -> Vec<PluginId>;

    /// Human-readable plugin name for menus and the viewport label.
    fn display_name(&self, plugin: &PluginId) -> String;

    /// Plugin used when a viewport is created.
    fn default_plugin(&self) -> PluginId;

    /// Instantiate a renderer.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::UnknownRenderer`] for an id not in
    /// [`RendererFactory::plugins`], or [`ViewportError::RendererInit`] if
    /// the backend fails to start.
    fn create(
        &self,
        plugin: &PluginId,
    ) -> Result<Box<dyn Renderer>, ViewportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_attachment_reports_format_and_size() {
        let pixels = [0_u8; 16];
        let attachment = ColorAttachment::HostPixels(HostPixels {
            pixels: &pixels,
            width: 2,
            height: 2,
            format: wgpu::TextureFormat::Rgba8Unorm,
        });
        assert_eq!(attachment.size(), Some((2, 2)));
        assert_eq!(attachment.format(), Some(wgpu::TextureFormat::Rgba8Unorm));

        let unsupported = ColorAttachment::Unsupported("render buffer");
        assert_eq!(unsupported.size(), None);
        assert_eq!(unsupported.format(), None);
    }

    #[test]
    fn plugin_id_displays_raw_id() {
        assert_eq!(PluginId::from("storm").to_string(), "storm");
        assert_eq!(PluginId::new("embree").as_str(), "embree");
    }
}
