//! Immediate-mode UI surface the viewport draws through.

use glam::{Mat4, Vec2};

use super::gizmo::{GizmoMode, GizmoOperation};
use super::menu::MenuModel;
use super::ViewportCommand;
use crate::display::DisplayImage;

/// Axis-aligned screen rectangle in UI pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UiRect {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl UiRect {
    /// Rectangle from its corners.
    #[must_use]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from a corner and a size.
    #[must_use]
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    /// Width in pixels (negative if inverted).
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height in pixels (negative if inverted).
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Whether the rectangle has no drawable area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Renderer-name overlay in the top-right corner of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelOverlay {
    /// Text to draw.
    pub text: String,
    /// Top-left of the text.
    pub position: Vec2,
    /// Filled background behind the text.
    pub background: UiRect,
    /// Background corner rounding in pixels.
    pub rounding: f32,
    /// Background opacity (black).
    pub background_alpha: f32,
}

/// Widget calls the viewport makes while drawing a frame.
///
/// Matrices handed to the gizmo calls are column-major `f32`, view then
/// projection, in the OpenGL clip convention.
pub trait ViewportUi {
    /// Draw the menu bar and return the command of a clicked item.
    fn menu_bar(&mut self, menu: &MenuModel) -> Option<ViewportCommand>;

    /// Content area of the viewport panel.
    fn inner_rect(&self) -> UiRect;

    /// Whether the panel has input focus.
    fn is_focused(&self) -> bool;

    /// Start a gizmo frame scoped to `id`, clipped to `rect`.
    fn begin_gizmo_frame(&mut self, id: u32, rect: UiRect);

    /// Finish the gizmo frame.
    fn end_gizmo_frame(&mut self) {}

    /// Draw the ground grid.
    fn draw_grid(&mut self, view: &Mat4, projection: &Mat4, size: f32);

    /// Blit a display texture.
    fn draw_image(&mut self, image: &DisplayImage);

    /// Run the transform gizmo on `transform`, editing it in place.
    fn manipulate(
        &mut self,
        view: &Mat4,
        projection: &Mat4,
        operation: GizmoOperation,
        mode: GizmoMode,
        transform: &mut Mat4,
    );

    /// Run the view cube on `view`, editing it in place.
    fn view_manipulate(
        &mut self,
        view: &mut Mat4,
        distance: f32,
        position: Vec2,
        size: Vec2,
    );

    /// Size of `text` in the current font.
    fn text_size(&self, text: &str) -> Vec2;

    /// Draw the renderer-name overlay.
    fn draw_label(&mut self, label: &LabelOverlay);
}
