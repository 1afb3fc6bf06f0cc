//! The viewport's complete interactive vocabulary.
//!
//! Key presses, pointer gestures, menu items and programmatic calls all
//! become a `ViewportCommand`. Consumers construct commands and pass them to
//! [`Viewport::execute`](super::Viewport::execute).

use glam::Vec2;

use super::gizmo::{GizmoMode, GizmoOperation};
use crate::renderer::PluginId;
use crate::scene::PrimPath;

/// A single viewport operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportCommand {
    /// Orbit the camera around its target by a pointer delta.
    Orbit {
        /// Pointer delta in pixels.
        delta: Vec2,
    },
    /// Translate eye and target together by a pointer delta.
    Pan {
        /// Pointer delta in pixels.
        delta: Vec2,
    },
    /// Dolly toward the target by the vertical component of a drag.
    DragZoom {
        /// Pointer delta in pixels.
        delta: Vec2,
    },
    /// Dolly toward the target by a scroll amount.
    ScrollZoom {
        /// Wheel notches (positive = closer).
        amount: f32,
    },
    /// Intersect the scene at a viewport-local point and update selection.
    Pick {
        /// Click position in viewport pixels.
        position: Vec2,
    },
    /// Frame the first selected prim.
    FocusSelection,
    /// Frame a specific prim.
    FocusOn(PrimPath),
    /// Change the transform gizmo.
    SetGizmo {
        /// Manipulation operation.
        operation: GizmoOperation,
        /// Coordinate space.
        mode: GizmoMode,
    },
    /// Look through the free camera.
    UseFreeCamera,
    /// Look through an authored camera prim.
    UseCamera(PrimPath),
    /// Replace the renderer with another plugin.
    SwitchRenderer(PluginId),
    /// Toggle the grid overlay.
    SetGrid(bool),
    /// Toggle the renderer's ambient light.
    SetAmbientLight(bool),
    /// Toggle the renderer's dome light.
    SetDomeLight(bool),
    /// Pointer entered (`true`) or left the viewport.
    Hover(bool),
}

impl ViewportCommand {
    /// Whether the command moves the camera pose.
    #[must_use]
    pub fn moves_camera(&self) -> bool {
        matches!(
            self,
            Self::Orbit { .. }
                | Self::Pan { .. }
                | Self::DragZoom { .. }
                | Self::ScrollZoom { .. }
                | Self::FocusSelection
                | Self::FocusOn(_)
        )
    }
}
