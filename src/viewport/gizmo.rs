//! Transform-gizmo and view-cube steps of the frame.

use glam::{DMat4, Mat4, Vec2};

use super::ui::{UiRect, ViewportUi};
use crate::camera::controller::CameraController;
use crate::scene::SceneModel;

/// Manipulation the transform gizmo performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoOperation {
    /// Move along axes/planes.
    #[default]
    Translate,
    /// Rotate about axes.
    Rotate,
    /// Scale along axes.
    Scale,
}

/// Coordinate space of the transform gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoMode {
    /// Object space.
    #[default]
    Local,
    /// World space.
    World,
}

/// Side length of the view cube in pixels.
pub const VIEW_CUBE_SIZE: f32 = 128.0;
/// Offset of the view cube below the top of the viewport.
pub const VIEW_CUBE_TOP_MARGIN: f32 = 18.0;
/// Camera distance the view cube renders with.
pub const VIEW_CUBE_DISTANCE: f32 = 8.0;

/// Run the transform gizmo on the first selected prim and write the edited
/// transform back if the user moved it.
///
/// Returns `true` if the scene was modified.
pub(crate) fn update_transform_gizmo(
    ui: &mut dyn ViewportUi,
    scene: &mut dyn SceneModel,
    view: DMat4,
    projection: DMat4,
    operation: GizmoOperation,
    mode: GizmoMode,
) -> bool {
    let selection = scene.selection();
    let Some(path) = selection.first().filter(|p| !p.is_empty()) else {
        return false;
    };

    let original = scene.xform(path).as_mat4();
    let mut edited = original;
    ui.manipulate(
        &view.as_mat4(),
        &projection.as_mat4(),
        operation,
        mode,
        &mut edited,
    );

    if edited == original {
        return false;
    }
    scene.set_xform(path, edited.as_dmat4());
    true
}

/// Run the view cube. When the user drags it, the camera takes the new
/// orientation through frustum decomposition of the returned view matrix.
///
/// Returns `true` if the camera pose changed.
pub(crate) fn update_view_cube(
    ui: &mut dyn ViewportUi,
    rect: UiRect,
    camera: &mut CameraController,
) -> bool {
    let current: Mat4 = camera.view_matrix().as_mat4();
    let mut view = current;
    ui.view_manipulate(
        &mut view,
        VIEW_CUBE_DISTANCE,
        Vec2::new(rect.max.x - VIEW_CUBE_SIZE, rect.min.y + VIEW_CUBE_TOP_MARGIN),
        Vec2::splat(VIEW_CUBE_SIZE),
    );

    if view == current {
        return false;
    }
    camera.set_view_matrix(view.as_dmat4())
}
