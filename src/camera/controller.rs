use glam::{DMat3, DMat4, DVec3, Vec2};

use super::core::{CameraPose, ProjectionParams};
use super::frustum::Frustum;
use super::physical::PhysicalCamera;
use crate::options::{CameraOptions, NavigationOptions, ViewportOptions};
use crate::scene::{PrimPath, SceneModel};

/// Which camera the viewport looks through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveCamera {
    /// The viewport's own free camera.
    #[default]
    Free,
    /// An authored camera prim.
    Bound(PrimPath),
}

impl ActiveCamera {
    /// Path of the bound camera prim, if any.
    #[must_use]
    pub fn path(&self) -> Option<&PrimPath> {
        match self {
            Self::Free => None,
            Self::Bound(path) => Some(path),
        }
    }
}

/// Owns the viewport camera pose and keeps it in sync with an authored
/// camera prim when one is bound.
///
/// Navigation operations only edit the local pose. Writing the result to
/// the scene is a separate step ([`CameraController::push_to_scene`]) so the
/// caller decides, once per frame, which side is authoritative.
pub struct CameraController {
    pose: CameraPose,
    active: ActiveCamera,
    navigation: NavigationOptions,
    free_camera: CameraOptions,
    projection_params: ProjectionParams,
    projection: DMat4,
}

impl CameraController {
    /// Free camera at the configured initial pose.
    #[must_use]
    pub fn new(options: &ViewportOptions) -> Self {
        let free_camera = options.camera.clone();
        let projection_params = ProjectionParams {
            fov: free_camera.fov,
            near: free_camera.near,
            far: free_camera.far,
            aspect: 1.0,
        };
        Self {
            pose: free_camera.initial_pose(),
            active: ActiveCamera::Free,
            navigation: options.navigation.clone(),
            projection: projection_params.projection_matrix(),
            projection_params,
            free_camera,
        }
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Camera the viewport looks through.
    #[must_use]
    pub fn active_camera(&self) -> &ActiveCamera {
        &self.active
    }

    /// Look-at view matrix of the current pose.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        self.pose.view_matrix()
    }

    /// Projection computed by the last [`CameraController::update_projection`].
    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        self.projection
    }

    /// Parameters behind [`CameraController::projection_matrix`].
    #[must_use]
    pub fn projection_params(&self) -> ProjectionParams {
        self.projection_params
    }

    /// Replace the navigation constants.
    pub fn set_navigation(&mut self, navigation: NavigationOptions) {
        self.navigation = navigation;
    }

    // -- Navigation --

    /// Rotate the eye around the target: yaw about `up` by
    /// `delta.x * orbit_degrees_per_pixel`, then pitch about the recomputed
    /// right axis by `delta.y * orbit_degrees_per_pixel`.
    pub fn orbit(&mut self, delta: Vec2) {
        let step = self.navigation.orbit_degrees_per_pixel;
        let mut pose = self.pose;

        let yaw = DMat3::from_axis_angle(
            pose.up.normalize(),
            (f64::from(delta.x) * step).to_radians(),
        );
        pose.eye = pose.at + yaw * (pose.eye - pose.at);

        let pitch = DMat3::from_axis_angle(
            pose.right(),
            (f64::from(delta.y) * step).to_radians(),
        );
        pose.eye = pose.at + pitch * (pose.eye - pose.at);

        let _ = self.apply(pose, "orbit");
    }

    /// Translate eye and target together in the view plane.
    pub fn pan(&mut self, delta: Vec2) {
        let divisor = self.navigation.pan_divisor;
        let mut pose = self.pose;
        let offset = pose.right() * (-f64::from(delta.x) / divisor)
            + pose.camera_up() * (f64::from(delta.y) / divisor);
        pose.eye += offset;
        pose.at += offset;

        let _ = self.apply(pose, "pan");
    }

    /// Dolly by the vertical component of a pointer drag.
    pub fn zoom_drag(&mut self, delta: Vec2) {
        self.zoom(f64::from(delta.y), self.navigation.drag_zoom_feel);
    }

    /// Dolly by a scroll-wheel amount.
    pub fn zoom_scroll(&mut self, amount: f32) {
        self.zoom(f64::from(amount), self.navigation.scroll_zoom_feel);
    }

    /// `eye += normalize(at - eye) * amount * max(min_scale, ln(d * feel))`,
    /// stopping `min_focus_distance` short of the target.
    fn zoom(&mut self, amount: f64, feel: f64) {
        let distance = self.pose.focus_distance();
        let scale = (distance * feel).ln().max(self.navigation.min_zoom_scale);
        let step = (amount * scale)
            .min((distance - self.navigation.min_focus_distance).max(0.0));

        let mut pose = self.pose;
        pose.eye += pose.front().normalize() * step;
        let _ = self.apply(pose, "zoom");
    }

    /// Frame a prim's extent: the target moves to the extent midpoint and the
    /// eye backs off along the current view direction to twice the extent
    /// diagonal.
    ///
    /// Returns `false` (with a warning) if the prim has no extent.
    pub fn focus_on(
        &mut self,
        scene: &dyn SceneModel,
        path: &PrimPath,
    ) -> bool {
        let Some(extent) = scene.prim(path).and_then(|prim| prim.extent) else {
            log::warn!("cannot focus on {path}: prim has no extent");
            return false;
        };

        let mut pose = self.pose;
        let back = (pose.eye - pose.at).normalize();
        let distance = extent.diagonal_length() * 2.0;
        pose.at = extent.midpoint();
        pose.eye = if distance > self.navigation.min_focus_distance {
            pose.at + back * distance
        } else {
            // Zero-size extent keeps the current distance
            pose.at + back * self.pose.focus_distance()
        };
        self.apply(pose, "focus")
    }

    /// Take eye and target from a world-to-camera matrix by frustum
    /// decomposition. The target lands at the default view distance.
    pub fn set_view_matrix(&mut self, view: DMat4) -> bool {
        let frustum = Frustum::from_camera_to_world(view.inverse());
        let mut pose = self.pose;
        pose.eye = frustum.position();
        pose.at = frustum.look_at_point();
        self.apply(pose, "view cube")
    }

    /// Commit a candidate pose unless it is degenerate.
    fn apply(&mut self, pose: CameraPose, op: &str) -> bool {
        if pose.is_degenerate() {
            log::debug!("{op} rejected: degenerate camera pose");
            return false;
        }
        self.pose = pose;
        true
    }

    // -- Active camera --

    /// Look through the free camera. The current pose is kept.
    pub fn set_free_camera_active(&mut self) {
        self.active = ActiveCamera::Free;
    }

    /// Look through an authored camera prim and take its pose.
    pub fn set_active_camera(
        &mut self,
        scene: &mut dyn SceneModel,
        path: PrimPath,
    ) {
        scene.set_active_camera(&path);
        self.active = ActiveCamera::Bound(path);
        self.pull_from_scene(scene);
    }

    // -- Scene sync --

    /// Overwrite the local eye and target from the bound camera's frustum.
    /// No-op when free.
    pub fn pull_from_scene(&mut self, scene: &dyn SceneModel) {
        let Some(frustum) = self.bound_frustum(scene) else {
            return;
        };
        let mut pose = self.pose;
        pose.eye = frustum.position();
        pose.at = frustum.look_at_point();
        let _ = self.apply(pose, "pull");
    }

    /// Write the inverse view matrix to the bound camera if the current
    /// view or projection differs from the prim's frustum.
    ///
    /// Returns `true` if the scene was written.
    pub fn push_to_scene(&self, scene: &mut dyn SceneModel) -> bool {
        let (Some(path), Some(previous)) =
            (self.active.path(), self.bound_frustum(scene))
        else {
            return false;
        };

        let view = self.view_matrix();
        if view.abs_diff_eq(previous.view_matrix(), MATRIX_EPSILON)
            && self
                .projection
                .abs_diff_eq(previous.projection_matrix(), MATRIX_EPSILON)
        {
            return false;
        }
        scene.set_xform(path, view.inverse());
        true
    }

    /// Recompute the projection for the given aspect ratio. A bound camera
    /// supplies field of view and clipping range; otherwise the free-camera
    /// options do.
    pub fn update_projection(&mut self, scene: &dyn SceneModel, aspect: f64) {
        self.projection_params = match self.active.path() {
            Some(path) => {
                let camera = PhysicalCamera::from_prim(scene.prim(path).as_ref());
                ProjectionParams {
                    fov: camera.vertical_fov(),
                    near: camera.clipping_range.0,
                    far: camera.clipping_range.1,
                    aspect,
                }
            }
            None => ProjectionParams {
                fov: self.free_camera.fov,
                near: self.free_camera.near,
                far: self.free_camera.far,
                aspect,
            },
        };
        self.projection = self.projection_params.projection_matrix();
    }

    fn bound_frustum(&self, scene: &dyn SceneModel) -> Option<Frustum> {
        let path = self.active.path()?;
        Some(PhysicalCamera::from_prim(scene.prim(path).as_ref()).frustum())
    }
}

/// Element tolerance when comparing view/projection matrices.
const MATRIX_EPSILON: f64 = 1e-9;
