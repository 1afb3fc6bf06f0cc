//! Positioned view frustum.
//!
//! A frustum is a camera position and rotation plus a projection window on
//! the reference plane at distance 1 (perspective) or in world units
//! (orthographic). It converts between a camera-to-world transform, an
//! eye/look-at pair, and view/projection matrices.

use glam::{DMat4, DQuat, DVec2, DVec3, DVec4};

/// Projection kind of a frustum or authored camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Parallel projection.
    Orthographic,
}

/// View frustum with position, orientation, window and clipping range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    position: DVec3,
    rotation: DQuat,
    window_min: DVec2,
    window_max: DVec2,
    near: f64,
    far: f64,
    projection: ProjectionKind,
    view_distance: f64,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            window_min: DVec2::splat(-1.0),
            window_max: DVec2::splat(1.0),
            near: 1.0,
            far: 10.0,
            projection: ProjectionKind::Perspective,
            view_distance: Self::DEFAULT_VIEW_DISTANCE,
        }
    }
}

impl Frustum {
    /// Distance from the position to the look-at point when none is given.
    pub const DEFAULT_VIEW_DISTANCE: f64 = 5.0;

    /// Frustum with default window and clipping placed by a camera-to-world
    /// transform.
    #[must_use]
    pub fn from_camera_to_world(camera_to_world: DMat4) -> Self {
        let mut frustum = Self::default();
        frustum.set_position_and_rotation_from_matrix(camera_to_world);
        frustum
    }

    /// Fully specified frustum.
    #[must_use]
    pub fn new(
        camera_to_world: DMat4,
        window: (DVec2, DVec2),
        clipping: (f64, f64),
        projection: ProjectionKind,
    ) -> Self {
        let mut frustum = Self {
            window_min: window.0,
            window_max: window.1,
            near: clipping.0,
            far: clipping.1,
            projection,
            ..Self::default()
        };
        frustum.set_position_and_rotation_from_matrix(camera_to_world);
        frustum
    }

    /// Take position and orientation from a camera-to-world transform,
    /// discarding any scale.
    pub fn set_position_and_rotation_from_matrix(
        &mut self,
        camera_to_world: DMat4,
    ) {
        let (_, rotation, translation) =
            camera_to_world.to_scale_rotation_translation();
        self.position = translation;
        self.rotation = rotation.normalize();
    }

    /// Camera position in world space.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Camera orientation (camera looks down its local -Z).
    #[must_use]
    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    /// Projection kind.
    #[must_use]
    pub fn projection(&self) -> ProjectionKind {
        self.projection
    }

    /// Near and far clipping distances.
    #[must_use]
    pub fn near_far(&self) -> (f64, f64) {
        (self.near, self.far)
    }

    /// Unit view direction in world space.
    #[must_use]
    pub fn direction(&self) -> DVec3 {
        self.rotation * DVec3::NEG_Z
    }

    /// Unit up direction in world space.
    #[must_use]
    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    /// Point `view_distance` along the view direction.
    #[must_use]
    pub fn look_at_point(&self) -> DVec3 {
        self.position + self.direction() * self.view_distance
    }

    /// World-to-camera matrix.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation, self.position)
            .inverse()
    }

    /// Projection matrix in the OpenGL `[-1, 1]` depth convention.
    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        let (l, b) = (self.window_min.x, self.window_min.y);
        let (r, t) = (self.window_max.x, self.window_max.y);
        match self.projection {
            ProjectionKind::Perspective => off_center_perspective_gl(
                l * self.near,
                r * self.near,
                b * self.near,
                t * self.near,
                self.near,
                self.far,
            ),
            ProjectionKind::Orthographic => {
                DMat4::orthographic_rh_gl(l, r, b, t, self.near, self.far)
            }
        }
    }
}

/// `glFrustum`-style perspective matrix for an off-center near-plane window.
fn off_center_perspective_gl(
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    near: f64,
    far: f64,
) -> DMat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;
    DMat4::from_cols(
        DVec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        DVec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        DVec4::new(
            (right + left) / width,
            (top + bottom) / height,
            -(far + near) / depth,
            -1.0,
        ),
        DVec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::core::CameraPose;

    #[test]
    fn decomposes_view_matrix_into_eye_and_look_at() {
        let pose = CameraPose::new(
            DVec3::new(4.0, 3.0, -2.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::Y,
        );
        let frustum =
            Frustum::from_camera_to_world(pose.view_matrix().inverse());
        assert!(frustum.position().abs_diff_eq(pose.eye, 1e-9));

        let expected = pose.eye
            + pose.front().normalize() * Frustum::DEFAULT_VIEW_DISTANCE;
        assert!(frustum.look_at_point().abs_diff_eq(expected, 1e-9));
        assert!(frustum
            .view_matrix()
            .abs_diff_eq(DMat4::look_at_rh(pose.eye, expected, DVec3::Y), 1e-9));
    }

    #[test]
    fn centered_window_matches_symmetric_perspective() {
        let half_height = (30.0_f64).to_radians().tan();
        let half_width = half_height * 1.5;
        let frustum = Frustum::new(
            DMat4::IDENTITY,
            (
                DVec2::new(-half_width, -half_height),
                DVec2::new(half_width, half_height),
            ),
            (0.5, 200.0),
            ProjectionKind::Perspective,
        );
        let expected = DMat4::perspective_rh_gl(
            60.0_f64.to_radians(),
            1.5,
            0.5,
            200.0,
        );
        assert!(frustum.projection_matrix().abs_diff_eq(expected, 1e-9));
    }

    #[test]
    fn scale_in_transform_is_ignored() {
        let m = DMat4::from_scale_rotation_translation(
            DVec3::splat(3.0),
            DQuat::from_rotation_y(0.7),
            DVec3::new(1.0, 2.0, 3.0),
        );
        let frustum = Frustum::from_camera_to_world(m);
        assert!(frustum.position().abs_diff_eq(DVec3::new(1.0, 2.0, 3.0), 1e-9));
        assert!((frustum.direction().length() - 1.0).abs() < 1e-9);
    }
}
