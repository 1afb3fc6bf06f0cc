use glam::{DMat4, DVec3};

/// Below this length a look vector or right axis is treated as zero.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// Free-camera pose defined by eye position, look-at target and up vector.
///
/// Callers keep `eye != at` and `up` not parallel to `at - eye`; see
/// [`CameraPose::is_degenerate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye (camera) position in world space.
    pub eye: DVec3,
    /// Look-at target position.
    pub at: DVec3,
    /// Up direction vector.
    pub up: DVec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: DVec3::new(5.0, 5.0, 5.0),
            at: DVec3::ZERO,
            up: DVec3::Y,
        }
    }
}

impl CameraPose {
    /// Create a pose from its three vectors.
    #[must_use]
    pub fn new(eye: DVec3, at: DVec3, up: DVec3) -> Self {
        Self { eye, at, up }
    }

    /// Right-handed look-at view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.at, self.up)
    }

    /// Unnormalized view direction (`at - eye`).
    #[must_use]
    pub fn front(&self) -> DVec3 {
        self.at - self.eye
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn focus_distance(&self) -> f64 {
        self.front().length()
    }

    /// Camera right axis, `normalize(cross(at - eye, up))`.
    #[must_use]
    pub fn right(&self) -> DVec3 {
        self.front().cross(self.up).normalize()
    }

    /// Camera-space up axis, orthogonal to both right and the view direction.
    #[must_use]
    pub fn camera_up(&self) -> DVec3 {
        self.right().cross(self.front()).normalize()
    }

    /// Whether the pose violates the look-at preconditions (`eye == at`, or
    /// `up` parallel to the view direction).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let front = self.front();
        front.length() < DEGENERATE_EPSILON
            || front.cross(self.up).length() < DEGENERATE_EPSILON
            || !front.is_finite()
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Vertical field of view in degrees.
    pub fov: f64,
    /// Near clipping plane distance.
    pub near: f64,
    /// Far clipping plane distance.
    pub far: f64,
    /// Viewport aspect ratio (width / height).
    pub aspect: f64,
}

impl ProjectionParams {
    /// Symmetric perspective projection with a vertical field of view.
    ///
    /// Uses the OpenGL `[-1, 1]` depth range so the matrix compares equal to
    /// the one an authored camera's frustum produces.
    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(
            self.fov.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec4;

    use super::*;

    #[test]
    fn view_matrix_places_target_on_forward_axis() {
        let poses = [
            CameraPose::default(),
            CameraPose::new(
                DVec3::new(-3.0, 2.0, 7.5),
                DVec3::new(1.0, -1.0, 0.5),
                DVec3::Y,
            ),
            CameraPose::new(
                DVec3::new(0.0, 0.0, 10.0),
                DVec3::ZERO,
                DVec3::new(0.3, 1.0, 0.0),
            ),
        ];
        for pose in poses {
            let in_view = pose.view_matrix().transform_point3(pose.at);
            let distance = pose.focus_distance();
            assert!(in_view.x.abs() < 1e-9, "{in_view:?}");
            assert!(in_view.y.abs() < 1e-9, "{in_view:?}");
            assert!((in_view.z + distance).abs() < 1e-9, "{in_view:?}");
        }
    }

    #[test]
    fn camera_axes_are_orthonormal() {
        let pose = CameraPose::default();
        let forward = pose.front().normalize();
        assert!(pose.right().dot(forward).abs() < 1e-12);
        assert!(pose.camera_up().dot(forward).abs() < 1e-12);
        assert!((pose.right().length() - 1.0).abs() < 1e-12);
        assert!(pose.camera_up().y > 0.0);
    }

    #[test]
    fn degenerate_poses_are_detected() {
        let same = CameraPose::new(DVec3::ONE, DVec3::ONE, DVec3::Y);
        assert!(same.is_degenerate());
        let parallel = CameraPose::new(DVec3::Y * 5.0, DVec3::ZERO, DVec3::Y);
        assert!(parallel.is_degenerate());
        assert!(!CameraPose::default().is_degenerate());
    }

    #[test]
    fn projection_is_symmetric_gl_perspective() {
        let params = ProjectionParams {
            fov: 60.0,
            near: 0.1,
            far: 100.0,
            aspect: 2.0,
        };
        let proj = params.projection_matrix();
        // No off-center terms
        assert_eq!(proj.z_axis.x, 0.0);
        assert_eq!(proj.z_axis.y, 0.0);
        // Near plane maps to -1 in GL clip space
        let clip = proj * DVec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((clip.z / clip.w + 1.0).abs() < 1e-9);
        let focal = 1.0 / (30.0_f64.to_radians()).tan();
        assert!((proj.y_axis.y - focal).abs() < 1e-12);
        assert!((proj.x_axis.x - focal / 2.0).abs() < 1e-12);
    }
}
