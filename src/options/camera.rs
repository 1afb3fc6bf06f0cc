use glam::DVec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::core::CameraPose;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Free-camera projection and initial pose.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 10.0, max = 120.0), extend("step" = 1.0))]
    pub fov: f64,
    /// Near clipping plane distance.
    #[schemars(title = "Near Plane", range(min = 0.001))]
    pub near: f64,
    /// Far clipping plane distance.
    #[schemars(title = "Far Plane")]
    pub far: f64,
    /// Initial eye position.
    #[schemars(skip)]
    pub eye: [f64; 3],
    /// Initial look-at target.
    #[schemars(skip)]
    pub at: [f64; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 10_000.0,
            eye: [5.0, 5.0, 5.0],
            at: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraOptions {
    /// Initial free-camera pose (Y up).
    #[must_use]
    pub fn initial_pose(&self) -> CameraPose {
        CameraPose::new(
            DVec3::from_array(self.eye),
            DVec3::from_array(self.at),
            DVec3::Y,
        )
    }
}
