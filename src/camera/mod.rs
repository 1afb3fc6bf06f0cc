//! Camera system for the scene viewport.
//!
//! Provides the free-camera pose and projection, frustum decomposition for
//! authored cameras, the navigation controller, and gesture mapping.

/// Orbit/pan/zoom/focus controller and authored-camera sync.
pub mod controller;
/// Camera pose and projection parameters.
pub mod core;
/// Positioned view frustum with view/projection matrix construction.
pub mod frustum;
/// Pointer-button and modifier mapping to navigation gestures.
pub mod input;
/// Physical camera built from an authored camera prim.
pub mod physical;

pub use controller::{ActiveCamera, CameraController};
pub use core::{CameraPose, ProjectionParams};
pub use frustum::{Frustum, ProjectionKind};
pub use physical::PhysicalCamera;
