use crate::camera::ActiveCamera;

/// Which side owns the camera pose for the current frame.
///
/// Decided once at the start of each frame. Under [`PoseAuthority::Scene`]
/// the viewport follows the bound camera prim and drops its own pose edits;
/// under [`PoseAuthority::Local`] pose edits are applied and written back to
/// the bound prim. Two viewports bound to the same camera therefore never
/// write it in the same frame unless both are focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoseAuthority {
    /// Local navigation drives the pose (and the bound prim, if any).
    #[default]
    Local,
    /// The bound camera prim drives the pose.
    Scene,
}

impl PoseAuthority {
    /// `Scene` when the viewport is unfocused and bound to a camera prim.
    #[must_use]
    pub fn decide(focused: bool, active: &ActiveCamera) -> Self {
        match active {
            ActiveCamera::Bound(_) if !focused => Self::Scene,
            _ => Self::Local,
        }
    }
}
