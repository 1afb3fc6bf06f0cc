//! Scene-graph collaborator surface.
//!
//! The viewport never owns the scene. It reads prims (sampled at the
//! default time) and writes transforms, selection and the active camera
//! through [`SceneModel`]. [`memory::MemoryScene`] is a self-contained
//! implementation for headless hosts and tests.

/// In-memory scene model.
pub mod memory;

use std::fmt;

use glam::{DMat4, DVec3};

use crate::camera::frustum::ProjectionKind;

pub use memory::MemoryScene;

/// Hierarchical path identifying a prim (e.g. `/World/Cam1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PrimPath(String);

impl PrimPath {
    /// Wrap a path string.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The empty path.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Whether this is the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Final path element (`Cam1` for `/World/Cam1`).
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Full path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrimPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrimPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Prim type tag as reported by the scene index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PrimType {
    /// Camera prim.
    Camera,
    /// Renderable mesh.
    Mesh,
    /// Anything else, by type name.
    Other(String),
    /// Prim exists but carries no type.
    #[default]
    Untyped,
}

/// Camera schema attributes as stored on a camera prim.
///
/// Apertures and focal length are in tenths of a scene unit; see
/// [`crate::camera::physical::APERTURE_UNIT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSchema {
    /// Projection kind.
    pub projection: ProjectionKind,
    /// Horizontal aperture.
    pub horizontal_aperture: f32,
    /// Vertical aperture.
    pub vertical_aperture: f32,
    /// Horizontal aperture offset.
    pub horizontal_aperture_offset: f32,
    /// Vertical aperture offset.
    pub vertical_aperture_offset: f32,
    /// Focal length.
    pub focal_length: f32,
    /// `[near, far]` clipping range.
    pub clipping_range: [f32; 2],
}

impl Default for CameraSchema {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Perspective,
            horizontal_aperture: 2.0955,
            vertical_aperture: 1.529_08,
            horizontal_aperture_offset: 0.0,
            vertical_aperture_offset: 0.0,
            focal_length: 5.0,
            clipping_range: [1.0, 1_000_000.0],
        }
    }
}

/// Axis-aligned bounding extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Extent {
    /// Extent from its two corners.
    #[must_use]
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Center of the box.
    #[must_use]
    pub fn midpoint(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Length of the box diagonal.
    #[must_use]
    pub fn diagonal_length(&self) -> f64 {
        (self.max - self.min).length()
    }
}

/// A prim's data sampled at the default time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prim {
    /// Prim type.
    pub prim_type: PrimType,
    /// Local-to-world transform, if the prim has one.
    pub xform: Option<DMat4>,
    /// Camera attributes, if the prim carries the camera schema.
    pub camera: Option<CameraSchema>,
    /// Bounding extent, if defined.
    pub extent: Option<Extent>,
}

/// Everything the viewport needs from the host's scene model.
pub trait SceneModel {
    /// Look up a prim in the final (composed) scene.
    fn prim(&self, path: &PrimPath) -> Option<Prim>;

    /// All camera prims, in menu order.
    fn cameras(&self) -> Vec<PrimPath>;

    /// Currently selected prims.
    fn selection(&self) -> Vec<PrimPath>;

    /// Replace the selection.
    fn set_selection(&mut self, paths: Vec<PrimPath>);

    /// Record the world-space point and normal of the last pick hit.
    fn set_hit(&mut self, point: DVec3, normal: DVec3);

    /// Tell the model which camera this viewport looks through.
    fn set_active_camera(&mut self, path: &PrimPath);

    /// Editable local transform of a prim (identity if none is authored).
    fn xform(&self, path: &PrimPath) -> DMat4;

    /// Write a prim's local transform.
    fn set_xform(&mut self, path: &PrimPath, xform: DMat4);

    /// Add or remove the grid overlay prims.
    fn populate_grid(&mut self, enabled: bool);
}
