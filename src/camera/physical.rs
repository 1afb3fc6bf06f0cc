//! Physical camera built from an authored camera prim.
//!
//! Camera prims store aperture and focal length in tenths of a scene unit;
//! dividing by [`APERTURE_UNIT`] and [`FOCAL_LENGTH_UNIT`] yields the
//! photographic millimetre values used here.

use glam::{DMat4, DVec2};

use super::frustum::{Frustum, ProjectionKind};
use crate::scene::{Prim, PrimType};

/// Scene units per millimetre of aperture.
pub const APERTURE_UNIT: f64 = 0.1;
/// Scene units per millimetre of focal length.
pub const FOCAL_LENGTH_UNIT: f64 = 0.1;

/// Still camera with film-back and lens parameters in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalCamera {
    /// Camera-to-world transform.
    pub transform: DMat4,
    /// Perspective or orthographic.
    pub projection: ProjectionKind,
    /// Horizontal film aperture (mm).
    pub horizontal_aperture: f64,
    /// Vertical film aperture (mm).
    pub vertical_aperture: f64,
    /// Horizontal film offset (mm).
    pub horizontal_aperture_offset: f64,
    /// Vertical film offset (mm).
    pub vertical_aperture_offset: f64,
    /// Lens focal length (mm).
    pub focal_length: f64,
    /// Near and far clipping distances in scene units.
    pub clipping_range: (f64, f64),
}

impl Default for PhysicalCamera {
    fn default() -> Self {
        Self {
            transform: DMat4::IDENTITY,
            projection: ProjectionKind::Perspective,
            // 35mm academy format
            horizontal_aperture: 20.955,
            vertical_aperture: 15.2908,
            horizontal_aperture_offset: 0.0,
            vertical_aperture_offset: 0.0,
            focal_length: 50.0,
            clipping_range: (1.0, 1_000_000.0),
        }
    }
}

impl PhysicalCamera {
    /// Build a camera from a scene prim.
    ///
    /// Anything that is not a camera prim, or a camera prim without camera
    /// data, yields the default camera. A missing transform is identity.
    #[must_use]
    pub fn from_prim(prim: Option<&Prim>) -> Self {
        let Some(prim) = prim.filter(|p| p.prim_type == PrimType::Camera)
        else {
            return Self::default();
        };
        let Some(schema) = prim.camera else {
            return Self {
                transform: prim.xform.unwrap_or(DMat4::IDENTITY),
                ..Self::default()
            };
        };

        let mut camera = Self {
            transform: prim.xform.unwrap_or(DMat4::IDENTITY),
            projection: schema.projection,
            horizontal_aperture: f64::from(schema.horizontal_aperture)
                / APERTURE_UNIT,
            vertical_aperture: f64::from(schema.vertical_aperture)
                / APERTURE_UNIT,
            horizontal_aperture_offset: f64::from(
                schema.horizontal_aperture_offset,
            ) / APERTURE_UNIT,
            vertical_aperture_offset: f64::from(
                schema.vertical_aperture_offset,
            ) / APERTURE_UNIT,
            focal_length: f64::from(schema.focal_length) / FOCAL_LENGTH_UNIT,
            clipping_range: (
                f64::from(schema.clipping_range[0]),
                f64::from(schema.clipping_range[1]),
            ),
        };
        if camera.focal_length <= 0.0 {
            log::warn!("camera prim has non-positive focal length; using default");
            camera.focal_length = Self::default().focal_length;
        }
        camera
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn vertical_fov(&self) -> f64 {
        2.0 * (0.5 * self.vertical_aperture / self.focal_length)
            .atan()
            .to_degrees()
    }

    /// Frustum described by this camera.
    #[must_use]
    pub fn frustum(&self) -> Frustum {
        let half = DVec2::new(
            self.horizontal_aperture / 2.0,
            self.vertical_aperture / 2.0,
        );
        let offset = DVec2::new(
            self.horizontal_aperture_offset,
            self.vertical_aperture_offset,
        );
        let scale = match self.projection {
            ProjectionKind::Perspective => 1.0 / self.focal_length,
            ProjectionKind::Orthographic => APERTURE_UNIT,
        };
        Frustum::new(
            self.transform,
            ((offset - half) * scale, (offset + half) * scale),
            self.clipping_range,
            self.projection,
        )
    }
}
