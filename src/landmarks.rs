//! Facial landmark types consumed by the gesture classifier.
//!
//! Coordinates are image-relative: `x` and `y` lie in `[0, 1]`, `z` is a
//! relative depth of either sign. Landmark extraction itself happens outside
//! this crate; the classifier only ever sees the four points of a
//! [`LandmarkSample`].

use crate::{
    constants::{FACE_MESH_BOTTOM_HEAD, FACE_MESH_CHIN, FACE_MESH_SIDE_HEAD, FACE_MESH_TOP_HEAD, REFERENCE_FACE_HEIGHT},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// Coordinate axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A single 3D landmark in normalized image space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Value of the given coordinate
    #[must_use]
    pub const fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One frame's observation of the tracked head points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSample {
    /// Chin, tracked for nodding
    pub chin: Point3,
    /// Side of the head, tracked for shaking
    pub side_head: Point3,
    /// Top of the head (forehead)
    pub top_head: Point3,
    /// Bottom of the head (tip of chin)
    pub bottom_head: Point3,
}

impl LandmarkSample {
    /// Create a sample from its four points
    #[must_use]
    pub const fn new(chin: Point3, side_head: Point3, top_head: Point3, bottom_head: Point3) -> Self {
        Self {
            chin,
            side_head,
            top_head,
            bottom_head,
        }
    }

    /// Select the tracked points from a full face mesh
    pub fn from_face_mesh(mesh: &[Point3]) -> Result<Self> {
        let pick = |index: usize| {
            mesh.get(index).copied().ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Face mesh has {} landmarks, index {index} is out of range",
                    mesh.len()
                ))
            })
        };

        Ok(Self {
            chin: pick(FACE_MESH_CHIN)?,
            side_head: pick(FACE_MESH_SIDE_HEAD)?,
            top_head: pick(FACE_MESH_TOP_HEAD)?,
            bottom_head: pick(FACE_MESH_BOTTOM_HEAD)?,
        })
    }

    /// Threshold scale for the apparent face size.
    ///
    /// A face spanning half the frame height yields `1.0`; closer faces scale
    /// thresholds up, distant faces scale them down.
    #[must_use]
    pub fn distance_adjustment(&self) -> f64 {
        (self.bottom_head.y - self.top_head.y) / REFERENCE_FACE_HEIGHT
    }

    /// Reject samples with non-finite coordinates.
    ///
    /// The classifier trusts its input; callers run this first.
    pub fn validate(&self) -> Result<()> {
        let points = [
            ("chin", &self.chin),
            ("side_head", &self.side_head),
            ("top_head", &self.top_head),
            ("bottom_head", &self.bottom_head),
        ];

        for (name, point) in points {
            if !point.is_finite() {
                return Err(Error::InvalidInput(format!("Non-finite coordinate in {name}: {point:?}")));
            }
        }
        Ok(())
    }
}
