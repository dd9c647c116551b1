//! Landmark frames as delivered by the external face tracker.
//!
//! A frame is the ordered point list of one detected face for one detection
//! cycle, in frame pixel coordinates (y grows downwards). Indices follow the
//! 468-point face-mesh topology, with left/right named from the subject's
//! point of view.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Upper lip, inner edge
pub const UPPER_LIP: usize = 13;
/// Lower lip, inner edge
pub const LOWER_LIP: usize = 14;

/// Landmark indices describing one side of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideIndices {
    pub brow_outer: usize,
    pub brow_middle: usize,
    pub brow_inner: usize,
    pub eyelid_top: usize,
    pub eyelid_bottom: usize,
}

/// Subject's left side
pub const LEFT_SIDE: SideIndices = SideIndices {
    brow_outer: 300,
    brow_middle: 334,
    brow_inner: 336,
    eyelid_top: 386,
    eyelid_bottom: 374,
};

/// Subject's right side
pub const RIGHT_SIDE: SideIndices = SideIndices {
    brow_outer: 70,
    brow_middle: 105,
    brow_inner: 107,
    eyelid_top: 159,
    eyelid_bottom: 145,
};

/// A single 2D landmark point in frame pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One face's landmarks for one detection cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    points: Vec<Point>,
}

impl LandmarkFrame {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a frame from `(x, y)` tuples
    #[must_use]
    pub fn from_tuples(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get a point by landmark index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Get a point the extractor depends on
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFaceDetected`] if the frame does not reach `index`
    pub fn required(&self, index: usize) -> Result<Point> {
        self.get(index).ok_or_else(|| {
            log::debug!("Landmark {} missing from frame of {} points", index, self.points.len());
            Error::NoFaceDetected
        })
    }

    /// Overwrite a point, growing the frame with default points if needed
    pub fn set(&mut self, index: usize, point: Point) {
        if index >= self.points.len() {
            self.points.resize(index + 1, Point::default());
        }
        self.points[index] = point;
    }
}

impl From<Vec<Point>> for LandmarkFrame {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}
