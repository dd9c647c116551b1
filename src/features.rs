//! Facial feature measurements derived from a landmark frame.

use crate::config::ExtractorConfig;
use crate::landmarks::{LandmarkFrame, Point, SideIndices, LEFT_SIDE, LOWER_LIP, RIGHT_SIDE, UPPER_LIP};
use crate::utils::{map_range, map_unit};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Brow offsets and angles for both sides of the face.
///
/// Offsets are negative when the brow is raised; angles are positive when
/// the inner corner sits above the outer corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowGeometry {
    pub left_y: f64,
    pub right_y: f64,
    pub left_angle: f64,
    pub right_angle: f64,
}

impl BrowGeometry {
    #[must_use]
    pub const fn new(left_y: f64, right_y: f64, left_angle: f64, right_angle: f64) -> Self {
        Self {
            left_y,
            right_y,
            left_angle,
            right_angle,
        }
    }

    /// Mean brow offset of both sides
    #[must_use]
    pub fn average_y(&self) -> f64 {
        (self.left_y + self.right_y) / 2.0
    }

    /// Mean brow angle of both sides
    #[must_use]
    pub fn average_angle(&self) -> f64 {
        (self.left_angle + self.right_angle) / 2.0
    }
}

/// Per-frame feature measurements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Remapped brow offset, left side
    pub left_brow_y: f64,
    /// Remapped brow offset, right side
    pub right_brow_y: f64,
    /// Brow angle in degrees, left side
    pub left_brow_angle: f64,
    /// Brow angle in degrees, right side
    pub right_brow_angle: f64,
    /// Distance between the two inner brow points, pixels
    pub inter_brow_distance: f64,
    /// Mouth openness in [0, 1]
    pub mouth_openness: f64,
    /// Left eye openness in [0, 1]
    pub left_eye_openness: f64,
    /// Right eye openness in [0, 1]
    pub right_eye_openness: f64,
}

impl FeatureVector {
    /// The four channels fed to the temporal smoother
    #[must_use]
    pub fn brows(&self) -> BrowGeometry {
        BrowGeometry::new(
            self.left_brow_y,
            self.right_brow_y,
            self.left_brow_angle,
            self.right_brow_angle,
        )
    }

    /// Check that every measurement is finite
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMeasurement`] naming the first bad field
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("left_brow_y", self.left_brow_y),
            ("right_brow_y", self.right_brow_y),
            ("left_brow_angle", self.left_brow_angle),
            ("right_brow_angle", self.right_brow_angle),
            ("inter_brow_distance", self.inter_brow_distance),
            ("mouth_openness", self.mouth_openness),
            ("left_eye_openness", self.left_eye_openness),
            ("right_eye_openness", self.right_eye_openness),
        ];

        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(Error::InvalidMeasurement(format!("{name} is {value}"))),
            None => Ok(()),
        }
    }
}

/// Stateless feature extractor
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: ExtractorConfig,
}

impl FeatureExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Measure one frame
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFaceDetected`] for an empty frame or one missing a
    /// required landmark, and [`Error::InvalidMeasurement`] when the geometry
    /// is degenerate (e.g. coincident brow corners).
    pub fn extract(&self, frame: &LandmarkFrame) -> Result<FeatureVector> {
        if frame.is_empty() {
            return Err(Error::NoFaceDetected);
        }

        let left = SideLandmarks::gather(frame, &LEFT_SIDE)?;
        let right = SideLandmarks::gather(frame, &RIGHT_SIDE)?;
        let upper_lip = frame.required(UPPER_LIP)?;
        let lower_lip = frame.required(LOWER_LIP)?;

        let cfg = &self.config;
        let features = FeatureVector {
            left_brow_y: self.remap_brow(left.brow_offset()),
            right_brow_y: self.remap_brow(right.brow_offset()),
            left_brow_angle: left.brow_angle(),
            // Mirror so both sides read positive for a raised inner corner
            right_brow_angle: -right.brow_angle(),
            inter_brow_distance: left.brow_inner.distance(&right.brow_inner),
            mouth_openness: map_unit(upper_lip.distance(&lower_lip), cfg.mouth_open_min, cfg.mouth_open_max, 0.0, 1.0),
            left_eye_openness: map_unit(left.eye_opening(), cfg.eye_open_min, cfg.eye_open_max, 0.0, 1.0),
            right_eye_openness: map_unit(right.eye_opening(), cfg.eye_open_min, cfg.eye_open_max, 0.0, 1.0),
        };

        features.validate()?;
        Ok(features)
    }

    fn remap_brow(&self, offset: f64) -> f64 {
        let cfg = &self.config;
        map_range(
            offset,
            cfg.brow_input_min,
            cfg.brow_input_max,
            cfg.brow_output_lowered,
            cfg.brow_output_raised,
        )
    }
}

/// The landmarks of one side of the face
struct SideLandmarks {
    brow_outer: Point,
    brow_middle: Point,
    brow_inner: Point,
    eyelid_top: Point,
    eyelid_bottom: Point,
}

impl SideLandmarks {
    fn gather(frame: &LandmarkFrame, side: &SideIndices) -> Result<Self> {
        Ok(Self {
            brow_outer: frame.required(side.brow_outer)?,
            brow_middle: frame.required(side.brow_middle)?,
            brow_inner: frame.required(side.brow_inner)?,
            eyelid_top: frame.required(side.eyelid_top)?,
            eyelid_bottom: frame.required(side.eyelid_bottom)?,
        })
    }

    /// Eye reference Y minus mean brow Y, before remapping
    fn brow_offset(&self) -> f64 {
        let brow_y = (self.brow_outer.y + self.brow_middle.y + self.brow_inner.y) / 3.0;
        self.eyelid_top.y - brow_y
    }

    /// Slope angle from the outer to the inner brow corner, in degrees.
    ///
    /// Positive on the subject's left when the inner corner is raised; the
    /// right side reads with the opposite sign.
    fn brow_angle(&self) -> f64 {
        let dx = self.brow_inner.x - self.brow_outer.x;
        let dy = self.brow_inner.y - self.brow_outer.y;
        (dy / dx).atan().to_degrees()
    }

    fn eye_opening(&self) -> f64 {
        self.eyelid_top.distance(&self.eyelid_bottom)
    }
}
