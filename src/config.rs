//! Configuration management for the expression pipeline

use crate::constants::{
    ALPHA_FAST, ALPHA_MEDIUM, ALPHA_SLOW, ANGRY_BROW_ANGLE, ANGRY_BROW_ANGLE_FULL, BROW_OFFSET_INPUT_MAX,
    BROW_OFFSET_INPUT_MIN, BROW_OFFSET_OUTPUT_LOWERED, BROW_OFFSET_OUTPUT_RAISED, DEAD_ZONE, EYE_OPEN_MAX,
    EYE_OPEN_MIN, HYSTERESIS_SUSTAIN_FRAMES, HYSTERESIS_TARGET_TOLERANCE, HYSTERESIS_THRESHOLD,
    LOCK_CONFIDENCE_THRESHOLD, MIN_LOCK_DURATION_MS, MOUTH_OPEN_MAX, MOUTH_OPEN_MIN, NEUTRAL_BROW_ANGLE,
    NEUTRAL_BROW_Y, NEUTRAL_CONFIDENCE, SAD_BROW_ANGLE, SAD_BROW_ANGLE_FULL, SAMPLE_BUFFER_SIZE,
    SURPRISED_BROW_Y, SURPRISED_BROW_Y_FULL, VELOCITY_FAST, VELOCITY_MEDIUM, VELOCITY_SLOW,
};
use crate::filters::exponential::AlphaSchedule;
use crate::pipeline::ExpressionPipeline;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feature extraction ranges
    pub extractor: ExtractorConfig,

    /// Per-channel smoothing parameters
    pub smoothing: SmoothingConfig,

    /// Classifier thresholds and lock timing
    pub classifier: ClassifierConfig,
}

/// Ranges used to turn landmark distances into features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Brow-to-eye gap (pixels) mapped onto `brow_output_lowered`
    pub brow_input_min: f64,

    /// Brow-to-eye gap (pixels) mapped onto `brow_output_raised`
    pub brow_input_max: f64,

    /// Remapped value for a fully raised brow
    pub brow_output_raised: f64,

    /// Remapped value for a lowered brow
    pub brow_output_lowered: f64,

    /// Lip distance considered fully closed
    pub mouth_open_min: f64,

    /// Lip distance considered fully open
    pub mouth_open_max: f64,

    /// Eyelid distance considered fully closed
    pub eye_open_min: f64,

    /// Eyelid distance considered fully open
    pub eye_open_max: f64,
}

/// Temporal smoothing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Minimum raw change between consecutive samples
    pub dead_zone: f64,

    /// Raw sample buffer capacity
    pub buffer_size: usize,

    /// Velocity below which `alpha_slow` applies
    pub velocity_slow: f64,

    /// Velocity below which `alpha_medium` applies
    pub velocity_medium: f64,

    /// Velocity above which `alpha_fast` applies
    pub velocity_fast: f64,

    /// Weight of the previous smoothed value for slow motion
    pub alpha_slow: f64,

    /// Weight of the previous smoothed value for moderate motion
    pub alpha_medium: f64,

    /// Weight of the previous smoothed value for fast motion
    pub alpha_fast: f64,

    /// Jump size the hysteresis gate considers
    pub hysteresis_threshold: f64,

    /// Tolerance for two candidates to count as the same target
    pub target_tolerance: f64,

    /// Consecutive frames needed to commit a jump
    pub sustain_frames: u32,
}

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Hold window after a lock change, milliseconds
    pub lock_duration_ms: u64,

    /// Confidence required to move the lock
    pub confidence_threshold: f64,

    /// Average brow Y below which the face reads as surprised
    pub surprised_brow_y: f64,

    /// Average brow Y at which surprise confidence saturates
    pub surprised_brow_y_full: f64,

    /// Brow angle magnitude beyond which the face reads as angry
    pub angry_brow_angle: f64,

    /// Brow angle magnitude at which anger confidence saturates
    pub angry_brow_angle_full: f64,

    /// Brow angle beyond which the face reads as sad
    pub sad_brow_angle: f64,

    /// Brow angle at which sadness confidence saturates
    pub sad_brow_angle_full: f64,

    /// Maximum |brow Y| for a confident neutral
    pub neutral_brow_y: f64,

    /// Maximum |brow angle| for a confident neutral
    pub neutral_brow_angle: f64,

    /// Confidence reported for a confident neutral
    pub neutral_confidence: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            brow_input_min: BROW_OFFSET_INPUT_MIN,
            brow_input_max: BROW_OFFSET_INPUT_MAX,
            brow_output_raised: BROW_OFFSET_OUTPUT_RAISED,
            brow_output_lowered: BROW_OFFSET_OUTPUT_LOWERED,
            mouth_open_min: MOUTH_OPEN_MIN,
            mouth_open_max: MOUTH_OPEN_MAX,
            eye_open_min: EYE_OPEN_MIN,
            eye_open_max: EYE_OPEN_MAX,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            dead_zone: DEAD_ZONE,
            buffer_size: SAMPLE_BUFFER_SIZE,
            velocity_slow: VELOCITY_SLOW,
            velocity_medium: VELOCITY_MEDIUM,
            velocity_fast: VELOCITY_FAST,
            alpha_slow: ALPHA_SLOW,
            alpha_medium: ALPHA_MEDIUM,
            alpha_fast: ALPHA_FAST,
            hysteresis_threshold: HYSTERESIS_THRESHOLD,
            target_tolerance: HYSTERESIS_TARGET_TOLERANCE,
            sustain_frames: HYSTERESIS_SUSTAIN_FRAMES,
        }
    }
}

impl SmoothingConfig {
    /// EMA weight schedule described by this configuration
    #[must_use]
    pub fn alpha_schedule(&self) -> AlphaSchedule {
        AlphaSchedule {
            velocity_slow: self.velocity_slow,
            velocity_medium: self.velocity_medium,
            velocity_fast: self.velocity_fast,
            alpha_slow: self.alpha_slow,
            alpha_medium: self.alpha_medium,
            alpha_fast: self.alpha_fast,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            lock_duration_ms: MIN_LOCK_DURATION_MS,
            confidence_threshold: LOCK_CONFIDENCE_THRESHOLD,
            surprised_brow_y: SURPRISED_BROW_Y,
            surprised_brow_y_full: SURPRISED_BROW_Y_FULL,
            angry_brow_angle: ANGRY_BROW_ANGLE,
            angry_brow_angle_full: ANGRY_BROW_ANGLE_FULL,
            sad_brow_angle: SAD_BROW_ANGLE,
            sad_brow_angle_full: SAD_BROW_ANGLE_FULL,
            neutral_brow_y: NEUTRAL_BROW_Y,
            neutral_brow_angle: NEUTRAL_BROW_ANGLE,
            neutral_confidence: NEUTRAL_CONFIDENCE,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Build a pipeline from this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate
    pub fn build_pipeline(&self) -> Result<ExpressionPipeline> {
        self.validate()?;
        Ok(ExpressionPipeline::with_config(self))
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid value
    #[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN must fail every range check
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(Error::ConfigError(format!("{name} must be a finite number")));
            }
        }

        let extractor = &self.extractor;
        if (extractor.brow_input_max - extractor.brow_input_min).abs() < f64::EPSILON {
            return Err(Error::ConfigError("Brow input range must not be empty".to_string()));
        }
        if !(extractor.mouth_open_max > extractor.mouth_open_min) {
            return Err(Error::ConfigError(
                "Mouth open max must be greater than mouth open min".to_string(),
            ));
        }
        if !(extractor.eye_open_max > extractor.eye_open_min) {
            return Err(Error::ConfigError(
                "Eye open max must be greater than eye open min".to_string(),
            ));
        }

        let smoothing = &self.smoothing;
        if !(smoothing.dead_zone >= 0.0) {
            return Err(Error::ConfigError("Dead zone must be non-negative".to_string()));
        }
        if smoothing.buffer_size == 0 {
            return Err(Error::ConfigError(
                "Sample buffer size must be greater than 0".to_string(),
            ));
        }
        if !(smoothing.velocity_slow <= smoothing.velocity_medium
            && smoothing.velocity_medium < smoothing.velocity_fast)
        {
            return Err(Error::ConfigError(
                "Velocity breakpoints must satisfy slow <= medium < fast".to_string(),
            ));
        }
        for (name, alpha) in [
            ("alpha_slow", smoothing.alpha_slow),
            ("alpha_medium", smoothing.alpha_medium),
            ("alpha_fast", smoothing.alpha_fast),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::ConfigError(format!("{name} must be between 0.0 and 1.0")));
            }
        }
        if !(smoothing.hysteresis_threshold >= 0.0 && smoothing.target_tolerance >= 0.0) {
            return Err(Error::ConfigError(
                "Hysteresis threshold and tolerance must be non-negative".to_string(),
            ));
        }
        if smoothing.sustain_frames == 0 {
            return Err(Error::ConfigError(
                "Sustain frames must be greater than 0".to_string(),
            ));
        }

        let classifier = &self.classifier;
        if !(0.0..=1.0).contains(&classifier.confidence_threshold) {
            return Err(Error::ConfigError(
                "Confidence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&classifier.neutral_confidence) {
            return Err(Error::ConfigError(
                "Neutral confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(classifier.surprised_brow_y_full < classifier.surprised_brow_y) {
            return Err(Error::ConfigError(
                "Surprise saturation must lie below the surprise threshold".to_string(),
            ));
        }
        if !(classifier.angry_brow_angle_full > classifier.angry_brow_angle
            && classifier.sad_brow_angle_full > classifier.sad_brow_angle)
        {
            return Err(Error::ConfigError(
                "Angle saturation must lie beyond its threshold".to_string(),
            ));
        }

        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f64); 27] {
        let (e, s, c) = (&self.extractor, &self.smoothing, &self.classifier);
        [
            ("brow_input_min", e.brow_input_min),
            ("brow_input_max", e.brow_input_max),
            ("brow_output_raised", e.brow_output_raised),
            ("brow_output_lowered", e.brow_output_lowered),
            ("mouth_open_min", e.mouth_open_min),
            ("mouth_open_max", e.mouth_open_max),
            ("eye_open_min", e.eye_open_min),
            ("eye_open_max", e.eye_open_max),
            ("dead_zone", s.dead_zone),
            ("velocity_slow", s.velocity_slow),
            ("velocity_medium", s.velocity_medium),
            ("velocity_fast", s.velocity_fast),
            ("alpha_slow", s.alpha_slow),
            ("alpha_medium", s.alpha_medium),
            ("alpha_fast", s.alpha_fast),
            ("hysteresis_threshold", s.hysteresis_threshold),
            ("target_tolerance", s.target_tolerance),
            ("confidence_threshold", c.confidence_threshold),
            ("surprised_brow_y", c.surprised_brow_y),
            ("surprised_brow_y_full", c.surprised_brow_y_full),
            ("angry_brow_angle", c.angry_brow_angle),
            ("angry_brow_angle_full", c.angry_brow_angle_full),
            ("sad_brow_angle", c.sad_brow_angle),
            ("sad_brow_angle_full", c.sad_brow_angle_full),
            ("neutral_brow_y", c.neutral_brow_y),
            ("neutral_brow_angle", c.neutral_brow_angle),
            ("neutral_confidence", c.neutral_confidence),
        ]
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Expression pipeline configuration

# Feature extraction ranges (pixels)
extractor:
  brow_input_min: 20.0
  brow_input_max: 50.0
  brow_output_raised: -40.0
  brow_output_lowered: 20.0
  mouth_open_min: 5.0
  mouth_open_max: 30.0
  eye_open_min: 3.0
  eye_open_max: 15.0

# Per-channel smoothing
smoothing:
  dead_zone: 1.5
  buffer_size: 3
  velocity_slow: 1.0
  velocity_medium: 3.0
  velocity_fast: 15.0
  alpha_slow: 0.08
  alpha_medium: 0.15
  alpha_fast: 0.5
  hysteresis_threshold: 2.0
  target_tolerance: 0.5
  sustain_frames: 2

# Expression classification
classifier:
  lock_duration_ms: 200
  confidence_threshold: 0.8
  surprised_brow_y: -15.0
  surprised_brow_y_full: -40.0
  angry_brow_angle: 8.0
  angry_brow_angle_full: 20.0
  sad_brow_angle: 6.0
  sad_brow_angle_full: 15.0
  neutral_brow_y: 10.0
  neutral_brow_angle: 5.0
  neutral_confidence: 0.9
"#;
