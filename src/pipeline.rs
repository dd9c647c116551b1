//! Per-tick expression pipeline.
//!
//! Each detection tick runs extraction, smoothing, classification and
//! styling, and writes the result into a [`CharacterState`] that the
//! renderer reads whenever it draws. Ticks without a usable face leave all
//! state exactly as it was.

use crate::classifier::{Classification, Expression, ExpressionClassifier};
use crate::clock::TimeSource;
use crate::config::Config;
use crate::features::{BrowGeometry, FeatureExtractor, FeatureVector};
use crate::landmarks::LandmarkFrame;
use crate::smoother::TemporalSmoother;
use crate::styler::{style, StyleParams};
use crate::Error;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickOutcome {
    /// Character state was recomputed
    Updated,
    /// No face, empty frame or missing landmarks; state untouched
    NoFace,
    /// Degenerate measurement; state untouched
    InvalidMeasurement,
}

/// Output read by the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    /// Smoothed brow measurements before styling
    pub smoothed: BrowGeometry,
    /// Styled eyebrows, including amplified geometry
    pub style: StyleParams,
    /// Reported expression
    pub expression: Expression,
    /// Confidence of the reported expression
    pub confidence: f64,
    /// Unsmoothed mouth openness in [0, 1]
    pub mouth_openness: f64,
    /// Unsmoothed left eye openness in [0, 1]
    pub left_eye_openness: f64,
    /// Unsmoothed right eye openness in [0, 1]
    pub right_eye_openness: f64,
    /// Timestamp of the last updating tick
    pub updated_at_ms: Option<u64>,
}

/// Owns the stateful stages and the character output
#[derive(Debug, Clone, Default)]
pub struct ExpressionPipeline {
    extractor: FeatureExtractor,
    smoother: TemporalSmoother,
    classifier: ExpressionClassifier,
    character: CharacterState,
}

impl ExpressionPipeline {
    /// Pipeline with the default tuning
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline with explicit tuning. Public callers go through
    /// [`Config::build_pipeline`], which validates first.
    #[must_use]
    pub(crate) fn with_config(config: &Config) -> Self {
        info!(
            "Creating expression pipeline (dead zone {}, lock {} ms)",
            config.smoothing.dead_zone, config.classifier.lock_duration_ms
        );
        Self {
            extractor: FeatureExtractor::with_config(config.extractor.clone()),
            smoother: TemporalSmoother::with_config(config.smoothing.clone()),
            classifier: ExpressionClassifier::with_config(config.classifier.clone()),
            character: CharacterState::default(),
        }
    }

    /// Process one detection result holding zero or more faces.
    ///
    /// Only the first face is used.
    pub fn process(&mut self, faces: &[LandmarkFrame], now_ms: u64) -> TickOutcome {
        self.process_frame(faces.first(), now_ms)
    }

    /// Process one detection result, reading the time from `clock`
    pub fn process_with_clock(&mut self, faces: &[LandmarkFrame], clock: &dyn TimeSource) -> TickOutcome {
        self.process(faces, clock.now_ms())
    }

    /// Process an optional face frame
    pub fn process_frame(&mut self, frame: Option<&LandmarkFrame>, now_ms: u64) -> TickOutcome {
        let Some(frame) = frame else {
            return TickOutcome::NoFace;
        };

        match self.extractor.extract(frame) {
            Ok(features) => {
                self.apply(&features, now_ms);
                TickOutcome::Updated
            }
            Err(Error::NoFaceDetected) => {
                debug!("Skipping tick at {} ms: no face", now_ms);
                TickOutcome::NoFace
            }
            Err(e) => {
                debug!("Skipping tick at {} ms: {}", now_ms, e);
                TickOutcome::InvalidMeasurement
            }
        }
    }

    fn apply(&mut self, features: &FeatureVector, now_ms: u64) {
        let smoothed = self.smoother.smooth_brows(&features.brows());
        let Classification {
            expression,
            confidence,
            ..
        } = self.classifier.classify_brows(&smoothed, now_ms);

        if expression != self.character.expression {
            debug!("Expression changed to {} at {} ms", expression, now_ms);
        }

        self.character = CharacterState {
            smoothed,
            style: style(expression, &smoothed),
            expression,
            confidence,
            mouth_openness: features.mouth_openness,
            left_eye_openness: features.left_eye_openness,
            right_eye_openness: features.right_eye_openness,
            updated_at_ms: Some(now_ms),
        };
    }

    /// Show `expression` on the character without a face, for previewing
    /// styles. Uses the latest smoothed brows; the next updating tick
    /// replaces it.
    pub fn force_expression(&mut self, expression: Expression, now_ms: u64) {
        info!("Forcing expression {} at {} ms", expression, now_ms);
        let smoothed = self.character.smoothed;
        self.character = CharacterState {
            style: style(expression, &smoothed),
            expression,
            confidence: 1.0,
            updated_at_ms: Some(now_ms),
            ..self.character
        };
    }

    /// Latest character state
    #[must_use]
    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    /// Latest reported expression
    #[must_use]
    pub fn expression(&self) -> Expression {
        self.character.expression
    }

    #[must_use]
    pub fn smoother(&self) -> &TemporalSmoother {
        &self.smoother
    }

    #[must_use]
    pub fn classifier(&self) -> &ExpressionClassifier {
        &self.classifier
    }

    /// Forget all history, as if no frame had arrived yet
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.classifier.reset();
        self.character = CharacterState::default();
    }
}
