//! Brow-based expression classification with a time-based lock.

use crate::config::ClassifierConfig;
use crate::constants::{RULE_CONFIDENCE_MAX, RULE_CONFIDENCE_MIN};
use crate::features::BrowGeometry;
use crate::utils::map_unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete expression labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Expression {
    #[default]
    Neutral,
    Angry,
    Sad,
    Surprised,
}

impl Expression {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Expression::Neutral => "NEUTRAL",
            Expression::Angry => "ANGRY",
            Expression::Sad => "SAD",
            Expression::Surprised => "SURPRISED",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one classification call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Reported expression
    pub expression: Expression,
    /// Strength of the rule match in [0, 1]
    pub confidence: f64,
    /// True when the lock hold window forced the locked expression
    pub held: bool,
}

/// Expression lock bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LockState {
    /// Expression the lock currently holds
    pub locked_expression: Expression,
    /// Time the lock last changed, `None` until the first change
    pub lock_start_ms: Option<u64>,
    /// Confidence of the detection that set the lock
    pub lock_confidence: f64,
}

impl LockState {
    /// Whether `now_ms` falls inside the hold window
    #[must_use]
    pub fn is_holding(&self, now_ms: u64, duration_ms: u64) -> bool {
        self.lock_start_ms
            .is_some_and(|start| now_ms.saturating_sub(start) < duration_ms)
    }
}

/// Threshold classifier over averaged brow metrics
#[derive(Debug, Clone, Default)]
pub struct ExpressionClassifier {
    config: ClassifierConfig,
    lock: LockState,
}

impl ExpressionClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            config,
            lock: LockState::default(),
        }
    }

    /// Classify one frame's smoothed brow measurements at time `now_ms`.
    ///
    /// Within the hold window after a lock change the locked expression is
    /// reported regardless of input. Outside it the detected expression is
    /// reported, and a confident detection different from the locked one
    /// moves the lock.
    pub fn classify(
        &mut self,
        left_brow_y: f64,
        right_brow_y: f64,
        left_brow_angle: f64,
        right_brow_angle: f64,
        now_ms: u64,
    ) -> Classification {
        if self.lock.is_holding(now_ms, self.config.lock_duration_ms) {
            return Classification {
                expression: self.lock.locked_expression,
                confidence: self.lock.lock_confidence,
                held: true,
            };
        }

        let avg_y = (left_brow_y + right_brow_y) / 2.0;
        let avg_angle = (left_brow_angle + right_brow_angle) / 2.0;
        let (expression, confidence) = self.detect(avg_y, avg_angle);

        if confidence >= self.config.confidence_threshold && expression != self.lock.locked_expression {
            log::debug!(
                "Expression lock {} -> {} (confidence {:.2}) at {} ms",
                self.lock.locked_expression,
                expression,
                confidence,
                now_ms
            );
            self.lock = LockState {
                locked_expression: expression,
                lock_start_ms: Some(now_ms),
                lock_confidence: confidence,
            };
        }

        Classification {
            expression,
            confidence,
            held: false,
        }
    }

    /// [`classify`](Self::classify) over a brow measurement
    pub fn classify_brows(&mut self, brows: &BrowGeometry, now_ms: u64) -> Classification {
        self.classify(brows.left_y, brows.right_y, brows.left_angle, brows.right_angle, now_ms)
    }

    /// Apply the threshold rules without touching the lock.
    ///
    /// Rules are checked in priority order and the first match wins.
    #[must_use]
    pub fn detect(&self, avg_y: f64, avg_angle: f64) -> (Expression, f64) {
        let cfg = &self.config;
        let graded = |value: f64, from: f64, to: f64| map_unit(value, from, to, RULE_CONFIDENCE_MIN, RULE_CONFIDENCE_MAX);

        if avg_y < cfg.surprised_brow_y {
            (
                Expression::Surprised,
                graded(avg_y, cfg.surprised_brow_y, cfg.surprised_brow_y_full),
            )
        } else if avg_angle < -cfg.angry_brow_angle {
            (
                Expression::Angry,
                graded(avg_angle.abs(), cfg.angry_brow_angle, cfg.angry_brow_angle_full),
            )
        } else if avg_angle > cfg.sad_brow_angle {
            (
                Expression::Sad,
                graded(avg_angle, cfg.sad_brow_angle, cfg.sad_brow_angle_full),
            )
        } else if avg_y.abs() < cfg.neutral_brow_y && avg_angle.abs() < cfg.neutral_brow_angle {
            (Expression::Neutral, cfg.neutral_confidence)
        } else {
            (Expression::Neutral, 0.0)
        }
    }

    #[must_use]
    pub fn locked_expression(&self) -> Expression {
        self.lock.locked_expression
    }

    #[must_use]
    pub fn lock_state(&self) -> &LockState {
        &self.lock
    }

    /// Drop the lock and return to neutral
    pub fn reset(&mut self) {
        self.lock = LockState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules() {
        let classifier = ExpressionClassifier::new();

        assert_eq!(classifier.detect(-15.5, 0.0).0, Expression::Surprised);
        assert_eq!(classifier.detect(0.0, -9.0).0, Expression::Angry);
        assert_eq!(classifier.detect(0.0, 7.0).0, Expression::Sad);
        assert_eq!(classifier.detect(2.0, 1.0), (Expression::Neutral, 0.9));
        // Between the neutral band and every rule
        assert_eq!(classifier.detect(12.0, 0.0), (Expression::Neutral, 0.0));
        assert_eq!(classifier.detect(0.0, -6.0), (Expression::Neutral, 0.0));
    }

    #[test]
    fn test_graded_confidence() {
        let classifier = ExpressionClassifier::new();

        let (_, c) = classifier.detect(-27.5, 0.0);
        assert!((c - 0.9).abs() < 1e-9);
        let (_, c) = classifier.detect(0.0, -14.0);
        assert!((c - 0.9).abs() < 1e-9);
        let (_, c) = classifier.detect(0.0, 15.0);
        assert!((c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let classifier = ExpressionClassifier::new();
        assert_ne!(classifier.detect(-15.0, 0.0).0, Expression::Surprised);
        assert_ne!(classifier.detect(0.0, -8.0).0, Expression::Angry);
        assert_ne!(classifier.detect(0.0, 6.0).0, Expression::Sad);
    }

    #[test]
    fn test_lock_moves_only_on_confident_change() {
        let mut classifier = ExpressionClassifier::new();

        // Unmatched fallback has zero confidence and never locks
        let result = classifier.classify(12.0, 12.0, 0.0, 0.0, 0);
        assert_eq!(result.expression, Expression::Neutral);
        assert_eq!(classifier.lock_state().lock_start_ms, None);

        let result = classifier.classify(0.0, 0.0, 10.0, 10.0, 100);
        assert_eq!(result.expression, Expression::Sad);
        assert!(!result.held);
        assert_eq!(classifier.locked_expression(), Expression::Sad);
        assert_eq!(classifier.lock_state().lock_start_ms, Some(100));
    }

    #[test]
    fn test_hold_window_reports_locked_expression() {
        let mut classifier = ExpressionClassifier::new();
        classifier.classify(0.0, 0.0, 10.0, 10.0, 1_000);

        let result = classifier.classify(-30.0, -30.0, 0.0, 0.0, 1_199);
        assert_eq!(result.expression, Expression::Sad);
        assert!(result.held);

        // Window is half-open
        let result = classifier.classify(-30.0, -30.0, 0.0, 0.0, 1_200);
        assert_eq!(result.expression, Expression::Surprised);
        assert!(!result.held);
        assert_eq!(classifier.locked_expression(), Expression::Surprised);
    }

    #[test]
    fn test_same_expression_does_not_restart_lock() {
        let mut classifier = ExpressionClassifier::new();
        classifier.classify(0.0, 0.0, 10.0, 10.0, 0);
        classifier.classify(0.0, 0.0, 12.0, 12.0, 500);
        assert_eq!(classifier.lock_state().lock_start_ms, Some(0));
    }

    #[test]
    fn test_expression_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Expression::Surprised).unwrap(), "\"SURPRISED\"");
        assert_eq!(Expression::Angry.to_string(), "ANGRY");
    }
}
