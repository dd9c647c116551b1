//! Edge case tests for extraction, smoothing, classification and styling


use brow_expression::{
    classifier::{Expression, ExpressionClassifier},
    features::{BrowGeometry, FeatureExtractor},
    landmarks::{LandmarkFrame, Point, LEFT_SIDE, RIGHT_SIDE},
    smoother::{Channel, TemporalSmoother},
    styler::style,
    Error, ExpressionPipeline, TickOutcome,
};
use test_helpers::FaceBuilder;

#[test]
fn test_extreme_landmark_coordinates() {
    let extractor = FeatureExtractor::new();
    let far = FaceBuilder::neutral().brow_gap(1e6).build();
    let features = extractor.extract(&far).unwrap();

    // Brow remap is unclamped, openness is clamped
    assert!(features.left_brow_y < -1e6);
    assert!((0.0..=1.0).contains(&features.mouth_openness));

    let mut infinite = FaceBuilder::neutral().build();
    infinite.set(RIGHT_SIDE.eyelid_top, Point::new(0.0, f64::INFINITY));
    assert!(matches!(extractor.extract(&infinite), Err(Error::InvalidMeasurement(_))));
}

#[test]
fn test_vertical_brow_is_finite() {
    // Inner corner straight above the outer one: slope is infinite, angle is 90
    let mut frame = FaceBuilder::neutral().build();
    let outer = frame.get(LEFT_SIDE.brow_outer).unwrap();
    frame.set(LEFT_SIDE.brow_inner, Point::new(outer.x, outer.y - 10.0));

    let features = FeatureExtractor::new().extract(&frame).unwrap();
    assert!((features.left_brow_angle.abs() - 90.0).abs() < 1e-9);
}

#[test]
fn test_frames_of_every_short_length_report_no_face() {
    let full = FaceBuilder::neutral().build();
    let mut pipeline = ExpressionPipeline::new();

    for len in [0, 1, 14, 107, 300, 386] {
        let frame = LandmarkFrame::new(full.points()[..len].to_vec());
        assert_eq!(pipeline.process(&[frame], 0), TickOutcome::NoFace, "length {len}");
    }
    assert!(!pipeline.smoother().is_initialized());
}

#[test]
fn test_large_time_jumps_and_repeated_timestamps() {
    let mut classifier = ExpressionClassifier::new();
    classifier.classify(-30.0, -30.0, 0.0, 0.0, u64::MAX - 10);
    // Repeated timestamp stays inside the window
    let result = classifier.classify(0.0, 0.0, 12.0, 12.0, u64::MAX - 10);
    assert_eq!(result.expression, Expression::Surprised);

    let result = classifier.classify(0.0, 0.0, 12.0, 12.0, u64::MAX);
    assert!(result.held);
}

#[test]
fn test_timestamp_before_lock_start_is_held() {
    let mut classifier = ExpressionClassifier::new();
    classifier.classify(-30.0, -30.0, 0.0, 0.0, 1_000);
    let result = classifier.classify(0.0, 0.0, 12.0, 12.0, 500);
    assert_eq!(result.expression, Expression::Surprised);
}

#[test]
fn test_smoother_handles_huge_values() {
    let mut smoother = TemporalSmoother::new();
    for &raw in &[0.0, 1e300, -1e300, 1e300, -1e300] {
        let out = smoother.smooth(Channel::LeftBrowAngle, raw);
        assert!(out.is_finite());
    }
}

#[test]
fn test_angry_floor_for_mixed_signs() {
    let brows = BrowGeometry::new(0.0, 0.0, 3.0, -15.0);
    let styled = style(Expression::Angry, &brows);
    assert_eq!(styled.brows.left_angle, -25.0);
    assert_eq!(styled.brows.right_angle, -30.0);
}
