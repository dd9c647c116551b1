//! End-to-end replay of recorded detections


use brow_expression::{
    clock::ManualClock,
    replay::{process_record, replay, DetectionRecord, TickRecord},
    Expression, ExpressionPipeline, TickOutcome,
};
use test_helpers::{jittered, FaceBuilder};

fn record(timestamp_ms: u64, faces: Vec<brow_expression::landmarks::LandmarkFrame>) -> String {
    serde_json::to_string(&DetectionRecord {
        timestamp_ms: Some(timestamp_ms),
        faces,
    })
    .unwrap()
}

#[test]
fn test_replay_surprised_session() {
    let mut lines = Vec::new();
    let mut t = 0;
    for _ in 0..5 {
        lines.push(record(t, vec![FaceBuilder::neutral().build()]));
        t += 33;
    }
    // Face briefly lost
    lines.push(record(t, vec![]));
    t += 33;
    for frame in jittered(
        FaceBuilder::neutral().brow_gap(50.0),
        FaceBuilder::neutral().brow_gap(49.2),
        20,
    ) {
        lines.push(record(t, vec![frame]));
        t += 33;
    }
    let input = lines.join("\n");

    let mut output = Vec::new();
    let mut pipeline = ExpressionPipeline::new();
    let summary = replay(&mut pipeline, input.as_bytes(), &mut output, &ManualClock::new(0)).unwrap();

    assert_eq!(summary.updated, 25);
    assert_eq!(summary.no_face, 1);
    assert_eq!(summary.malformed_lines, 0);

    let ticks: Vec<TickRecord> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(ticks.len(), 26);
    assert_eq!(ticks[5].outcome, TickOutcome::NoFace);
    // State carried across the lost face
    assert_eq!(ticks[5].character, ticks[4].character);
    assert_eq!(ticks.last().unwrap().character.expression, Expression::Surprised);
}

#[test]
fn test_process_record_uses_clock_without_timestamp() {
    let mut pipeline = ExpressionPipeline::new();
    let clock = ManualClock::new(777);
    let tick = process_record(
        &mut pipeline,
        &DetectionRecord {
            timestamp_ms: None,
            faces: vec![FaceBuilder::neutral().build()],
        },
        &clock,
    );

    assert_eq!(tick.timestamp_ms, 777);
    assert_eq!(tick.outcome, TickOutcome::Updated);
    assert_eq!(tick.character.updated_at_ms, Some(777));
}

#[test]
fn test_tick_record_json_shape() {
    let mut pipeline = ExpressionPipeline::new();
    let tick = process_record(&mut pipeline, &DetectionRecord::default(), &ManualClock::new(1));
    let json: serde_json::Value = serde_json::to_value(&tick).unwrap();

    assert_eq!(json["outcome"], "no_face");
    assert_eq!(json["character"]["expression"], "NEUTRAL");
    assert_eq!(json["character"]["style"]["eyebrow_thickness"], 16.0);
}

#[test]
fn test_invalid_utf8_line_is_skipped() {
    let mut input = record(0, vec![FaceBuilder::neutral().build()]).into_bytes();
    input.extend_from_slice(&[b'\n', 0xff, 0xfe, b'\n']);
    input.extend_from_slice(record(33, vec![FaceBuilder::neutral().build()]).as_bytes());

    let mut output = Vec::new();
    let mut pipeline = ExpressionPipeline::new();
    let summary = replay(&mut pipeline, input.as_slice(), &mut output, &ManualClock::new(0)).unwrap();

    assert_eq!(summary.updated, 2);
    assert_eq!(summary.malformed_lines, 1);

    let ticks: Vec<TickRecord> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[1].timestamp_ms, 33);
}
