//! Replaying recorded detection results through the pipeline.
//!
//! Input is JSON Lines, one detection result per line:
//!
//! ```text
//! {"timestamp_ms": 1200, "faces": [[{"x": 101.5, "y": 88.0}, ...]]}
//! ```
//!
//! `timestamp_ms` is optional; missing timestamps are read from the clock
//! passed to [`replay`]. Every processed line produces one [`TickRecord`].

use crate::clock::TimeSource;
use crate::landmarks::LandmarkFrame;
use crate::pipeline::{CharacterState, ExpressionPipeline, TickOutcome};
use crate::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// One detection cycle of the external face tracker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Detection time; falls back to the replay clock
    #[serde(default)]
    pub timestamp_ms: Option<u64>,
    /// Zero or one face frames
    #[serde(default)]
    pub faces: Vec<LandmarkFrame>,
}

/// Pipeline output for one detection cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub timestamp_ms: u64,
    pub outcome: TickOutcome,
    pub character: CharacterState,
}

/// Counts of what a replay did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub updated: usize,
    pub no_face: usize,
    pub invalid: usize,
    pub malformed_lines: usize,
}

impl ReplaySummary {
    fn record(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Updated => self.updated += 1,
            TickOutcome::NoFace => self.no_face += 1,
            TickOutcome::InvalidMeasurement => self.invalid += 1,
        }
    }

    /// Number of ticks that reached the pipeline
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.updated + self.no_face + self.invalid
    }
}

/// Run one record through the pipeline
pub fn process_record(
    pipeline: &mut ExpressionPipeline,
    record: &DetectionRecord,
    clock: &dyn TimeSource,
) -> TickRecord {
    let timestamp_ms = record.timestamp_ms.unwrap_or_else(|| clock.now_ms());
    let outcome = pipeline.process(&record.faces, timestamp_ms);
    TickRecord {
        timestamp_ms,
        outcome,
        character: *pipeline.character(),
    }
}

/// Replay every line of `reader`, writing one JSON line per tick to `writer`.
///
/// Blank lines are skipped. Lines that are not UTF-8 or fail to parse are
/// logged and counted, so one bad record does not end the replay.
///
/// # Errors
///
/// Returns an error if reading the input or writing the output fails
pub fn replay<R: BufRead, W: Write>(
    pipeline: &mut ExpressionPipeline,
    mut reader: R,
    mut writer: W,
    clock: &dyn TimeSource,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!("Skipping non UTF-8 record on line {}: {}", line_no, e);
                summary.malformed_lines += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let record: DetectionRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping malformed record on line {}: {}", line_no, e);
                summary.malformed_lines += 1;
                continue;
            }
        };

        let tick = process_record(pipeline, &record, clock);
        summary.record(tick.outcome);

        serde_json::to_writer(&mut writer, &tick)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    info!(
        "Replayed {} ticks: {} updated, {} without face, {} invalid, {} malformed lines",
        summary.ticks(),
        summary.updated,
        summary.no_face,
        summary.invalid,
        summary.malformed_lines
    );

    Ok(summary)
}
