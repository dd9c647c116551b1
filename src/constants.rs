//! Constants used throughout the pipeline

/// Number of points in the face-mesh landmark topology
pub const NUM_FACE_MESH_LANDMARKS: usize = 468;

/// Brow-to-eye gap range (pixels) that the remap treats as nominal
pub const BROW_OFFSET_INPUT_MIN: f64 = 20.0;
pub const BROW_OFFSET_INPUT_MAX: f64 = 50.0;

/// Remapped brow offset range. The larger gap lands on the negative end.
pub const BROW_OFFSET_OUTPUT_RAISED: f64 = -40.0;
pub const BROW_OFFSET_OUTPUT_LOWERED: f64 = 20.0;

/// Lip distance range mapped onto [0, 1] openness
pub const MOUTH_OPEN_MIN: f64 = 5.0;
pub const MOUTH_OPEN_MAX: f64 = 30.0;

/// Eyelid distance range mapped onto [0, 1] openness
pub const EYE_OPEN_MIN: f64 = 3.0;
pub const EYE_OPEN_MAX: f64 = 15.0;

/// Minimum raw change before a sample is considered at all
pub const DEAD_ZONE: f64 = 1.5;

/// Capacity of the per-channel raw sample buffer
pub const SAMPLE_BUFFER_SIZE: usize = 3;

/// Velocity breakpoints for the adaptive EMA weight
pub const VELOCITY_SLOW: f64 = 1.0;
pub const VELOCITY_MEDIUM: f64 = 3.0;
pub const VELOCITY_FAST: f64 = 15.0;

/// EMA weight given to the previous smoothed value at each breakpoint
pub const ALPHA_SLOW: f64 = 0.08;
pub const ALPHA_MEDIUM: f64 = 0.15;
pub const ALPHA_FAST: f64 = 0.5;

/// Minimum EMA jump that the hysteresis gate will consider committing
pub const HYSTERESIS_THRESHOLD: f64 = 2.0;

/// How close consecutive candidates must be to count as the same target
pub const HYSTERESIS_TARGET_TOLERANCE: f64 = 0.5;

/// Consecutive consistent frames required before a jump is committed
pub const HYSTERESIS_SUSTAIN_FRAMES: u32 = 2;

/// Expression lock hold window in milliseconds
pub const MIN_LOCK_DURATION_MS: u64 = 200;

/// Confidence needed before the lock moves to a new expression
pub const LOCK_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Classifier rule thresholds
pub const SURPRISED_BROW_Y: f64 = -15.0;
pub const SURPRISED_BROW_Y_FULL: f64 = -40.0;
pub const ANGRY_BROW_ANGLE: f64 = 8.0;
pub const ANGRY_BROW_ANGLE_FULL: f64 = 20.0;
pub const SAD_BROW_ANGLE: f64 = 6.0;
pub const SAD_BROW_ANGLE_FULL: f64 = 15.0;
pub const NEUTRAL_BROW_Y: f64 = 10.0;
pub const NEUTRAL_BROW_ANGLE: f64 = 5.0;

/// Confidence range produced by the graded rules
pub const RULE_CONFIDENCE_MIN: f64 = 0.8;
pub const RULE_CONFIDENCE_MAX: f64 = 1.0;

/// Confidence reported for a clearly neutral face
pub const NEUTRAL_CONFIDENCE: f64 = 0.9;
