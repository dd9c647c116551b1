//! Single-channel filter stages used by the temporal smoother.
//!
//! Each stage handles one concern of landmark jitter suppression:
//! - [`dead_zone::DeadZone`] ignores raw changes below a minimum step
//! - [`moving_average::MovingAverage`] averages the last few raw samples
//! - [`exponential::AlphaSchedule`] blends towards the average with a
//!   velocity-dependent weight
//! - [`hysteresis::HysteresisGate`] only commits jumps that persist

/// Minimum-step gate on raw samples
pub mod dead_zone;

/// Fixed-window moving average
pub mod moving_average;

/// Velocity-adaptive exponential smoothing weights
pub mod exponential;

/// Multi-frame commit gate
pub mod hysteresis;
