//! Per-channel temporal smoothing of brow measurements.
//!
//! Every raw sample runs through four stages in order:
//! 1. dead zone against the previous raw sample
//! 2. moving average of the last few raw samples
//! 3. velocity-adaptive EMA towards that average
//! 4. hysteresis gate that only commits persistent jumps
//!
//! A sample rejected at any stage leaves the reported value unchanged.

use crate::config::SmoothingConfig;
use crate::features::BrowGeometry;
use crate::filters::{
    dead_zone::DeadZone, exponential::AlphaSchedule, hysteresis::HysteresisGate, moving_average::MovingAverage,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// The smoothed scalar channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    LeftBrowY,
    RightBrowY,
    LeftBrowAngle,
    RightBrowAngle,
}

impl Channel {
    /// All channels in storage order
    pub const ALL: [Channel; 4] = [
        Channel::LeftBrowY,
        Channel::RightBrowY,
        Channel::LeftBrowAngle,
        Channel::RightBrowAngle,
    ];

    const fn index(self) -> usize {
        match self {
            Channel::LeftBrowY => 0,
            Channel::RightBrowY => 1,
            Channel::LeftBrowAngle => 2,
            Channel::RightBrowAngle => 3,
        }
    }

    /// Read this channel out of a brow measurement
    #[must_use]
    pub fn select(self, brows: &BrowGeometry) -> f64 {
        match self {
            Channel::LeftBrowY => brows.left_y,
            Channel::RightBrowY => brows.right_y,
            Channel::LeftBrowAngle => brows.left_angle,
            Channel::RightBrowAngle => brows.right_angle,
        }
    }

    /// Stable name used in logs and records
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Channel::LeftBrowY => "left_brow_y",
            Channel::RightBrowY => "right_brow_y",
            Channel::LeftBrowAngle => "left_brow_angle",
            Channel::RightBrowAngle => "right_brow_angle",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Smoothing history of one channel
#[derive(Debug, Clone)]
pub struct ChannelState {
    dead_zone: DeadZone,
    buffer: MovingAverage,
    smoothed: f64,
    gate: HysteresisGate,
}

impl ChannelState {
    /// Seed a channel from its first sample so it starts without a transient
    fn seeded(config: &SmoothingConfig, first_raw: f64) -> Self {
        let mut buffer = MovingAverage::new(config.buffer_size);
        buffer.push(first_raw);
        Self {
            dead_zone: DeadZone::seeded(config.dead_zone, first_raw),
            buffer,
            smoothed: first_raw,
            gate: HysteresisGate::new(config.hysteresis_threshold, config.target_tolerance, config.sustain_frames),
        }
    }

    /// Currently reported value
    #[must_use]
    pub fn smoothed(&self) -> f64 {
        self.smoothed
    }

    /// Raw sample of the previous call
    #[must_use]
    pub fn previous_raw(&self) -> f64 {
        self.dead_zone.previous().unwrap_or(self.smoothed)
    }

    /// Raw samples currently averaged, oldest first
    #[must_use]
    pub fn buffered(&self) -> &VecDeque<f64> {
        self.buffer.samples()
    }

    /// Jump target awaiting confirmation, if any
    #[must_use]
    pub fn pending_target(&self) -> Option<f64> {
        self.gate.pending_target()
    }

    /// Consecutive frames the pending target has been seen
    #[must_use]
    pub fn sustain_count(&self) -> u32 {
        self.gate.sustain_count()
    }

    fn update(&mut self, schedule: &AlphaSchedule, raw: f64) -> f64 {
        if !self.dead_zone.admit(raw) {
            return self.smoothed;
        }

        let buffered = self.buffer.push(raw);
        let ema = schedule.blend(self.smoothed, buffered);
        self.smoothed = self.gate.apply(self.smoothed, ema);
        self.smoothed
    }
}

/// Owns the smoothing state of every channel
#[derive(Debug, Clone)]
pub struct TemporalSmoother {
    config: SmoothingConfig,
    schedule: AlphaSchedule,
    channels: [Option<ChannelState>; 4],
}

impl Default for TemporalSmoother {
    fn default() -> Self {
        Self::new()
    }
}

impl TemporalSmoother {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SmoothingConfig::default())
    }

    /// Smoother with explicit tuning.
    ///
    /// `config` is expected to pass [`crate::config::Config::validate`];
    /// negative widths or an empty buffer panic on the first sample.
    #[must_use]
    pub fn with_config(config: SmoothingConfig) -> Self {
        let schedule = config.alpha_schedule();
        Self {
            config,
            schedule,
            channels: [None, None, None, None],
        }
    }

    /// Feed one raw sample for `channel` and return its smoothed value.
    ///
    /// The first sample of a channel is returned as-is and seeds its state.
    pub fn smooth(&mut self, channel: Channel, raw: f64) -> f64 {
        let slot = &mut self.channels[channel.index()];
        if let Some(state) = slot {
            return state.update(&self.schedule, raw);
        }

        log::debug!("Initialising channel {} at {:.3}", channel, raw);
        *slot = Some(ChannelState::seeded(&self.config, raw));
        raw
    }

    /// Smooth all four brow channels of one frame
    pub fn smooth_brows(&mut self, raw: &BrowGeometry) -> BrowGeometry {
        BrowGeometry {
            left_y: self.smooth(Channel::LeftBrowY, raw.left_y),
            right_y: self.smooth(Channel::RightBrowY, raw.right_y),
            left_angle: self.smooth(Channel::LeftBrowAngle, raw.left_angle),
            right_angle: self.smooth(Channel::RightBrowAngle, raw.right_angle),
        }
    }

    /// Current smoothed value, `None` before the first sample
    #[must_use]
    pub fn value(&self, channel: Channel) -> Option<f64> {
        self.state(channel).map(ChannelState::smoothed)
    }

    #[must_use]
    pub fn state(&self, channel: Channel) -> Option<&ChannelState> {
        self.channels[channel.index()].as_ref()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.channels.iter().all(Option::is_some)
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.channels = [None, None, None, None];
    }
}
