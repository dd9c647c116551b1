//! Eyebrow-driven expression tracking for animated avatars.
//!
//! This library turns a noisy per-frame stream of facial landmarks into a
//! stable, discrete expression signal plus the styled eyebrow geometry an
//! avatar renderer needs. Landmarks come from an external face tracker;
//! drawing and animation are left to the caller.
//!
//! Each detection tick flows through:
//! 1. Feature extraction of brow offsets, brow angles and mouth/eye openness
//! 2. Per-channel temporal smoothing (dead zone, moving average, adaptive
//!    EMA, hysteresis gate)
//! 3. Threshold classification with a short expression lock
//! 4. Exaggerated styling of the eyebrows for the reported expression
//!
//! # Examples
//!
//! ## Processing Detection Ticks
//!
//! ```no_run
//! use brow_expression::{landmarks::LandmarkFrame, pipeline::{ExpressionPipeline, TickOutcome}};
//!
//! # fn next_face() -> Option<LandmarkFrame> { None }
//! let mut pipeline = ExpressionPipeline::new();
//!
//! let mut now_ms = 0;
//! while let Some(face) = next_face() {
//!     if pipeline.process(&[face], now_ms) == TickOutcome::Updated {
//!         let character = pipeline.character();
//!         println!("{} ({:.2})", character.expression, character.confidence);
//!     }
//!     now_ms += 33;
//! }
//! ```
//!
//! ## Smoothing a Single Channel
//!
//! ```
//! use brow_expression::smoother::{Channel, TemporalSmoother};
//!
//! let mut smoother = TemporalSmoother::new();
//! assert_eq!(smoother.smooth(Channel::LeftBrowY, 0.0), 0.0);
//!
//! // Jitter inside the dead zone never moves the output
//! assert_eq!(smoother.smooth(Channel::LeftBrowY, 1.0), 0.0);
//! ```
//!
//! ## Loading a Configuration
//!
//! ```no_run
//! use brow_expression::config::Config;
//!
//! # fn main() -> brow_expression::Result<()> {
//! let config = Config::from_file("expression.yaml")?;
//! let pipeline = config.build_pipeline()?;
//! # let _ = pipeline;
//! # Ok(())
//! # }
//! ```

/// Landmark frames and the face-mesh indices the extractor reads
pub mod landmarks;

/// Feature measurements derived from landmark frames
pub mod features;

/// Single-channel filter stages
pub mod filters;

/// Per-channel temporal smoothing
pub mod smoother;

/// Expression classification with temporal locking
pub mod classifier;

/// Per-expression eyebrow styling
pub mod styler;

/// Per-tick pipeline and character output
pub mod pipeline;

/// Millisecond timestamp sources
pub mod clock;

/// JSON Lines replay of recorded detections
pub mod replay;

/// Numeric helpers
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the pipeline
pub mod constants;

/// Configuration management
pub mod config;

pub use classifier::Expression;
pub use error::{Error, Result};
pub use pipeline::{CharacterState, ExpressionPipeline, TickOutcome};
