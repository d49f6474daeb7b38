//! # sortviz
//!
//! Step-recording sorting engine with a replayable playback driver.
//!
//! Sorting runs in two phases that never overlap:
//! - **Engine**: each algorithm sorts a private copy of the input and records
//!   every comparison, swap and finalization as a [`engine::Step`].
//! - **Playback**: a [`playback::PlaybackDriver`] replays the recorded
//!   [`engine::Trace`] one step per tick at a user-chosen speed and exposes
//!   a renderable [`playback::RenderFrame`].
//!
//! ## Example
//!
//! ```rust
//! use sortviz::prelude::*;
//!
//! let trace = descriptor(AlgorithmId::Bubble).run(&[5, 3, 8, 1]);
//! assert_eq!(trace.final_values(), &[1, 3, 5, 8]);
//! assert!(TraceGuard::new().check(&trace).is_ok());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Index loops mirror the textbook algorithms
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod playback;
pub mod replay;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{VisualizerConfig, VisualizerConfigBuilder};
    pub use crate::engine::registry::{descriptor, AlgorithmDescriptor, AlgorithmId};
    pub use crate::engine::guard::{GuardViolation, TraceGuard};
    pub use crate::engine::rng::ArrayGenerator;
    pub use crate::engine::{Step, StepKind, Trace, Value};
    pub use crate::error::{SortError, SortResult};
    pub use crate::playback::{PlayState, PlaybackDriver, PlaybackState, RenderFrame, Speed};
}

/// Re-export for public API
pub use error::{SortError, SortResult};
