//! Playback driver: replays a recorded trace one step per tick.
//!
//! The driver is an explicit state machine:
//!
//! ```text
//!   Idle ──start──▶ Running ──pause──▶ Paused
//!                     │  ▲              │
//!                     │  └────resume────┘
//!                     ▼
//!                 Completed
//!   any state ──reset──▶ Idle
//! ```
//!
//! Hosts call [`PlaybackDriver::poll`] with a monotonic time; the driver owns
//! a single pending tick and advances at most one step per due tick.

pub mod clock;
pub mod scheduler;
pub mod shared;
pub mod state;

pub use clock::{Speed, TickClock};
pub use scheduler::{PendingTick, TickScheduler};
pub use shared::SharedDriver;
pub use state::PlaybackState;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use crate::config::VisualizerConfig;
use crate::engine::guard::TraceGuard;
use crate::engine::registry::{descriptor, AlgorithmId};
use crate::engine::rng::ArrayGenerator;
use crate::engine::{Trace, Value};
use crate::error::{SortError, SortResult};
use crate::replay::TraceScrubber;

/// Lifecycle of one playback run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    /// No trace yet, or trace not started.
    #[default]
    Idle,
    /// Advancing one step per tick.
    Running,
    /// Frozen at the current cursor.
    Paused,
    /// Every step applied and every position marked sorted.
    Completed,
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
        })
    }
}

/// Visual role of one bar, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarState {
    /// Position is final.
    Sorted,
    /// Position was just written.
    Swapping,
    /// Position is being compared.
    Comparing,
    /// Nothing to highlight.
    Default,
}

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Current array contents.
    pub values: Vec<Value>,
    /// Positions being compared.
    pub comparing: Vec<usize>,
    /// Positions just written.
    pub swapping: Vec<usize>,
    /// Positions marked final.
    pub sorted: BTreeSet<usize>,
    /// Lifecycle state.
    pub play_state: PlayState,
    /// Steps applied so far.
    pub cursor: usize,
    /// Steps in the current trace (zero before the first start).
    pub total_steps: usize,
    /// Selected algorithm.
    pub algorithm: AlgorithmId,
    /// Current speed.
    pub speed: Speed,
}

impl RenderFrame {
    /// Visual role of position `index`.
    #[must_use]
    pub fn bar_state(&self, index: usize) -> BarState {
        if self.sorted.contains(&index) {
            BarState::Sorted
        } else if self.swapping.contains(&index) {
            BarState::Swapping
        } else if self.comparing.contains(&index) {
            BarState::Comparing
        } else {
            BarState::Default
        }
    }

    /// Largest value in the array, used to scale bars.
    #[must_use]
    pub fn max_value(&self) -> Value {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Fraction of the trace applied, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_steps == 0 {
            return if self.play_state == PlayState::Completed {
                1.0
            } else {
                0.0
            };
        }
        self.cursor as f64 / self.total_steps as f64
    }
}

/// Single-writer owner of the playback state.
#[derive(Debug, Clone)]
pub struct PlaybackDriver {
    config: VisualizerConfig,
    generator: ArrayGenerator,
    algorithm: AlgorithmId,
    size: usize,
    /// Array the current trace was (or will be) computed from.
    input: Vec<Value>,
    /// Recorded trace with its scrubbing checkpoints.
    scrubber: Option<TraceScrubber>,
    state: PlaybackState,
    play_state: PlayState,
    clock: TickClock,
    scheduler: TickScheduler,
}

impl PlaybackDriver {
    /// Create a driver with a freshly generated array.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation.
    pub fn new(config: VisualizerConfig) -> SortResult<Self> {
        config.check()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut generator =
            ArrayGenerator::with_range(seed, config.array.min_value..=config.array.max_value);
        let size = config.array.clamp_size(config.array.size);
        let input = generator.generate(size);
        let clock = TickClock::new(
            config.playback.min_interval(),
            config.playback.max_interval(),
            Speed::new(config.playback.speed),
        );

        info!(
            "playback driver ready: algorithm={} size={size} seed={seed}",
            config.algorithm
        );

        Ok(Self {
            algorithm: config.algorithm,
            generator,
            size,
            state: PlaybackState::new(input.clone()),
            input,
            scrubber: None,
            play_state: PlayState::Idle,
            clock,
            scheduler: TickScheduler::new(),
            config,
        })
    }

    /// Create a driver over caller-supplied values.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation.
    pub fn with_values(config: VisualizerConfig, values: Vec<Value>) -> SortResult<Self> {
        let mut driver = Self::new(config)?;
        driver.load_values(values)?;
        Ok(driver)
    }

    /// Replace the array with caller-supplied values and return to `Idle`.
    ///
    /// The values may have any length. Arrays generated later by `reset` or
    /// `regenerate` use that length clamped to the configured size bounds.
    ///
    /// # Errors
    ///
    /// Returns `SortError::Busy` while running.
    pub fn load_values(&mut self, values: Vec<Value>) -> SortResult<()> {
        self.ensure_not_running("load values")?;
        self.size = self.config.array.clamp_size(values.len());
        debug!("loaded {} caller-supplied values", values.len());
        self.input = values;
        self.rewind();
        Ok(())
    }

    // ===== Transitions =====

    /// Start playback.
    ///
    /// From `Idle` the trace is computed if the current array has none; an
    /// empty trace completes immediately. From `Paused` this resumes.
    /// `Running` and `Completed` are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvariantViolation` if trace verification is
    /// enabled and the computed trace fails the guard.
    pub fn start(&mut self, now: Duration) -> SortResult<()> {
        match self.play_state {
            PlayState::Idle => {
                self.ensure_trace()?;
                self.play_state = PlayState::Running;
                info!("started {}", self.algorithm);
                if self.at_end() {
                    self.finish();
                } else {
                    self.schedule_next(now);
                }
                Ok(())
            }
            PlayState::Paused => {
                self.resume(now);
                Ok(())
            }
            PlayState::Running | PlayState::Completed => Ok(()),
        }
    }

    /// Pause a running playback; returns whether the state changed.
    ///
    /// The pending tick is cancelled; the cursor and highlights are kept.
    pub fn pause(&mut self) -> bool {
        if self.play_state != PlayState::Running {
            return false;
        }
        self.scheduler.cancel();
        self.play_state = PlayState::Paused;
        info!("paused at step {}", self.state.cursor);
        true
    }

    /// Resume a paused playback; returns whether the state changed.
    pub fn resume(&mut self, now: Duration) -> bool {
        if self.play_state != PlayState::Paused {
            return false;
        }
        self.play_state = PlayState::Running;
        info!("resumed at step {}", self.state.cursor);
        self.schedule_next(now);
        true
    }

    /// Start, pause or resume depending on the current state.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::start`].
    pub fn toggle(&mut self, now: Duration) -> SortResult<()> {
        match self.play_state {
            PlayState::Running => {
                self.pause();
                Ok(())
            }
            PlayState::Idle | PlayState::Paused | PlayState::Completed => self.start(now),
        }
    }

    /// Discard trace and state, generate a new array and return to `Idle`.
    ///
    /// Allowed from any state.
    pub fn reset(&mut self) {
        self.input = self.generator.generate(self.size);
        self.rewind();
        info!("reset with a new array of {} values", self.size);
    }

    /// Generate a new array; refused while running.
    ///
    /// # Errors
    ///
    /// Returns `SortError::Busy` while running.
    pub fn regenerate(&mut self) -> SortResult<()> {
        self.ensure_not_running("generate a new array")?;
        self.reset();
        Ok(())
    }

    /// Select another algorithm; the current array is kept and playback
    /// returns to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `SortError::Busy` while running.
    pub fn set_algorithm(&mut self, algorithm: AlgorithmId) -> SortResult<()> {
        self.ensure_not_running("change algorithm")?;
        self.algorithm = algorithm;
        self.rewind();
        debug!("algorithm set to {algorithm}");
        Ok(())
    }

    /// Resize the array (clamped to the configured bounds) and regenerate it.
    ///
    /// Returns the size actually applied.
    ///
    /// # Errors
    ///
    /// Returns `SortError::Busy` while running.
    pub fn set_size(&mut self, size: usize) -> SortResult<usize> {
        self.ensure_not_running("resize the array")?;
        self.size = self.config.array.clamp_size(size);
        self.reset();
        Ok(self.size)
    }

    /// Change the speed. A pending tick keeps its deadline; the new interval
    /// applies from the next scheduled tick.
    pub fn set_speed(&mut self, speed: Speed) {
        self.clock.set_speed(speed);
        debug!("speed set to {speed} ({:?} per tick)", self.clock.interval());
    }

    /// Advance if the pending tick is due; returns whether a step was applied.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.play_state != PlayState::Running || self.scheduler.poll(now).is_none() {
            return false;
        }
        let applied = self.advance();
        if self.at_end() {
            self.finish();
        } else {
            self.schedule_next(now);
        }
        applied
    }

    /// Apply exactly one step outside of timed playback.
    ///
    /// Computes the trace if needed. Leaves the driver `Paused`, or
    /// `Completed` when the last step is applied. Returns whether a step
    /// was applied.
    ///
    /// # Errors
    ///
    /// Returns `SortError::Busy` while running, or a guard failure when
    /// the trace is computed with verification enabled.
    pub fn step_once(&mut self) -> SortResult<bool> {
        self.ensure_not_running("single-step")?;
        if self.play_state == PlayState::Completed {
            return Ok(false);
        }
        self.ensure_trace()?;
        let applied = self.advance();
        if self.at_end() {
            self.finish();
        } else {
            self.play_state = PlayState::Paused;
        }
        Ok(applied)
    }

    /// Jump to the state after `target` steps.
    ///
    /// The state is rebuilt exactly, so seeking backwards can shrink the
    /// sorted set. Seeking to the end completes the run; any other target
    /// leaves the driver `Paused`.
    ///
    /// # Errors
    ///
    /// Returns `SortError::Busy` while running, `SortError::NoTrace` before
    /// the first start and `SortError::SeekOutOfRange` past the end.
    pub fn seek(&mut self, target: usize) -> SortResult<()> {
        self.ensure_not_running("seek")?;
        let scrubber = self.scrubber.as_mut().ok_or(SortError::NoTrace)?;
        self.state = scrubber.seek_to(target)?;
        debug!("seek to step {target}");
        if self.at_end() {
            self.finish();
        } else {
            self.play_state = PlayState::Paused;
        }
        Ok(())
    }

    /// Snapshot for renderers.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            values: self.state.values.clone(),
            comparing: self.state.comparing.clone(),
            swapping: self.state.swapping.clone(),
            sorted: self.state.sorted.clone(),
            play_state: self.play_state,
            cursor: self.state.cursor,
            total_steps: self.total_steps(),
            algorithm: self.algorithm,
            speed: self.clock.speed(),
        }
    }

    // ===== Accessors =====

    /// Lifecycle state.
    #[must_use]
    pub const fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// Current playback state.
    #[must_use]
    pub const fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Selected algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Size of generated arrays, always within the configured bounds.
    ///
    /// Loaded values may have another length; see [`Self::input`].
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Current speed.
    #[must_use]
    pub const fn speed(&self) -> Speed {
        self.clock.speed()
    }

    /// Interval the next scheduled tick will use.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.clock.interval()
    }

    /// Ticks fired since the last reset.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.clock.tick_count()
    }

    /// Array the trace is computed from.
    #[must_use]
    pub fn input(&self) -> &[Value] {
        &self.input
    }

    /// Current trace, once computed.
    #[must_use]
    pub fn trace(&self) -> Option<&Trace> {
        self.scrubber.as_ref().map(TraceScrubber::trace)
    }

    /// Steps in the current trace (zero before the first start).
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.trace().map_or(0, Trace::len)
    }

    /// Seed of the array generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Configuration the driver was built from.
    #[must_use]
    pub const fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Pending tick, if one is scheduled.
    #[must_use]
    pub const fn pending_tick(&self) -> Option<PendingTick> {
        self.scheduler.pending()
    }

    /// Time until the pending tick is due.
    #[must_use]
    pub fn time_until_tick(&self, now: Duration) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    // ===== Internals =====

    fn ensure_not_running(&self, action: &'static str) -> SortResult<()> {
        if self.play_state == PlayState::Running {
            return Err(SortError::Busy(action));
        }
        Ok(())
    }

    fn ensure_trace(&mut self) -> SortResult<()> {
        if self.scrubber.is_some() {
            return Ok(());
        }
        let trace = descriptor(self.algorithm).run(&self.input);
        if self.config.playback.verify_traces {
            TraceGuard::new().check(&trace)?;
        }
        let counts = trace.counts();
        debug!(
            "computed {} trace: {} steps ({} compares, {} swaps, {} sorted)",
            self.algorithm,
            trace.len(),
            counts.compares,
            counts.swaps,
            counts.sorted
        );
        self.scrubber = Some(TraceScrubber::new(
            trace,
            self.config.playback.checkpoint_interval,
        ));
        Ok(())
    }

    /// Drop the trace and return to `Idle` over the current input.
    fn rewind(&mut self) {
        self.scheduler.cancel();
        self.clock.reset();
        self.scrubber = None;
        self.state = PlaybackState::new(self.input.clone());
        self.play_state = PlayState::Idle;
    }

    fn advance(&mut self) -> bool {
        let Some(scrubber) = self.scrubber.as_mut() else {
            return false;
        };
        let Some(step) = scrubber.trace().get(self.state.cursor) else {
            return false;
        };
        trace!("step {}: {} {:?}", self.state.cursor, step.kind(), step.indices());
        self.state.apply(step);
        scrubber.observe(&self.state);
        self.clock.tick();
        true
    }

    fn at_end(&self) -> bool {
        self.state.cursor >= self.total_steps()
    }

    fn finish(&mut self) {
        self.scheduler.cancel();
        self.state.complete();
        self.play_state = PlayState::Completed;
        info!(
            "{} completed after {} steps",
            self.algorithm, self.state.cursor
        );
    }

    fn schedule_next(&mut self, now: Duration) {
        let tick = self.scheduler.schedule(now, self.clock.interval());
        trace!("tick {} due at {:?}", tick.generation, tick.due);
    }
}
