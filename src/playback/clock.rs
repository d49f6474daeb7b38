//! Playback clock.
//!
//! Maps a speed percentage to a tick interval and counts ticks:
//! - Linear mapping from `[1, 100]` onto `[max_interval, min_interval]`
//! - Higher speed always gives a shorter or equal interval
//! - Speed changes apply to the next scheduled tick only

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Speed percentage, always within `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Speed(u8);

impl Speed {
    /// Slowest speed.
    pub const MIN: Self = Self(1);
    /// Fastest speed.
    pub const MAX: Self = Self(100);

    /// Create a speed, clamping into `[1, 100]`.
    #[must_use]
    pub fn new(percent: u8) -> Self {
        Self(percent.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Speed as a percentage.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Speed raised by `delta`, saturating at 100.
    #[must_use]
    pub fn faster(self, delta: u8) -> Self {
        Self::new(self.0.saturating_add(delta))
    }

    /// Speed lowered by `delta`, saturating at 1.
    #[must_use]
    pub fn slower(self, delta: u8) -> Self {
        Self::new(self.0.saturating_sub(delta))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::MAX
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Tick clock for playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickClock {
    /// Interval at speed 100.
    min_interval: Duration,
    /// Interval at speed 1.
    max_interval: Duration,
    /// Current speed.
    speed: Speed,
    /// Number of ticks fired.
    tick_count: u64,
}

impl TickClock {
    /// Create a clock with the given interval bounds.
    ///
    /// Bounds are reordered if given backwards.
    #[must_use]
    pub fn new(min_interval: Duration, max_interval: Duration, speed: Speed) -> Self {
        let (min_interval, max_interval) = if min_interval <= max_interval {
            (min_interval, max_interval)
        } else {
            (max_interval, min_interval)
        };
        Self {
            min_interval,
            max_interval,
            speed,
            tick_count: 0,
        }
    }

    /// Current speed.
    #[must_use]
    pub const fn speed(&self) -> Speed {
        self.speed
    }

    /// Change the speed; affects the next interval computed.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Interval for the current speed.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval_for(self.speed)
    }

    /// Interval for an arbitrary speed.
    ///
    /// `max - (speed - 1) * (max - min) / 99`, computed in whole
    /// microseconds.
    #[must_use]
    pub fn interval_for(&self, speed: Speed) -> Duration {
        let span = (self.max_interval - self.min_interval).as_micros();
        let steps = u128::from(speed.percent() - 1);
        let reduction = span * steps / 99;
        let micros = self.max_interval.as_micros().saturating_sub(reduction);
        Duration::from_micros(u64::try_from(micros).unwrap_or(u64::MAX))
    }

    /// Record one fired tick.
    pub fn tick(&mut self) -> u64 {
        self.tick_count += 1;
        self.tick_count
    }

    /// Number of ticks fired.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Reset the tick counter.
    pub fn reset(&mut self) {
        self.tick_count = 0;
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(100),
            Duration::from_millis(991),
            Speed::default(),
        )
    }
}
