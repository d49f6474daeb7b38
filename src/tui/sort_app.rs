//! Sorting visualizer TUI application state and logic.
//!
//! Terminal I/O is handled by the `sort-tui` binary; this module owns the
//! playback driver, maps keys to driver transitions and keeps the status
//! line shown under the bars.
//!
//! Time is passed in as an offset from application start, so tests can
//! drive the app on virtual time.

use crossterm::event::KeyCode;
use std::time::Duration;

use crate::config::VisualizerConfig;
use crate::error::SortResult;
use crate::playback::{PlayState, PlaybackDriver, RenderFrame, Speed};

/// Speed change per `[`/`]` key press.
pub const SPEED_STEP: u8 = 10;

/// Application state for the sorting visualizer TUI.
#[derive(Debug)]
pub struct SortApp {
    /// The playback driver.
    pub driver: PlaybackDriver,
    /// Time of the latest update, relative to app start.
    pub now: Duration,
    /// Frames drawn so far.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Latest user-facing message.
    pub status: String,
    /// Play state seen at the previous update.
    last_state: PlayState,
}

impl SortApp {
    /// Create the app from a configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation.
    pub fn new(config: VisualizerConfig) -> SortResult<Self> {
        let driver = PlaybackDriver::new(config)?;
        let status = format!(
            "{} values ready (seed {}). Press Space to start.",
            driver.size(),
            driver.seed()
        );
        Ok(Self {
            driver,
            now: Duration::ZERO,
            frame_count: 0,
            should_quit: false,
            status,
            last_state: PlayState::Idle,
        })
    }

    /// Advance the clock and let the driver apply a due step.
    pub fn update(&mut self, now: Duration) {
        self.now = now;
        self.frame_count += 1;
        self.driver.poll(now);
        self.note_transition();
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        let result = match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Char(' ') => self.driver.toggle(self.now),
            KeyCode::Char('r') => {
                self.driver.reset();
                self.status = "Reset complete".to_string();
                Ok(())
            }
            KeyCode::Char('n') => self.driver.regenerate().map(|()| {
                self.status = format!("New array of {} values", self.driver.size());
            }),
            KeyCode::Char('s') => self.driver.step_once().map(|_| ()),
            KeyCode::Char('a') => {
                let next = self.driver.algorithm().next();
                self.driver.set_algorithm(next).map(|()| {
                    self.status = format!("Selected {}", next.descriptor().name);
                })
            }
            KeyCode::Char('+' | '=') => self.resize(true),
            KeyCode::Char('-') => self.resize(false),
            KeyCode::Char(']') => {
                self.driver.set_speed(self.driver.speed().faster(SPEED_STEP));
                self.status = format!("Speed {}", self.driver.speed());
                Ok(())
            }
            KeyCode::Char('[') => {
                self.driver.set_speed(self.driver.speed().slower(SPEED_STEP));
                self.status = format!("Speed {}", self.driver.speed());
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            self.status = e.to_string();
        }
        self.note_transition();
    }

    fn resize(&mut self, grow: bool) -> SortResult<()> {
        let step = self.driver.config().array.size_step;
        let current = self.driver.size();
        let target = if grow {
            current.saturating_add(step)
        } else {
            current.saturating_sub(step)
        };
        let size = self.driver.set_size(target)?;
        self.status = format!("Array size {size}");
        Ok(())
    }

    /// Update the status line when the play state changed.
    fn note_transition(&mut self) {
        let state = self.driver.play_state();
        if state == self.last_state {
            return;
        }
        match state {
            PlayState::Running if self.last_state == PlayState::Paused => {
                self.status = "Resumed".to_string();
            }
            PlayState::Running => {
                self.status = format!("Started {}!", self.driver.algorithm().descriptor().name);
            }
            PlayState::Paused => self.status = "Sorting paused".to_string(),
            PlayState::Completed => self.status = "Sorting completed!".to_string(),
            PlayState::Idle => {}
        }
        self.last_state = state;
    }

    /// Snapshot for drawing.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        self.driver.frame()
    }

    /// Whether the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current speed.
    #[must_use]
    pub const fn speed(&self) -> Speed {
        self.driver.speed()
    }

    /// Time to sleep before the next step is due, capped at `max`.
    #[must_use]
    pub fn poll_timeout(&self, now: Duration, max: Duration) -> Duration {
        self.driver
            .time_until_tick(now)
            .map_or(max, |due| due.min(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry::AlgorithmId;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    fn app() -> SortApp {
        let config = VisualizerConfig::builder().seed(42).size(10).build();
        SortApp::new(config).expect("app")
    }

    fn run_until_done(app: &mut SortApp) {
        let mut now = app.now;
        for _ in 0..100_000 {
            if app.driver.play_state() != PlayState::Running {
                break;
            }
            now += MS(100);
            app.update(now);
        }
    }

    #[test]
    fn test_new_app() {
        let app = app();
        assert!(!app.should_quit());
        assert_eq!(app.frame().values.len(), 10);
        assert_eq!(app.frame().play_state, PlayState::Idle);
        assert!(app.status.contains("seed 42"));
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app2 = self::app();
        app2.handle_key(KeyCode::Esc);
        assert!(app2.should_quit());
    }

    #[test]
    fn test_space_toggles_playback() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.frame().play_state, PlayState::Running);
        assert_eq!(app.status, "Started Bubble Sort!");

        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.frame().play_state, PlayState::Paused);
        assert_eq!(app.status, "Sorting paused");

        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.status, "Resumed");
    }

    #[test]
    fn test_runs_to_completion() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '));
        run_until_done(&mut app);
        let frame = app.frame();
        assert_eq!(frame.play_state, PlayState::Completed);
        assert_eq!(frame.sorted.len(), 10);
        assert!(crate::engine::is_sorted(&frame.values));
        assert_eq!(app.status, "Sorting completed!");
    }

    #[test]
    fn test_step_key() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.frame().cursor, 1);
        assert_eq!(app.frame().play_state, PlayState::Paused);
    }

    #[test]
    fn test_reset_key() {
        let mut app = app();
        let before = app.frame().values;
        app.handle_key(KeyCode::Char(' '));
        app.update(MS(100));
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.frame().play_state, PlayState::Idle);
        assert_eq!(app.frame().cursor, 0);
        assert_ne!(app.frame().values, before);
        assert_eq!(app.status, "Reset complete");
    }

    #[test]
    fn test_new_array_refused_while_running() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '));
        let before = app.frame().values;
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.frame().values, before);
        assert!(app.status.contains("busy"));
    }

    #[test]
    fn test_cycle_algorithm() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.frame().algorithm, AlgorithmId::Selection);
        assert_eq!(app.status, "Selected Selection Sort");
        for _ in 0..5 {
            app.handle_key(KeyCode::Char('a'));
        }
        assert_eq!(app.frame().algorithm, AlgorithmId::Bubble);
    }

    #[test]
    fn test_resize_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.frame().values.len(), 15);
        app.handle_key(KeyCode::Char('='));
        assert_eq!(app.frame().values.len(), 20);
        app.handle_key(KeyCode::Char('-'));
        app.handle_key(KeyCode::Char('-'));
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(app.frame().values.len(), 10);
        assert_eq!(app.status, "Array size 10");
    }

    #[test]
    fn test_speed_keys() {
        let mut app = app();
        assert_eq!(app.speed(), Speed::MAX);
        app.handle_key(KeyCode::Char(']'));
        assert_eq!(app.speed(), Speed::MAX);
        app.handle_key(KeyCode::Char('['));
        assert_eq!(app.speed().percent(), 90);
        assert_eq!(app.status, "Speed 90%");
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut app = app();
        let before = app.frame();
        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.frame(), before);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_poll_timeout() {
        let mut app = app();
        assert_eq!(app.poll_timeout(MS(0), MS(250)), MS(250));
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.poll_timeout(MS(40), MS(250)), MS(60));
    }

    #[test]
    fn test_update_counts_frames() {
        let mut app = app();
        app.update(MS(10));
        app.update(MS(20));
        assert_eq!(app.frame_count, 2);
        assert_eq!(app.now, MS(20));
    }
}
