//! Thread-safe handle to a playback driver.
//!
//! All mutation goes through one mutex, so a tick is atomic with respect to
//! every reader and every other transition.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::{PlaybackDriver, RenderFrame};

/// Cloneable, lock-protected driver handle.
#[derive(Debug, Clone)]
pub struct SharedDriver {
    inner: Arc<Mutex<PlaybackDriver>>,
}

impl SharedDriver {
    /// Wrap a driver.
    #[must_use]
    pub fn new(driver: PlaybackDriver) -> Self {
        Self {
            inner: Arc::new(Mutex::new(driver)),
        }
    }

    /// Exclusive access to the driver.
    ///
    /// A poisoned lock is recovered: the driver never leaves a transition
    /// half-applied, so its state is still consistent.
    pub fn lock(&self) -> MutexGuard<'_, PlaybackDriver> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Run `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackDriver) -> R) -> R {
        f(&mut self.lock())
    }

    /// Poll the driver under the lock.
    pub fn poll(&self, now: Duration) -> bool {
        self.lock().poll(now)
    }

    /// Snapshot for renderers.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        self.lock().frame()
    }
}

impl From<PlaybackDriver> for SharedDriver {
    fn from(driver: PlaybackDriver) -> Self {
        Self::new(driver)
    }
}
