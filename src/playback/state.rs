//! Playback state: the renderable view of a trace at one cursor position.
//!
//! The state has exactly one writer (the driver or a scrubber) and is only
//! changed by applying recorded steps in order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::engine::{Step, Value};

/// Mutable view of a trace being replayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Current array contents.
    pub values: Vec<Value>,
    /// Number of steps applied so far.
    pub cursor: usize,
    /// Positions of the latest comparison.
    pub comparing: Vec<usize>,
    /// Positions of the latest write.
    pub swapping: Vec<usize>,
    /// Positions marked final; only ever grows within one run.
    pub sorted: BTreeSet<usize>,
}

impl PlaybackState {
    /// Fresh state over `values` with nothing highlighted.
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Apply one step and advance the cursor.
    ///
    /// - `Compare` replaces the comparing set and clears the swapping set
    /// - `Swap` replaces the swapping set, clears the comparing set and
    ///   adopts the snapshot as the current array
    /// - `Sorted` adds its positions to the sorted set
    pub fn apply(&mut self, step: &Step) {
        match step {
            Step::Compare { indices } => {
                self.comparing = indices.to_vec();
                self.swapping.clear();
            }
            Step::Swap { indices, array } => {
                self.swapping.clone_from(indices);
                self.comparing.clear();
                self.values.clone_from(array);
            }
            Step::Sorted { indices } => {
                self.sorted.extend(indices.iter().copied());
            }
        }
        self.cursor += 1;
    }

    /// Mark every position sorted and drop highlights.
    ///
    /// Clearing the comparing and swapping sets is deliberate: a completed
    /// frame carries no stale highlight from the last step, even for a
    /// renderer that does not give `sorted` priority.
    pub fn complete(&mut self) {
        self.sorted = (0..self.values.len()).collect();
        self.comparing.clear();
        self.swapping.clear();
    }

    /// Whether every position is marked sorted.
    #[must_use]
    pub fn is_fully_sorted(&self) -> bool {
        self.sorted.len() == self.values.len()
    }
}
