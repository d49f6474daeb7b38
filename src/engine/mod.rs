//! Trace-generating sort engine.
//!
//! Every algorithm is a pure function from an input slice to a [`Trace`]:
//! - The caller's slice is never mutated (algorithms sort a private copy)
//! - Each comparison, write and finalization becomes one [`Step`]
//! - The whole trace is computed eagerly, before any playback starts
//!
//! Timing is not the engine's concern; see [`crate::playback`].

pub mod algorithms;
pub mod guard;
pub mod recorder;
pub mod registry;
pub mod rng;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use guard::{GuardViolation, TraceGuard};
pub use recorder::TraceRecorder;
pub use registry::{descriptor, AlgorithmDescriptor, AlgorithmId};
pub use rng::ArrayGenerator;

/// Element type of visualized arrays.
pub type Value = i64;

/// Discriminant of a [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Two positions are being compared.
    Compare,
    /// The array was mutated; the step carries the post-mutation array.
    Swap,
    /// Positions reached their final value.
    Sorted,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::Sorted => "sorted",
        };
        f.write_str(name)
    }
}

/// One recorded event of an algorithm run.
///
/// A `Swap` carries a full copy of the array after the mutation, so a
/// player only ever adopts snapshots and never re-simulates the algorithm.
/// Merge writes are recorded as single-index swaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step<T = Value> {
    /// Compare the values at two positions.
    Compare {
        /// Compared positions, in the order the algorithm tested them.
        indices: [usize; 2],
    },
    /// Positions written, with the array as it stands afterwards.
    Swap {
        /// One or two written positions.
        indices: Vec<usize>,
        /// Array contents after the write.
        array: Vec<T>,
    },
    /// Positions whose value is now final.
    Sorted {
        /// Finalized positions.
        indices: Vec<usize>,
    },
}

impl<T> Step<T> {
    /// Kind of this step.
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        match self {
            Self::Compare { .. } => StepKind::Compare,
            Self::Swap { .. } => StepKind::Swap,
            Self::Sorted { .. } => StepKind::Sorted,
        }
    }

    /// Positions this step refers to.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        match self {
            Self::Compare { indices } => indices.as_slice(),
            Self::Swap { indices, .. } | Self::Sorted { indices } => indices.as_slice(),
        }
    }

    /// Post-mutation array, present only on `Swap` steps.
    #[must_use]
    pub fn snapshot(&self) -> Option<&[T]> {
        match self {
            Self::Swap { array, .. } => Some(array.as_slice()),
            Self::Compare { .. } | Self::Sorted { .. } => None,
        }
    }
}

/// Per-kind step totals of a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceCounts {
    /// Number of `Compare` steps.
    pub compares: usize,
    /// Number of `Swap` steps.
    pub swaps: usize,
    /// Number of `Sorted` steps.
    pub sorted: usize,
}

/// Complete, immutable record of one algorithm run on one input.
///
/// The input is kept alongside the steps so that the trace alone is enough
/// to rebuild the array at any cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace<T = Value> {
    input: Vec<T>,
    steps: Vec<Step<T>>,
}

impl<T> Trace<T> {
    /// Assemble a trace from its parts.
    #[must_use]
    pub fn new(input: Vec<T>, steps: Vec<Step<T>>) -> Self {
        Self { input, steps }
    }

    /// Array the algorithm started from.
    #[must_use]
    pub fn input(&self) -> &[T] {
        &self.input
    }

    /// Recorded steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    /// Step at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step<T>> {
        self.steps.get(index)
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trace has no steps at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Length of the sorted array.
    #[must_use]
    pub fn array_len(&self) -> usize {
        self.input.len()
    }

    /// Array after replaying every snapshot: the last `Swap` snapshot, or
    /// the untouched input if the algorithm never wrote.
    #[must_use]
    pub fn final_values(&self) -> &[T] {
        self.steps
            .iter()
            .rev()
            .find_map(Step::snapshot)
            .unwrap_or(self.input.as_slice())
    }

    /// Union of all positions marked by `Sorted` steps.
    #[must_use]
    pub fn sorted_coverage(&self) -> BTreeSet<usize> {
        self.steps
            .iter()
            .filter(|s| s.kind() == StepKind::Sorted)
            .flat_map(|s| s.indices().iter().copied())
            .collect()
    }

    /// Totals per step kind.
    #[must_use]
    pub fn counts(&self) -> TraceCounts {
        self.steps
            .iter()
            .fold(TraceCounts::default(), |mut acc, step| {
                match step.kind() {
                    StepKind::Compare => acc.compares += 1,
                    StepKind::Swap => acc.swaps += 1,
                    StepKind::Sorted => acc.sorted += 1,
                }
                acc
            })
    }
}

/// Check that a slice is in non-decreasing order.
#[must_use]
pub fn is_sorted<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
