//! Trace guard: stop-the-line checks for engine postconditions.
//!
//! A trace that breaks a postcondition is a programming defect, not bad
//! input. The guard reports every violation it finds instead of panicking,
//! so callers decide whether to fail fast ([`TraceGuard::check`]) or to
//! list all problems ([`TraceGuard::inspect`]).
//!
//! # Checks
//!
//! 1. **Bounds**: every index is inside `[0, len)`
//! 2. **Arity**: compares name 2 positions, swaps 1 or 2, sorted markers at least 1
//! 3. **Snapshots**: every swap snapshot has the input's length
//! 4. **Order**: the replayed array is non-decreasing
//! 5. **Conservation**: the replayed array is a permutation of the input
//! 6. **Coverage**: `Sorted` markers cover every position

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::{is_sorted, Step, StepKind, Trace};
use crate::error::{SortError, SortResult};

/// One postcondition failure found in a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardViolation {
    /// A step names a position outside the array.
    IndexOutOfRange {
        /// Step index in the trace.
        step: usize,
        /// Offending position.
        index: usize,
        /// Array length.
        len: usize,
    },
    /// A step names the wrong number of positions for its kind.
    BadArity {
        /// Step index in the trace.
        step: usize,
        /// Kind of the step.
        kind: StepKind,
        /// Number of positions found.
        found: usize,
    },
    /// A swap snapshot does not have the input's length.
    SnapshotLength {
        /// Step index in the trace.
        step: usize,
        /// Snapshot length.
        found: usize,
        /// Input length.
        expected: usize,
    },
    /// The replayed array is not in non-decreasing order.
    NotSorted,
    /// The replayed array is not a permutation of the input.
    MultisetChanged,
    /// Some positions were never marked sorted.
    IncompleteCoverage {
        /// Positions without a `Sorted` marker.
        missing: Vec<usize>,
    },
}

impl GuardViolation {
    /// Step the violation is attached to, if any.
    #[must_use]
    pub const fn step(&self) -> Option<usize> {
        match self {
            Self::IndexOutOfRange { step, .. }
            | Self::BadArity { step, .. }
            | Self::SnapshotLength { step, .. } => Some(*step),
            Self::NotSorted | Self::MultisetChanged | Self::IncompleteCoverage { .. } => None,
        }
    }
}

impl fmt::Display for GuardViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { step, index, len } => {
                write!(f, "step {step}: index {index} outside array of length {len}")
            }
            Self::BadArity { step, kind, found } => {
                write!(f, "step {step}: {kind} step names {found} positions")
            }
            Self::SnapshotLength {
                step,
                found,
                expected,
            } => write!(f, "step {step}: snapshot length {found}, expected {expected}"),
            Self::NotSorted => f.write_str("final array is not in non-decreasing order"),
            Self::MultisetChanged => f.write_str("final array is not a permutation of the input"),
            Self::IncompleteCoverage { missing } => {
                write!(f, "positions never marked sorted: {missing:?}")
            }
        }
    }
}

impl From<GuardViolation> for SortError {
    fn from(violation: GuardViolation) -> Self {
        Self::invariant(violation.step(), violation.to_string())
    }
}

/// Postcondition checker for traces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TraceGuard {
    /// Require `Sorted` markers to cover every position.
    pub require_coverage: bool,
}

impl Default for TraceGuard {
    fn default() -> Self {
        Self {
            require_coverage: true,
        }
    }
}

impl TraceGuard {
    /// Guard with every check enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on the first violation.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvariantViolation` describing the first failure.
    pub fn check<T: PartialOrd + Clone>(&self, trace: &Trace<T>) -> SortResult<()> {
        match self.inspect(trace).into_iter().next() {
            Some(violation) => Err(violation.into()),
            None => Ok(()),
        }
    }

    /// Collect every violation in the trace.
    #[must_use]
    pub fn inspect<T: PartialOrd + Clone>(&self, trace: &Trace<T>) -> Vec<GuardViolation> {
        let len = trace.array_len();
        let mut violations = Vec::new();

        for (i, step) in trace.steps().iter().enumerate() {
            Self::check_step(i, step, len, &mut violations);
        }

        let replayed = trace.final_values();
        if !is_sorted(replayed) {
            violations.push(GuardViolation::NotSorted);
        }
        if !same_multiset(trace.input(), replayed) {
            violations.push(GuardViolation::MultisetChanged);
        }

        if self.require_coverage {
            let covered = trace.sorted_coverage();
            let missing: Vec<usize> = (0..len).filter(|i| !covered.contains(i)).collect();
            if !missing.is_empty() {
                violations.push(GuardViolation::IncompleteCoverage { missing });
            }
        }

        violations
    }

    fn check_step<T>(i: usize, step: &Step<T>, len: usize, out: &mut Vec<GuardViolation>) {
        let found = step.indices().len();
        let arity_ok = match step.kind() {
            StepKind::Compare => found == 2,
            StepKind::Swap => (1..=2).contains(&found),
            StepKind::Sorted => found >= 1,
        };
        if !arity_ok {
            out.push(GuardViolation::BadArity {
                step: i,
                kind: step.kind(),
                found,
            });
        }

        for &index in step.indices() {
            if index >= len {
                out.push(GuardViolation::IndexOutOfRange {
                    step: i,
                    index,
                    len,
                });
            }
        }

        if let Some(snapshot) = step.snapshot() {
            if snapshot.len() != len {
                out.push(GuardViolation::SnapshotLength {
                    step: i,
                    found: snapshot.len(),
                    expected: len,
                });
            }
        }
    }
}

/// Compare two slices as multisets using only `PartialOrd`.
fn same_multiset<T: PartialOrd + Clone>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    let by_order = |x: &T, y: &T| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal);
    a.sort_by(by_order);
    b.sort_by(by_order);
    a.iter()
        .zip(&b)
        .all(|(x, y)| x.partial_cmp(y) == Some(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry::{descriptor, AlgorithmId};

    #[test]
    fn test_guard_accepts_registry_traces() {
        let guard = TraceGuard::new();
        for id in AlgorithmId::ALL {
            let trace = descriptor(id).run(&[9, 4, 7, 4, 1, 12, 0]);
            assert!(guard.check(&trace).is_ok(), "{id} failed the guard");
        }
    }

    #[test]
    fn test_guard_detects_out_of_range_index() {
        let trace: Trace = Trace::new(
            vec![1, 2],
            vec![
                Step::Compare { indices: [0, 5] },
                Step::Sorted { indices: vec![0, 1] },
            ],
        );
        let violations = TraceGuard::new().inspect(&trace);
        assert_eq!(
            violations,
            vec![GuardViolation::IndexOutOfRange {
                step: 0,
                index: 5,
                len: 2
            }]
        );
    }

    #[test]
    fn test_guard_detects_snapshot_length() {
        let trace: Trace = Trace::new(
            vec![2, 1],
            vec![Step::Swap {
                indices: vec![0, 1],
                array: vec![1, 2, 3],
            }],
        );
        let violations = TraceGuard {
            require_coverage: false,
        }
        .inspect(&trace);
        assert!(violations.contains(&GuardViolation::SnapshotLength {
            step: 0,
            found: 3,
            expected: 2
        }));
        assert!(violations.contains(&GuardViolation::MultisetChanged));
    }

    #[test]
    fn test_guard_detects_bad_arity() {
        let trace: Trace = Trace::new(
            vec![1],
            vec![
                Step::Swap {
                    indices: vec![],
                    array: vec![1],
                },
                Step::Sorted { indices: vec![0] },
            ],
        );
        let violations = TraceGuard::new().inspect(&trace);
        assert_eq!(
            violations,
            vec![GuardViolation::BadArity {
                step: 0,
                kind: StepKind::Swap,
                found: 0
            }]
        );
    }

    #[test]
    fn test_guard_detects_unsorted_result() {
        let trace: Trace = Trace::new(vec![2, 1], vec![Step::Sorted { indices: vec![0, 1] }]);
        let err = TraceGuard::new().check(&trace);
        assert!(matches!(err, Err(SortError::InvariantViolation { step: None, .. })));
    }

    #[test]
    fn test_guard_detects_missing_coverage() {
        let trace: Trace = Trace::new(vec![1, 2, 3], vec![Step::Sorted { indices: vec![1] }]);
        let violations = TraceGuard::new().inspect(&trace);
        assert_eq!(
            violations,
            vec![GuardViolation::IncompleteCoverage {
                missing: vec![0, 2]
            }]
        );

        let relaxed = TraceGuard {
            require_coverage: false,
        };
        assert!(relaxed.inspect(&trace).is_empty());
    }

    #[test]
    fn test_guard_empty_trace_is_valid() {
        let trace: Trace = Trace::new(Vec::new(), Vec::new());
        assert!(TraceGuard::new().check(&trace).is_ok());
    }

    #[test]
    fn test_violation_to_error_keeps_step() {
        let err: SortError = GuardViolation::IndexOutOfRange {
            step: 4,
            index: 9,
            len: 3,
        }
        .into();
        assert!(matches!(err, SortError::InvariantViolation { step: Some(4), .. }));
        assert!(err.to_string().contains("index 9"));
    }
}
