//! The six classic sorts, each rewritten to emit a [`Trace`].
//!
//! Emission policies are fixed per algorithm so that traces are
//! deterministic and every position is marked `Sorted` exactly when the
//! algorithm's structure finalizes it.
//!
//! All functions are generic over `PartialOrd + Clone` so that tagged values
//! can be used to observe stability; the registry exposes them for
//! [`Value`](crate::engine::Value).

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::bubble_sort;
pub use heap::heap_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

#[cfg(test)]
pub(crate) mod testing {
    use crate::engine::{is_sorted, Step, Trace, Value};
    use std::collections::BTreeSet;

    /// Replay every snapshot in order starting from the input.
    pub fn replay(trace: &Trace) -> Vec<Value> {
        let mut current = trace.input().to_vec();
        for step in trace.steps() {
            if let Some(snapshot) = step.snapshot() {
                current = snapshot.to_vec();
            }
        }
        current
    }

    /// Assert the three core postconditions for one input.
    pub fn assert_postconditions(sort: fn(&[Value]) -> Trace, input: &[Value]) {
        let trace = sort(input);
        let replayed = replay(&trace);

        let mut expected = input.to_vec();
        expected.sort_unstable();
        assert_eq!(replayed, expected, "input {input:?}");
        assert!(is_sorted(&replayed));

        for (i, step) in trace.steps().iter().enumerate() {
            for &idx in step.indices() {
                assert!(idx < input.len(), "step {i} index {idx} out of range");
            }
            if let Step::Swap { array, .. } = step {
                assert_eq!(array.len(), input.len());
            }
        }

        let coverage = trace.sorted_coverage();
        assert_eq!(
            coverage,
            (0..input.len()).collect::<BTreeSet<_>>(),
            "coverage for {input:?}"
        );
    }

    /// Inputs every algorithm must handle.
    pub fn edge_inputs() -> Vec<Vec<Value>> {
        vec![
            vec![],
            vec![7],
            vec![2, 1],
            vec![1, 2],
            vec![2, 2, 2],
            vec![5, 3, 8, 1],
            vec![1, 2, 3, 4, 5, 6],
            vec![6, 5, 4, 3, 2, 1],
            vec![4, 1, 4, 1, 4, 1, 4],
            vec![10, 409, 10, 409, 200, 199, 201],
        ]
    }
}
