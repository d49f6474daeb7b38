use crate::engine::{Trace, TraceRecorder};

/// Quick sort with the Lomuto partition scheme.
///
/// The last element of each range is the pivot. Every scanned element is
/// compared against the pivot slot; an exchange is recorded only when the
/// store pointer and the scan pointer differ. The pivot is swapped into its
/// slot only if it moves, then marked sorted. One-element ranges are marked
/// sorted directly.
#[must_use]
pub fn quick_sort<T: PartialOrd + Clone>(input: &[T]) -> Trace<T> {
    let mut rec = TraceRecorder::new(input);
    let n = rec.len();
    sort_range(&mut rec, 0, n);
    rec.finish()
}

/// Sort the half-open range `[lo, hi)`.
fn sort_range<T: PartialOrd + Clone>(rec: &mut TraceRecorder<T>, lo: usize, hi: usize) {
    match hi.saturating_sub(lo) {
        0 => {}
        1 => rec.sorted(lo),
        _ => {
            let pivot = partition(rec, lo, hi - 1);
            rec.sorted(pivot);
            sort_range(rec, lo, pivot);
            sort_range(rec, pivot + 1, hi);
        }
    }
}

/// Partition `[low, high]` around `values[high]`, returning the pivot slot.
fn partition<T: PartialOrd + Clone>(rec: &mut TraceRecorder<T>, low: usize, high: usize) -> usize {
    let pivot = rec.get(high).clone();
    let mut store = low;

    for j in low..high {
        rec.compare(j, high);
        if *rec.get(j) < pivot {
            if store != j {
                rec.swap(store, j);
            }
            store += 1;
        }
    }

    if store != high {
        rec.swap(store, high);
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::testing::{assert_postconditions, edge_inputs};
    use crate::engine::{Step, StepKind};

    #[test]
    fn test_quick_postconditions() {
        for input in edge_inputs() {
            assert_postconditions(quick_sort, &input);
        }
    }

    #[test]
    fn test_quick_compares_against_pivot_slot() {
        let trace = quick_sort(&[3, 1, 2]);
        assert_eq!(trace.steps()[0], Step::Compare { indices: [0, 2] });
        assert_eq!(trace.steps()[1], Step::Compare { indices: [1, 2] });
        // 1 < 2 moves into slot 0.
        assert_eq!(
            trace.steps()[2],
            Step::Swap {
                indices: vec![0, 1],
                array: vec![1, 3, 2],
            }
        );
        // Pivot 2 moves from slot 2 into slot 1.
        assert_eq!(
            trace.steps()[3],
            Step::Swap {
                indices: vec![1, 2],
                array: vec![1, 2, 3],
            }
        );
        assert_eq!(trace.steps()[4], Step::Sorted { indices: vec![1] });
    }

    #[test]
    fn test_quick_pivot_already_in_place() {
        let trace = quick_sort(&[1, 2]);
        assert_eq!(trace.counts().swaps, 0);
        let kinds: Vec<StepKind> = trace.steps().iter().map(Step::kind).collect();
        assert_eq!(
            kinds,
            vec![StepKind::Compare, StepKind::Sorted, StepKind::Sorted]
        );
    }

    #[test]
    fn test_quick_singleton() {
        assert_eq!(
            quick_sort(&[9]).steps(),
            &[Step::Sorted { indices: vec![0] }]
        );
    }
}
