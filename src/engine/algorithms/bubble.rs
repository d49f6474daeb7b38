use crate::engine::{Trace, TraceRecorder};

/// Bubble sort with early exit.
///
/// Each pass compares adjacent pairs and swaps inverted ones. The last slot
/// of the unsorted suffix is marked `Sorted` after every pass. A pass with
/// no swaps ends the run and marks the untouched prefix (except index 0) in
/// one step. Index 0 is marked last because the pass structure never
/// reaches it on its own.
#[must_use]
pub fn bubble_sort<T: PartialOrd + Clone>(input: &[T]) -> Trace<T> {
    let mut rec = TraceRecorder::new(input);
    let n = rec.len();

    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            rec.compare(j, j + 1);
            if rec.get(j) > rec.get(j + 1) {
                rec.swap(j, j + 1);
                swapped = true;
            }
        }
        rec.sorted(n - i - 1);
        if !swapped {
            // A clean pass means the remaining prefix is already in order.
            rec.sorted_range(1..n - i - 1);
            break;
        }
    }

    if n > 0 {
        rec.sorted(0);
    }
    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::testing::{assert_postconditions, edge_inputs};
    use crate::engine::Step;

    #[test]
    fn test_bubble_postconditions() {
        for input in edge_inputs() {
            assert_postconditions(bubble_sort, &input);
        }
    }

    #[test]
    fn test_bubble_trace_prefix() {
        let trace = bubble_sort(&[5, 3, 8, 1]);
        let expected: Vec<Step> = vec![
            Step::Compare { indices: [0, 1] },
            Step::Swap {
                indices: vec![0, 1],
                array: vec![3, 5, 8, 1],
            },
            Step::Compare { indices: [1, 2] },
            Step::Compare { indices: [2, 3] },
            Step::Swap {
                indices: vec![2, 3],
                array: vec![3, 5, 1, 8],
            },
            Step::Sorted { indices: vec![3] },
        ];
        assert_eq!(&trace.steps()[..6], expected.as_slice());
        assert_eq!(trace.final_values(), &[1, 3, 5, 8]);
    }

    #[test]
    fn test_bubble_early_exit_on_sorted_input() {
        let trace = bubble_sort(&[1, 2, 3]);
        // One pass of two compares, its Sorted marker, the clean prefix,
        // then the trailing Sorted [0].
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.counts().swaps, 0);
        assert_eq!(trace.steps()[2], Step::Sorted { indices: vec![2] });
        assert_eq!(trace.steps()[3], Step::Sorted { indices: vec![1] });
        assert_eq!(trace.steps()[4], Step::Sorted { indices: vec![0] });
    }

    #[test]
    fn test_bubble_singleton_and_empty() {
        assert!(bubble_sort::<i64>(&[]).is_empty());
        assert_eq!(
            bubble_sort(&[4]).steps(),
            &[Step::Sorted { indices: vec![0] }]
        );
    }
}
