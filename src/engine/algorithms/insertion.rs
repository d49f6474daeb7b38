use crate::engine::{Trace, TraceRecorder};

/// Insertion sort.
///
/// Index 0 is a sorted singleton from the start. Each later key is moved
/// left by shifting larger predecessors one slot at a time (one compare and
/// one snapshot per shift); if the key moved, a final snapshot records its
/// placement. The outer index is then marked sorted.
#[must_use]
pub fn insertion_sort<T: PartialOrd + Clone>(input: &[T]) -> Trace<T> {
    let mut rec = TraceRecorder::new(input);
    let n = rec.len();

    if n == 0 {
        return rec.finish();
    }
    rec.sorted(0);

    for i in 1..n {
        let key = rec.get(i).clone();
        let mut hole = i;

        while hole > 0 {
            rec.compare(hole - 1, hole);
            if *rec.get(hole - 1) > key {
                let shifted = rec.get(hole - 1).clone();
                rec.set(hole, shifted);
                rec.snapshot(vec![hole - 1, hole]);
                hole -= 1;
            } else {
                break;
            }
        }

        rec.set(hole, key);
        if hole != i {
            rec.snapshot(vec![hole, i]);
        }
        rec.sorted(i);
    }

    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::testing::{assert_postconditions, edge_inputs};
    use crate::engine::Step;

    #[test]
    fn test_insertion_postconditions() {
        for input in edge_inputs() {
            assert_postconditions(insertion_sort, &input);
        }
    }

    #[test]
    fn test_insertion_empty_trace() {
        assert!(insertion_sort::<i64>(&[]).is_empty());
    }

    #[test]
    fn test_insertion_shift_and_place() {
        let trace = insertion_sort(&[2, 1]);
        let expected: Vec<Step> = vec![
            Step::Sorted { indices: vec![0] },
            Step::Compare { indices: [0, 1] },
            // Shift copies 2 right; the key is not yet written back.
            Step::Swap {
                indices: vec![0, 1],
                array: vec![2, 2],
            },
            Step::Swap {
                indices: vec![0, 1],
                array: vec![1, 2],
            },
            Step::Sorted { indices: vec![1] },
        ];
        assert_eq!(trace.steps(), expected.as_slice());
    }

    #[test]
    fn test_insertion_no_placement_when_key_stays() {
        let trace = insertion_sort(&[1, 2]);
        assert_eq!(trace.counts().swaps, 0);
        assert_eq!(trace.counts().compares, 1);
    }
}
