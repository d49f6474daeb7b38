use crate::engine::{Trace, TraceRecorder};

/// Top-down merge sort.
///
/// Each merge records one compare per head-to-head decision and one
/// single-index snapshot per written slot, including tail copies. After a
/// merge every index of the merged range is marked sorted. A one-element
/// input is marked sorted directly.
#[must_use]
pub fn merge_sort<T: PartialOrd + Clone>(input: &[T]) -> Trace<T> {
    let mut rec = TraceRecorder::new(input);
    match rec.len() {
        0 => {}
        1 => rec.sorted(0),
        n => sort_range(&mut rec, 0, n - 1),
    }
    rec.finish()
}

/// Sort the inclusive range `[left, right]`.
fn sort_range<T: PartialOrd + Clone>(rec: &mut TraceRecorder<T>, left: usize, right: usize) {
    if left < right {
        let mid = left + (right - left) / 2;
        sort_range(rec, left, mid);
        sort_range(rec, mid + 1, right);
        merge(rec, left, mid, right);
    }
}

fn merge<T: PartialOrd + Clone>(rec: &mut TraceRecorder<T>, left: usize, mid: usize, right: usize) {
    let left_run = rec.values()[left..=mid].to_vec();
    let right_run = rec.values()[mid + 1..=right].to_vec();

    let (mut i, mut j, mut k) = (0, 0, left);

    while i < left_run.len() && j < right_run.len() {
        rec.compare(left + i, mid + 1 + j);
        // `<=` keeps equal elements in left-run order.
        if left_run[i] <= right_run[j] {
            rec.write(k, left_run[i].clone());
            i += 1;
        } else {
            rec.write(k, right_run[j].clone());
            j += 1;
        }
        k += 1;
    }

    for value in &left_run[i..] {
        rec.write(k, value.clone());
        k += 1;
    }
    for value in &right_run[j..] {
        rec.write(k, value.clone());
        k += 1;
    }

    for idx in left..=right {
        rec.sorted(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::testing::{assert_postconditions, edge_inputs};
    use crate::engine::Step;

    #[test]
    fn test_merge_postconditions() {
        for input in edge_inputs() {
            assert_postconditions(merge_sort, &input);
        }
    }

    #[test]
    fn test_merge_two_elements() {
        let trace = merge_sort(&[2, 1]);
        let expected: Vec<Step> = vec![
            Step::Compare { indices: [0, 1] },
            Step::Swap {
                indices: vec![0],
                array: vec![1, 1],
            },
            Step::Swap {
                indices: vec![1],
                array: vec![1, 2],
            },
            Step::Sorted { indices: vec![0] },
            Step::Sorted { indices: vec![1] },
        ];
        assert_eq!(trace.steps(), expected.as_slice());
    }

    #[test]
    fn test_merge_writes_every_slot() {
        let input = [4, 3, 2, 1, 0];
        let trace = merge_sort(&input);
        for step in trace.steps() {
            if let Step::Swap { indices, .. } = step {
                assert_eq!(indices.len(), 1);
            }
        }
        assert_eq!(trace.final_values(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_merge_singleton() {
        assert_eq!(
            merge_sort(&[3]).steps(),
            &[Step::Sorted { indices: vec![0] }]
        );
    }
}
