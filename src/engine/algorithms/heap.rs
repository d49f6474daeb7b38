use crate::engine::{Trace, TraceRecorder};

/// Heap sort over a max-heap.
///
/// Builds the heap bottom-up, then repeatedly swaps the root with the last
/// heap slot, marks that slot sorted, shrinks the heap and sifts the root
/// down. Index 0 is marked once the loop completes.
#[must_use]
pub fn heap_sort<T: PartialOrd + Clone>(input: &[T]) -> Trace<T> {
    let mut rec = TraceRecorder::new(input);
    let n = rec.len();

    for i in (0..n / 2).rev() {
        heapify(&mut rec, n, i);
    }

    for end in (1..n).rev() {
        rec.swap(0, end);
        rec.sorted(end);
        heapify(&mut rec, end, 0);
    }

    if n > 0 {
        rec.sorted(0);
    }
    rec.finish()
}

/// Sift node `i` down within a heap of size `size`.
fn heapify<T: PartialOrd + Clone>(rec: &mut TraceRecorder<T>, size: usize, i: usize) {
    let mut largest = i;
    let left = 2 * i + 1;
    let right = 2 * i + 2;

    if left < size {
        rec.compare(left, largest);
        if rec.get(left) > rec.get(largest) {
            largest = left;
        }
    }

    if right < size {
        rec.compare(right, largest);
        if rec.get(right) > rec.get(largest) {
            largest = right;
        }
    }

    if largest != i {
        rec.swap(i, largest);
        heapify(rec, size, largest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithms::testing::{assert_postconditions, edge_inputs};
    use crate::engine::Step;

    #[test]
    fn test_heap_postconditions() {
        for input in edge_inputs() {
            assert_postconditions(heap_sort, &input);
        }
    }

    #[test]
    fn test_heap_build_compares_child_against_largest() {
        let trace = heap_sort(&[1, 3, 2]);
        assert_eq!(trace.steps()[0], Step::Compare { indices: [1, 0] });
        // Right child is compared against the new largest (index 1).
        assert_eq!(trace.steps()[1], Step::Compare { indices: [2, 1] });
        assert_eq!(
            trace.steps()[2],
            Step::Swap {
                indices: vec![0, 1],
                array: vec![3, 1, 2],
            }
        );
    }

    #[test]
    fn test_heap_marks_root_last() {
        let trace = heap_sort(&[2, 1]);
        assert_eq!(
            trace.steps().last(),
            Some(&Step::Sorted { indices: vec![0] })
        );
        assert_eq!(trace.final_values(), &[1, 2]);
    }
}
