use crate::engine::{Trace, TraceRecorder};

/// Selection sort.
///
/// For each position `i`, scans the suffix comparing the running minimum
/// against every later element, swaps the minimum into `i` if it moved and
/// marks `i` sorted. The last index is never an explicit `i`, so it is
/// marked after the loop.
#[must_use]
pub fn selection_sort<T: PartialOrd + Clone>(input: &[T]) -> Trace<T> {
    let mut rec = TraceRecorder::new(input);
    let n = rec.len();

    for i in 0..n.saturating_sub(1) {
        let mut min_idx = i;
        for j in i + 1..n {
            rec.compare(min_idx, j);
            if rec.get(j) < rec.get(min_idx) {
                min_idx = j;
            }
        }

        if min_idx != i {
            rec.swap(i, min_idx);
        }
        rec.sorted(i);
    }

    if n > 0 {
        rec.sorted(n - 1);
    }
    rec.finish()
}
