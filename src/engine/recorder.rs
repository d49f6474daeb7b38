//! Step recorder shared by all algorithms.
//!
//! The recorder owns the working copy of the array. Algorithms mutate it
//! only through recorder methods, so every mutation is paired with the
//! snapshot step that describes it.

use crate::engine::{Step, Trace};

/// Working array plus the steps recorded so far.
#[derive(Debug, Clone)]
pub struct TraceRecorder<T> {
    input: Vec<T>,
    values: Vec<T>,
    steps: Vec<Step<T>>,
}

impl<T: Clone> TraceRecorder<T> {
    /// Start recording over a private copy of `input`.
    #[must_use]
    pub fn new(input: &[T]) -> Self {
        Self {
            input: input.to_vec(),
            values: input.to_vec(),
            steps: Vec::new(),
        }
    }

    /// Current working array.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Value at position `i` of the working array.
    #[must_use]
    pub fn get(&self, i: usize) -> &T {
        &self.values[i]
    }

    /// Number of elements being sorted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Record a comparison of positions `a` and `b`.
    pub fn compare(&mut self, a: usize, b: usize) {
        self.steps.push(Step::Compare { indices: [a, b] });
    }

    /// Exchange positions `a` and `b` and record the resulting array.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.snapshot(vec![a, b]);
    }

    /// Overwrite position `k` and record a single-index snapshot.
    pub fn write(&mut self, k: usize, value: T) {
        self.values[k] = value;
        self.snapshot(vec![k]);
    }

    /// Overwrite position `k` without recording anything.
    ///
    /// Callers pair silent writes with an explicit [`Self::snapshot`].
    pub fn set(&mut self, k: usize, value: T) {
        self.values[k] = value;
    }

    /// Record a `Swap` step for `indices` with the current array.
    pub fn snapshot(&mut self, indices: Vec<usize>) {
        self.steps.push(Step::Swap {
            indices,
            array: self.values.clone(),
        });
    }

    /// Record that position `i` holds its final value.
    pub fn sorted(&mut self, i: usize) {
        self.steps.push(Step::Sorted { indices: vec![i] });
    }

    /// Record one `Sorted` step covering `range`; nothing if it is empty.
    pub fn sorted_range(&mut self, range: std::ops::Range<usize>) {
        if !range.is_empty() {
            self.steps.push(Step::Sorted {
                indices: range.collect(),
            });
        }
    }

    /// Number of steps recorded so far.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Finish recording.
    #[must_use]
    pub fn finish(self) -> Trace<T> {
        Trace::new(self.input, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StepKind;

    #[test]
    fn test_recorder_does_not_touch_input() {
        let input = vec![3, 1, 2];
        let mut rec = TraceRecorder::new(&input);
        rec.swap(0, 1);
        assert_eq!(input, vec![3, 1, 2]);
        assert_eq!(rec.values(), &[1, 3, 2]);
    }

    #[test]
    fn test_recorder_swap_records_snapshot() {
        let mut rec = TraceRecorder::new(&[3, 1]);
        rec.compare(0, 1);
        rec.swap(0, 1);
        let trace = rec.finish();

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.steps()[0].kind(), StepKind::Compare);
        assert_eq!(trace.steps()[1].snapshot(), Some(&[1, 3][..]));
        assert_eq!(trace.input(), &[3, 1]);
    }

    #[test]
    fn test_recorder_write_single_index() {
        let mut rec = TraceRecorder::new(&[5, 6, 7]);
        rec.write(1, 9);
        let trace = rec.finish();
        assert_eq!(trace.steps()[0].indices(), &[1]);
        assert_eq!(trace.steps()[0].snapshot(), Some(&[5, 9, 7][..]));
    }

    #[test]
    fn test_recorder_silent_set_then_snapshot() {
        let mut rec = TraceRecorder::new(&[1, 2]);
        rec.set(0, 4);
        assert_eq!(rec.step_count(), 0);
        rec.snapshot(vec![0, 1]);
        assert_eq!(rec.step_count(), 1);
        assert_eq!(*rec.get(0), 4);
    }

    #[test]
    fn test_recorder_sorted() {
        let mut rec = TraceRecorder::new(&[1]);
        rec.sorted(0);
        let trace = rec.finish();
        assert_eq!(trace.steps(), &[Step::Sorted { indices: vec![0] }]);
    }

    #[test]
    fn test_recorder_sorted_range() {
        let mut rec = TraceRecorder::new(&[1, 2, 3, 4]);
        rec.sorted_range(1..3);
        rec.sorted_range(2..2);
        let trace = rec.finish();
        assert_eq!(trace.steps(), &[Step::Sorted { indices: vec![1, 2] }]);
    }
}
