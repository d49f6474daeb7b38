//! Static algorithm registry.
//!
//! One immutable [`AlgorithmDescriptor`] per algorithm, keyed by
//! [`AlgorithmId`]. Complexity figures are display strings, not computed.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::engine::algorithms::{
    bubble_sort, heap_sort, insertion_sort, merge_sort, quick_sort, selection_sort,
};
use crate::engine::{Trace, Value};
use crate::error::SortError;

/// Identifier of a registered algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmId {
    /// Bubble sort.
    #[default]
    Bubble,
    /// Selection sort.
    Selection,
    /// Insertion sort.
    Insertion,
    /// Quick sort (Lomuto).
    Quick,
    /// Merge sort (top-down).
    Merge,
    /// Heap sort (max-heap).
    Heap,
}

impl AlgorithmId {
    /// All algorithms in registry order.
    pub const ALL: [Self; 6] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Quick,
        Self::Merge,
        Self::Heap,
    ];

    /// Registry key (camelCase, e.g. `bubbleSort`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bubble => "bubbleSort",
            Self::Selection => "selectionSort",
            Self::Insertion => "insertionSort",
            Self::Quick => "quickSort",
            Self::Merge => "mergeSort",
            Self::Heap => "heapSort",
        }
    }

    /// Next algorithm in registry order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    /// Descriptor for this algorithm.
    #[must_use]
    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        descriptor(self)
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AlgorithmId {
    type Err = SortError;

    /// Accepts `bubble`, `bubble-sort`, `bubble_sort` and `bubbleSort`,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let stem = normalized.strip_suffix("sort").unwrap_or(&normalized);

        match stem {
            "bubble" => Ok(Self::Bubble),
            "selection" => Ok(Self::Selection),
            "insertion" => Ok(Self::Insertion),
            "quick" => Ok(Self::Quick),
            "merge" => Ok(Self::Merge),
            "heap" => Ok(Self::Heap),
            _ => Err(SortError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Best / average / worst case time complexity, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeComplexity {
    /// Best case.
    pub best: &'static str,
    /// Average case.
    pub average: &'static str,
    /// Worst case.
    pub worst: &'static str,
}

/// Static metadata and entry point of one algorithm.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlgorithmDescriptor {
    /// Registry identifier.
    pub id: AlgorithmId,
    /// Display name.
    pub name: &'static str,
    /// One-paragraph description.
    pub description: &'static str,
    /// Time complexity triple.
    pub time_complexity: TimeComplexity,
    /// Auxiliary space complexity.
    pub space_complexity: &'static str,
    /// Whether equal elements keep their relative order.
    pub stable: bool,
    /// Whether the algorithm sorts within the input buffer.
    pub in_place: bool,
    /// Ordered explanation of how the algorithm proceeds.
    pub how_it_works: &'static [&'static str],
    /// Trace-generating entry point.
    #[serde(skip)]
    pub sort: fn(&[Value]) -> Trace,
}

impl AlgorithmDescriptor {
    /// Compute the trace of this algorithm on `values`.
    #[must_use]
    pub fn run(&self, values: &[Value]) -> Trace {
        (self.sort)(values)
    }
}

impl PartialEq for AlgorithmDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AlgorithmDescriptor {}

static REGISTRY: [AlgorithmDescriptor; 6] = [
    AlgorithmDescriptor {
        id: AlgorithmId::Bubble,
        name: "Bubble Sort",
        description: "A simple comparison-based algorithm that repeatedly steps through the list, \
            compares adjacent elements and swaps them if they are in the wrong order.",
        time_complexity: TimeComplexity {
            best: "O(n)",
            average: "O(n²)",
            worst: "O(n²)",
        },
        space_complexity: "O(1)",
        stable: true,
        in_place: true,
        how_it_works: &[
            "Compare adjacent elements in the array",
            "Swap them if they are in the wrong order",
            "Continue through the array until no more swaps are needed",
            "The largest element \"bubbles up\" to its correct position in each pass",
            "Repeat until the entire array is sorted",
        ],
        sort: bubble_sort::<Value>,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Selection,
        name: "Selection Sort",
        description: "An in-place comparison sorting algorithm that divides the input list into \
            sorted and unsorted regions, repeatedly selecting the smallest element from the \
            unsorted region.",
        time_complexity: TimeComplexity {
            best: "O(n²)",
            average: "O(n²)",
            worst: "O(n²)",
        },
        space_complexity: "O(1)",
        stable: false,
        in_place: true,
        how_it_works: &[
            "Find the minimum element in the unsorted portion of the array",
            "Swap it with the first element of the unsorted portion",
            "Move the boundary between sorted and unsorted portions one element to the right",
            "Repeat until the entire array is sorted",
            "The sorted portion grows from left to right",
        ],
        sort: selection_sort::<Value>,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Insertion,
        name: "Insertion Sort",
        description: "A simple sorting algorithm that builds the final sorted array one item at \
            a time, inserting each element into its proper position among the previously \
            sorted elements.",
        time_complexity: TimeComplexity {
            best: "O(n)",
            average: "O(n²)",
            worst: "O(n²)",
        },
        space_complexity: "O(1)",
        stable: true,
        in_place: true,
        how_it_works: &[
            "Start with the second element (assume first is sorted)",
            "Compare the current element with the previous elements",
            "Shift all larger elements one position to the right",
            "Insert the current element in its correct position",
            "Repeat for all remaining elements",
        ],
        sort: insertion_sort::<Value>,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Quick,
        name: "Quick Sort",
        description: "A highly efficient divide-and-conquer algorithm that picks a pivot element \
            and partitions the array around the pivot, then recursively sorts the sub-arrays.",
        time_complexity: TimeComplexity {
            best: "O(n log n)",
            average: "O(n log n)",
            worst: "O(n²)",
        },
        space_complexity: "O(log n)",
        stable: false,
        in_place: true,
        how_it_works: &[
            "Choose a pivot element from the array",
            "Partition the array so elements smaller than pivot come before it, larger elements come after",
            "Recursively apply the same process to the sub-arrays on either side of the pivot",
            "The pivot is now in its final sorted position",
            "Continue until all sub-arrays are sorted",
        ],
        sort: quick_sort::<Value>,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Merge,
        name: "Merge Sort",
        description: "A stable divide-and-conquer algorithm that divides the array into halves, \
            recursively sorts them, and then merges the sorted halves back together.",
        time_complexity: TimeComplexity {
            best: "O(n log n)",
            average: "O(n log n)",
            worst: "O(n log n)",
        },
        space_complexity: "O(n)",
        stable: true,
        in_place: false,
        how_it_works: &[
            "Divide the array into two halves",
            "Recursively sort each half",
            "Merge the two sorted halves back together",
            "During merging, compare elements and place them in correct order",
            "Continue until the entire array is reconstructed and sorted",
        ],
        sort: merge_sort::<Value>,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Heap,
        name: "Heap Sort",
        description: "A comparison-based sorting algorithm that uses a binary heap data \
            structure to sort elements by first building a max heap, then repeatedly \
            extracting the maximum element.",
        time_complexity: TimeComplexity {
            best: "O(n log n)",
            average: "O(n log n)",
            worst: "O(n log n)",
        },
        space_complexity: "O(1)",
        stable: false,
        in_place: true,
        how_it_works: &[
            "Build a max heap from the input array",
            "The largest element is now at the root of the heap",
            "Swap the root with the last element and reduce heap size",
            "Heapify the root to maintain the max heap property",
            "Repeat until all elements are sorted",
        ],
        sort: heap_sort::<Value>,
    },
];

/// Descriptor for `id`.
#[must_use]
pub fn descriptor(id: AlgorithmId) -> &'static AlgorithmDescriptor {
    match id {
        AlgorithmId::Bubble => &REGISTRY[0],
        AlgorithmId::Selection => &REGISTRY[1],
        AlgorithmId::Insertion => &REGISTRY[2],
        AlgorithmId::Quick => &REGISTRY[3],
        AlgorithmId::Merge => &REGISTRY[4],
        AlgorithmId::Heap => &REGISTRY[5],
    }
}

/// All descriptors in registry order.
#[must_use]
pub fn all() -> &'static [AlgorithmDescriptor] {
    &REGISTRY
}
