use std::time::{Duration, Instant};

use log::trace;

use crate::storage::Sortable;

/// Wall-clock allowance for a preparation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Unbounded,
    Within(Duration),
}

impl Budget {
    /// Reads the clock only when there is a limit to check against
    #[inline]
    pub fn expired(&self, start: Instant) -> bool {
        match self {
            Budget::Unbounded => false,
            Budget::Within(limit) => start.elapsed() >= *limit,
        }
    }
}

impl From<Duration> for Budget {
    fn from(limit: Duration) -> Self {
        Budget::Within(limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    Completed,
    /// The budget ran out, the sequence is only partially ordered
    TimedOut,
}

/// In-place quicksort by name using the Lomuto partition scheme,
/// with the rightmost element as pivot.
///
/// Always runs to completion.
pub fn quicksort<S: Sortable + ?Sized>(seq: &mut S) -> SortOutcome {
    if seq.len() > 1 {
        let right = seq.len() - 1;
        quicksort_range(seq, 0, right);
    }
    SortOutcome::Completed
}

fn quicksort_range<S: Sortable + ?Sized>(seq: &mut S, mut left: usize, mut right: usize) {
    // recurse into the smaller side, loop on the larger one
    while left < right {
        let pivot = partition(seq, left, right);

        if pivot - left < right - pivot {
            if pivot > left {
                quicksort_range(seq, left, pivot - 1);
            }
            left = pivot + 1;
        } else {
            quicksort_range(seq, pivot + 1, right);
            if pivot == left {
                break;
            }
            right = pivot - 1;
        }
    }
}

fn partition<S: Sortable + ?Sized>(seq: &mut S, left: usize, right: usize) -> usize {
    let mut store = left;

    // the pivot stays at `right` until the final swap
    for i in left..right {
        if seq.name_at(i) < seq.name_at(right) {
            seq.swap(i, store);
            store += 1;
        }
    }

    seq.swap(right, store);
    store
}

/// Adjacent-swap bubble sort by name.
///
/// The budget is checked before every comparison. Once it runs out the sort
/// gives up and leaves the sequence as it is.
pub fn bubble_sort<S: Sortable + ?Sized>(seq: &mut S, budget: Budget) -> SortOutcome {
    let start = Instant::now();
    let n = seq.len();

    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if budget.expired(start) {
                trace!(target: "bubble_sort", "gave up after {:?} in pass {i}", start.elapsed());
                return SortOutcome::TimedOut;
            }

            if seq.name_at(j) > seq.name_at(j + 1) {
                seq.swap(j, j + 1);
            }
        }
    }

    SortOutcome::Completed
}
