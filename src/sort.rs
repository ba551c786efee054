//! Sorting and sorted-search primitives over slices.
//!
//! These are the algorithms behind the sorted layer of
//! [`Vector`](crate::Vector), usable on any slice.

use core::mem;

use crate::relation::Ordered;
use crate::{CACHE_LINE_SIZE, SORT_STACK_SIZE};

const PIVOT_SEED: usize = 31;

/// Number of elements below which `lower_bound` switches from bisection to
/// a linear scan: one cache line worth of items.
#[inline]
pub const fn linear_search_threshold<T>() -> usize {
    CACHE_LINE_SIZE / max(mem::size_of::<T>(), 1)
}

const fn max(a: usize, b: usize) -> usize {
    if a > b { a } else { b }
}

/// Returns the first index whose element is not less than `item`.
///
/// `items` must be sorted according to `relation`. Bisects until the window
/// fits in a cache line, then finishes with a linear scan.
pub fn lower_bound<T, R: Ordered<T>>(items: &[T], item: &T, relation: &R) -> usize {
    let threshold = linear_search_threshold::<T>();
    let mut l = 0;
    let mut r = items.len();

    while r - l > threshold {
        let m = l + (r - l) / 2;
        if relation.less(&items[m], item) {
            l = m + 1;
        } else {
            r = m;
        }
    }

    while l < r && relation.less(&items[l], item) {
        l += 1;
    }

    l
}

/// Linear congruential generator picking quicksort pivots.
///
/// Always starts from the same seed, so sorting is deterministic.
struct PivotRng {
    seed: usize,
}

impl PivotRng {
    fn new() -> Self {
        PivotRng { seed: PIVOT_SEED }
    }

    /// Returns an index in `0..n`.
    #[inline]
    fn next_index(&mut self, n: usize) -> usize {
        let idx = self.seed % n;
        self.seed = self.seed.wrapping_mul(69069).wrapping_add(1);
        idx
    }
}

/// Sorts `items` in place. The sort is not stable.
///
/// Iterative quicksort with a random pivot and Hoare partitioning. Pending
/// ranges are kept on a fixed stack of `SORT_STACK_SIZE` entries: the larger
/// side of each partition is deferred while the smaller side is sorted first,
/// so every deferred range is at least twice as large as the work left above
/// it and the stack depth stays below `log2(items.len())`.
pub fn quicksort<T, R: Ordered<T>>(items: &mut [T], relation: &R) {
    let mut stack = [(0usize, 0usize); SORT_STACK_SIZE];
    let mut depth = 0;
    let mut rng = PivotRng::new();

    let mut start = 0;
    let mut end = items.len();

    loop {
        while end - start > 1 {
            let pivot = rng.next_index(end - start);
            let mid = start + partition(&mut items[start..end], pivot, relation);

            // Left is [start, mid), right is [mid + 1, end).
            let (deferred, next) = if mid - start < end - mid - 1 {
                ((mid + 1, end), (start, mid))
            } else {
                ((start, mid), (mid + 1, end))
            };

            if deferred.1 - deferred.0 > 1 {
                debug_assert!(depth < SORT_STACK_SIZE);
                stack[depth] = deferred;
                depth += 1;
            }

            (start, end) = next;
        }

        if depth == 0 {
            break;
        }

        depth -= 1;
        (start, end) = stack[depth];
    }
}

/// Partitions `items` around the element at `pivot`.
///
/// Returns the final position `p` of the pivot: elements before `p` are not
/// greater than it, elements after `p` are not less than it.
fn partition<T, R: Ordered<T>>(items: &mut [T], pivot: usize, relation: &R) -> usize {
    items.swap(0, pivot);

    let (head, tail) = items.split_at_mut(1);
    let pivot = &head[0];

    let mut l = 0;
    let mut r = tail.len();
    loop {
        while l < r && relation.less(&tail[l], pivot) {
            l += 1;
        }
        while l < r && relation.less(pivot, &tail[r - 1]) {
            r -= 1;
        }
        if l >= r {
            break;
        }

        r -= 1;
        tail.swap(l, r);
        l += 1;
    }

    items.swap(0, l);

    l
}

#[cfg(test)]
fn naive_lower_bound(items: &[i32], item: i32) -> usize {
    items.iter().position(|x| *x >= item).unwrap_or(items.len())
}

#[cfg(test)]
fn is_sorted(items: &[i32]) -> bool {
    items.windows(2).all(|w| w[0] <= w[1])
}

#[test]
fn threshold() {
    assert_eq!(linear_search_threshold::<u8>(), CACHE_LINE_SIZE);
    assert_eq!(linear_search_threshold::<u32>(), CACHE_LINE_SIZE / 4);
    assert_eq!(linear_search_threshold::<()>(), CACHE_LINE_SIZE);
    assert_eq!(linear_search_threshold::<[u8; 256]>(), 0);
}

#[test]
fn lower_bound_agrees_with_linear_scan() {
    use crate::relation::Natural;

    let mut items = std::vec::Vec::new();
    for i in 0..500 {
        items.push(i / 3);
    }

    for probe in -2..170 {
        assert_eq!(lower_bound(&items, &probe, &Natural), naive_lower_bound(&items, probe));
    }

    assert_eq!(lower_bound(&[], &5, &Natural), 0);
    assert_eq!(lower_bound(&[5], &5, &Natural), 0);
    assert_eq!(lower_bound(&[5], &6, &Natural), 1);
}

#[test]
fn lower_bound_large_items() {
    use crate::relation::ByFn;

    // Too large for the linear tail, bisects all the way down.
    let items: std::vec::Vec<[u64; 16]> = (0..40u64).map(|i| [i * 2; 16]).collect();
    let by_first = ByFn::new(
        |a: &[u64; 16], b: &[u64; 16]| a[0] == b[0],
        |a: &[u64; 16], b: &[u64; 16]| a[0] < b[0],
    );

    assert_eq!(lower_bound(&items, &[0; 16], &by_first), 0);
    assert_eq!(lower_bound(&items, &[7; 16], &by_first), 4);
    assert_eq!(lower_bound(&items, &[8; 16], &by_first), 4);
    assert_eq!(lower_bound(&items, &[100; 16], &by_first), 40);
}

#[test]
fn sort_small() {
    use crate::relation::Natural;

    let mut items = [3, 2, 2, 2, 4, 1, 5, 6, 5];
    quicksort(&mut items, &Natural);
    assert_eq!(items, [1, 2, 2, 2, 3, 4, 5, 5, 6]);

    let mut empty: [i32; 0] = [];
    quicksort(&mut empty, &Natural);

    let mut one = [1];
    quicksort(&mut one, &Natural);
    assert_eq!(one, [1]);

    let mut two = [2, 1];
    quicksort(&mut two, &Natural);
    assert_eq!(two, [1, 2]);
}

#[test]
fn sort_adversarial_inputs() {
    use crate::relation::Natural;

    let n = 10_000;

    let mut ascending: std::vec::Vec<i32> = (0..n).collect();
    quicksort(&mut ascending, &Natural);
    assert!(is_sorted(&ascending));

    let mut descending: std::vec::Vec<i32> = (0..n).rev().collect();
    quicksort(&mut descending, &Natural);
    assert_eq!(descending, (0..n).collect::<std::vec::Vec<_>>());

    let mut constant = std::vec![7; n as usize];
    quicksort(&mut constant, &Natural);
    assert!(constant.iter().all(|x| *x == 7));

    let mut organ_pipe: std::vec::Vec<i32> = (0..n / 2).chain((0..n / 2).rev()).collect();
    quicksort(&mut organ_pipe, &Natural);
    assert!(is_sorted(&organ_pipe));

    let mut few_values: std::vec::Vec<i32> = (0..n).map(|i| (i * 7919) % 5).collect();
    quicksort(&mut few_values, &Natural);
    assert!(is_sorted(&few_values));
}

#[test]
fn sort_is_permutation() {
    use crate::relation::Natural;

    let mut items: std::vec::Vec<i32> = (0..1000).map(|i| (i * 7919 + 13) % 257 - 128).collect();
    let mut expected = items.clone();
    expected.sort();

    quicksort(&mut items, &Natural);
    assert_eq!(items, expected);
}

#[test]
fn partition_places_pivot() {
    use crate::relation::Natural;

    let mut items = [5, 9, 1, 7, 3, 5, 8, 2];
    let p = partition(&mut items, 0, &Natural);
    assert_eq!(items[p], 5);
    assert!(items[..p].iter().all(|x| *x <= 5));
    assert!(items[p + 1..].iter().all(|x| *x >= 5));
}
