//! Extremum queries and sorted maintenance.
//!
//! As with the search layer, each method has a `_by` form taking an
//! [`Ordered`] relation and a short form using `<` and `==`.

use core::cmp::Ordering;

use crate::allocator::{AllocError, Allocator};
use crate::relation::{Natural, Ordered};
use crate::sort::{lower_bound, quicksort};
use crate::vec::Vector;
use crate::Insertion;

#[cold]
#[inline(never)]
#[track_caller]
fn range_assert_failed(start: usize, len: usize, vec_len: usize) -> ! {
    panic!("sort range {start}..{start}+{len} out of bounds for length {vec_len}");
}

impl<T, A: Allocator> Vector<T, A> {
    #[track_caller]
    fn checked_range(&self, start: usize, len: usize) -> core::ops::Range<usize> {
        match start.checked_add(len) {
            Some(end) if end <= self.len() => start..end,
            _ => range_assert_failed(start, len, self.len()),
        }
    }

    /// Returns the index of the smallest element, the first one on ties.
    pub fn index_of_min_by<R: Ordered<T>>(&self, relation: &R) -> Option<usize> {
        let items = self.as_slice();
        if items.is_empty() {
            return None;
        }

        let mut min = 0;
        for i in 1..items.len() {
            if relation.less(&items[i], &items[min]) {
                min = i;
            }
        }

        Some(min)
    }

    /// Returns the index of the largest element, the first one on ties.
    pub fn index_of_max_by<R: Ordered<T>>(&self, relation: &R) -> Option<usize> {
        let items = self.as_slice();
        if items.is_empty() {
            return None;
        }

        let mut max = 0;
        for i in 1..items.len() {
            if relation.less(&items[max], &items[i]) {
                max = i;
            }
        }

        Some(max)
    }

    /// Returns the index at which `item` should be inserted to keep the
    /// vector sorted: the first element not less than `item`.
    #[inline]
    pub fn insertion_index_sorted_by<R: Ordered<T>>(&self, item: &T, relation: &R) -> usize {
        lower_bound(self.as_slice(), item, relation)
    }

    /// Returns the index of an element equal to `item` in a sorted vector.
    ///
    /// With duplicates this is the first element of the run of equal elements
    /// only if the relation's equality agrees with its ordering.
    pub fn index_of_sorted_by<R: Ordered<T>>(&self, item: &T, relation: &R) -> Option<usize> {
        let idx = self.insertion_index_sorted_by(item, relation);
        match self.as_slice().get(idx) {
            Some(found) if relation.equal(found, item) => Some(idx),
            _ => None,
        }
    }

    #[inline]
    pub fn contains_sorted_by<R: Ordered<T>>(&self, item: &T, relation: &R) -> bool {
        self.index_of_sorted_by(item, relation).is_some()
    }

    /// Inserts `item` at its sorted position and returns that position.
    pub fn try_insert_sorted_by<R: Ordered<T>>(
        &mut self,
        item: T,
        relation: &R,
    ) -> Result<usize, AllocError> {
        let idx = self.insertion_index_sorted_by(&item, relation);
        self.try_insert(idx, item)?;

        Ok(idx)
    }

    /// Inserts `item` at its sorted position unless an equal element is already there.
    pub fn try_insert_sorted_unique_by<R: Ordered<T>>(
        &mut self,
        item: T,
        relation: &R,
    ) -> Result<Insertion, AllocError> {
        let idx = self.insertion_index_sorted_by(&item, relation);
        if let Some(existing) = self.as_slice().get(idx) {
            if relation.equal(existing, &item) {
                return Ok(Insertion::Present(idx));
            }
        }

        self.try_insert(idx, item)?;

        Ok(Insertion::Inserted(idx))
    }

    /// Inserts a clone of every element of `items` at its sorted position.
    ///
    /// Stops at the first allocation failure, keeping the elements inserted so far.
    pub fn try_insert_all_sorted_by<R: Ordered<T>>(
        &mut self,
        items: &[T],
        relation: &R,
    ) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.try_expand(items.len())?;
        for item in items {
            self.try_insert_sorted_by(item.clone(), relation)?;
        }

        Ok(())
    }

    /// Inserts a clone of every element of `items` that is not already present.
    pub fn try_insert_all_sorted_unique_by<R: Ordered<T>>(
        &mut self,
        items: &[T],
        relation: &R,
    ) -> Result<(), AllocError>
    where
        T: Clone,
    {
        for item in items {
            let idx = self.insertion_index_sorted_by(item, relation);
            match self.as_slice().get(idx) {
                Some(existing) if relation.equal(existing, item) => {}
                _ => self.try_insert(idx, item.clone())?,
            }
        }

        Ok(())
    }

    /// Sorts the `len` elements starting at `start`. The sort is not stable.
    ///
    /// # Panics
    ///
    /// Panics if the range goes past the end of the vector.
    #[track_caller]
    pub fn sort_range_by<R: Ordered<T>>(&mut self, start: usize, len: usize, relation: &R) {
        let range = self.checked_range(start, len);
        quicksort(&mut self.as_mut_slice()[range], relation);
    }

    /// Sorts the whole vector. The sort is not stable.
    #[inline]
    pub fn sort_by_relation<R: Ordered<T>>(&mut self, relation: &R) {
        quicksort(self.as_mut_slice(), relation);
    }

    /// Sorts the `len` elements starting at `start` with a three-way comparator.
    ///
    /// # Panics
    ///
    /// Panics if the range goes past the end of the vector.
    #[track_caller]
    pub fn sort_range_with<F>(&mut self, start: usize, len: usize, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let range = self.checked_range(start, len);
        self.as_mut_slice()[range].sort_unstable_by(compare);
    }

    /// Sorts the whole vector with a three-way comparator.
    #[inline]
    pub fn sort_with<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_unstable_by(compare);
    }
}

impl<T: PartialOrd, A: Allocator> Vector<T, A> {
    #[inline]
    pub fn index_of_min(&self) -> Option<usize> {
        self.index_of_min_by(&Natural)
    }

    #[inline]
    pub fn index_of_max(&self) -> Option<usize> {
        self.index_of_max_by(&Natural)
    }

    #[inline]
    pub fn insertion_index_sorted(&self, item: &T) -> usize {
        self.insertion_index_sorted_by(item, &Natural)
    }

    #[inline]
    pub fn index_of_sorted(&self, item: &T) -> Option<usize> {
        self.index_of_sorted_by(item, &Natural)
    }

    #[inline]
    pub fn contains_sorted(&self, item: &T) -> bool {
        self.contains_sorted_by(item, &Natural)
    }

    #[inline]
    pub fn try_insert_sorted(&mut self, item: T) -> Result<usize, AllocError> {
        self.try_insert_sorted_by(item, &Natural)
    }

    #[inline]
    pub fn try_insert_sorted_unique(&mut self, item: T) -> Result<Insertion, AllocError> {
        self.try_insert_sorted_unique_by(item, &Natural)
    }

    #[inline]
    pub fn try_insert_all_sorted(&mut self, items: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.try_insert_all_sorted_by(items, &Natural)
    }

    #[inline]
    pub fn try_insert_all_sorted_unique(&mut self, items: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.try_insert_all_sorted_unique_by(items, &Natural)
    }

    #[track_caller]
    pub fn sort_range(&mut self, start: usize, len: usize) {
        self.sort_range_by(start, len, &Natural);
    }

    pub fn sort(&mut self) {
        self.sort_by_relation(&Natural);
    }
}

#[cfg(test)]
const VALUES: [i32; 9] = [3, 2, 2, 2, 4, 1, 5, 6, 5];

#[test]
fn extrema() {
    let v = Vector::try_from_slice(&VALUES).unwrap();
    assert_eq!(v.index_of_min(), Some(5));
    assert_eq!(v.index_of_max(), Some(7));

    let ties = Vector::try_from_slice(&[1, 3, 1, 3]).unwrap();
    assert_eq!(ties.index_of_min(), Some(0));
    assert_eq!(ties.index_of_max(), Some(1));

    let empty: Vector<i32> = Vector::new();
    assert_eq!(empty.index_of_min(), None);
    assert_eq!(empty.index_of_max(), None);
}

#[test]
fn sort_whole_and_range() {
    let mut v = Vector::try_from_slice(&VALUES).unwrap();
    v.sort();
    assert_eq!(v, [1, 2, 2, 2, 3, 4, 5, 5, 6]);

    let mut v = Vector::try_from_slice(&VALUES).unwrap();
    v.sort_range(3, 3);
    assert_eq!(v, [3, 2, 2, 1, 2, 4, 5, 6, 5]);

    v.sort_range(0, 0);
    v.sort_range(9, 0);
    assert_eq!(v, [3, 2, 2, 1, 2, 4, 5, 6, 5]);
}

#[test]
#[should_panic]
fn sort_range_out_of_bounds() {
    let mut v = Vector::try_from_slice(&VALUES).unwrap();
    v.sort_range(5, 5);
}

#[test]
#[should_panic]
fn sort_range_overflow() {
    let mut v = Vector::try_from_slice(&VALUES).unwrap();
    v.sort_range(1, usize::MAX);
}

#[test]
fn sort_with_comparator_then_reverse() {
    let mut v = Vector::try_from_slice(&[3, 2, 4, 1]).unwrap();
    v.sort_with(|a, b| a.cmp(b));
    assert_eq!(v, [1, 2, 3, 4]);

    v.reverse();
    assert_eq!(v, [4, 3, 2, 1]);

    v.sort_range_with(1, 3, |a, b| Natural.compare(a, b));
    assert_eq!(v, [4, 1, 2, 3]);
}

#[test]
fn sort_by_key_relation() {
    use crate::relation::ByFn;

    let by_key = ByFn::new(
        |a: &(u32, char), b: &(u32, char)| a.0 == b.0,
        |a: &(u32, char), b: &(u32, char)| a.0 < b.0,
    );

    let mut v = Vector::try_from_slice(&[(3, 'c'), (1, 'a'), (2, 'b')]).unwrap();
    v.sort_by_relation(&by_key);
    assert_eq!(v, [(1, 'a'), (2, 'b'), (3, 'c')]);

    assert_eq!(v.index_of_sorted_by(&(2, 'z'), &by_key), Some(1));
    assert_eq!(v.try_insert_sorted_unique_by((2, 'x'), &by_key), Ok(Insertion::Present(1)));
}

#[test]
fn insert_sorted() {
    let mut v: Vector<i32> = Vector::new();
    assert_eq!(v.try_insert_sorted(0), Ok(0));
    assert_eq!(v, [0]);
    v.clear();

    v.try_insert_all_sorted(&VALUES).unwrap();
    assert_eq!(v, [1, 2, 2, 2, 3, 4, 5, 5, 6]);

    assert!(v.contains_sorted(&6));
    assert!(!v.contains_sorted(&-1));
    assert_eq!(v.index_of_sorted(&3), Some(4));
    assert_eq!(v.index_of_sorted(&7), None);
    assert_eq!(v.index_of_sorted(&2), Some(1));

    v.clear();
    v.try_insert_all_sorted_unique(&VALUES).unwrap();
    assert_eq!(v, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn insert_sorted_unique() {
    let mut v = Vector::try_from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();

    assert_eq!(v.try_insert_sorted_unique(2), Ok(Insertion::Present(1)));
    assert_eq!(v, [1, 2, 3, 4, 5, 6]);

    assert_eq!(v.try_insert_sorted_unique(7), Ok(Insertion::Inserted(6)));
    assert_eq!(v, [1, 2, 3, 4, 5, 6, 7]);

    assert_eq!(v.try_insert_sorted_unique(0), Ok(Insertion::Inserted(0)));
    assert_eq!(v, [0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn insertion_index() {
    let v = Vector::try_from_slice(&[1, 2, 2, 2, 3, 4, 5, 5, 6]).unwrap();
    assert_eq!(v.insertion_index_sorted(&0), 0);
    assert_eq!(v.insertion_index_sorted(&2), 1);
    assert_eq!(v.insertion_index_sorted(&5), 6);
    assert_eq!(v.insertion_index_sorted(&7), 9);

    let empty: Vector<i32> = Vector::new();
    assert_eq!(empty.insertion_index_sorted(&3), 0);

    // Large enough to bisect before the linear tail.
    let mut big = Vector::new();
    for i in 0..1000u32 {
        big.push(i * 2);
    }
    assert_eq!(big.insertion_index_sorted(&0), 0);
    assert_eq!(big.insertion_index_sorted(&777), 389);
    assert_eq!(big.insertion_index_sorted(&778), 389);
    assert_eq!(big.insertion_index_sorted(&5000), 1000);
}

#[test]
fn insert_sorted_alloc_failure() {
    use crate::testing::Budget;

    let budget = Budget::new(1);
    let mut v = Vector::try_with_capacity_in(4, &budget).unwrap();
    for item in [1, 3, 5, 7] {
        v.try_push(item).unwrap();
    }

    assert_eq!(v.try_insert_sorted_unique(3), Ok(Insertion::Present(1)));
    assert_eq!(v.try_insert_sorted(4), Err(AllocError));
    assert_eq!(v.try_insert_sorted_unique(4), Err(AllocError));
    assert_eq!(v, [1, 3, 5, 7]);
}
