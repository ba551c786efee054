//! Linear search and set-like queries.
//!
//! Every method comes in two forms: a `_by` form taking an [`Equatable`]
//! relation, and a short form that uses `==`.

use crate::allocator::{AllocError, Allocator};
use crate::relation::{Equatable, Natural};
use crate::vec::Vector;
use crate::Insertion;

#[inline]
fn same_instance<T, A: Allocator, B: Allocator>(a: &Vector<T, A>, b: &Vector<T, B>) -> bool {
    core::ptr::eq(a as *const Vector<T, A> as *const u8, b as *const Vector<T, B> as *const u8)
}

impl<T, A: Allocator> Vector<T, A> {
    /// Returns the index of the first element equal to `item`.
    pub fn index_of_by<R: Equatable<T>>(&self, item: &T, relation: &R) -> Option<usize> {
        self.as_slice().iter().position(|x| relation.equal(x, item))
    }

    /// Returns the index of the last element equal to `item`.
    pub fn index_of_reverse_by<R: Equatable<T>>(&self, item: &T, relation: &R) -> Option<usize> {
        self.as_slice().iter().rposition(|x| relation.equal(x, item))
    }

    #[inline]
    pub fn contains_by<R: Equatable<T>>(&self, item: &T, relation: &R) -> bool {
        self.index_of_by(item, relation).is_some()
    }

    /// Removes the first element equal to `item`.
    ///
    /// Returns whether an element was removed.
    pub fn remove_item_by<R: Equatable<T>>(&mut self, item: &T, relation: &R) -> bool {
        match self.index_of_by(item, relation) {
            Some(idx) => {
                self.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Returns true if both vectors hold equal elements in the same order.
    pub fn equals_by<B, R>(&self, other: &Vector<T, B>, relation: &R) -> bool
    where
        B: Allocator,
        R: Equatable<T>,
    {
        if same_instance(self, other) {
            return true;
        }

        if self.len() != other.len() {
            return false;
        }

        if self.is_empty() {
            return true;
        }

        relation.equal_slices(self.as_slice(), other.as_slice())
    }

    /// Returns true if every element of `other` is present in this vector.
    pub fn contains_all_by<B, R>(&self, other: &Vector<T, B>, relation: &R) -> bool
    where
        B: Allocator,
        R: Equatable<T>,
    {
        if same_instance(self, other) {
            return true;
        }

        other.iter().all(|item| self.contains_by(item, relation))
    }

    /// Returns true if at least one element of `other` is present in this vector.
    pub fn contains_any_by<B, R>(&self, other: &Vector<T, B>, relation: &R) -> bool
    where
        B: Allocator,
        R: Equatable<T>,
    {
        if same_instance(self, other) {
            return true;
        }

        other.iter().any(|item| self.contains_by(item, relation))
    }

    /// Pushes `item` unless an equal element is already present.
    ///
    /// Returns `Insertion::Present` with the index of the existing element
    /// when nothing was pushed.
    pub fn try_push_unique_by<R: Equatable<T>>(
        &mut self,
        item: T,
        relation: &R,
    ) -> Result<Insertion, AllocError> {
        if let Some(idx) = self.index_of_by(&item, relation) {
            return Ok(Insertion::Present(idx));
        }

        self.try_push(item)?;

        Ok(Insertion::Inserted(self.len() - 1))
    }

    /// Pushes a clone of every element of `items` that is not already present.
    ///
    /// Stops at the first allocation failure, keeping the elements pushed so far.
    pub fn try_append_unique_by<R: Equatable<T>>(
        &mut self,
        items: &[T],
        relation: &R,
    ) -> Result<(), AllocError>
    where
        T: Clone,
    {
        for item in items {
            if !self.contains_by(item, relation) {
                self.try_push(item.clone())?;
            }
        }

        Ok(())
    }

    /// Removes the first occurrence of every element of `items`.
    pub fn remove_all_from_by<R: Equatable<T>>(&mut self, items: &[T], relation: &R) {
        for item in items {
            self.remove_item_by(item, relation);
        }
    }
}

impl<T: PartialEq, A: Allocator> Vector<T, A> {
    /// Returns the index of the first element equal to `item`.
    #[inline]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.index_of_by(item, &Natural)
    }

    /// Returns the index of the last element equal to `item`.
    #[inline]
    pub fn index_of_reverse(&self, item: &T) -> Option<usize> {
        self.index_of_reverse_by(item, &Natural)
    }

    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.contains_by(item, &Natural)
    }

    #[inline]
    pub fn remove_item(&mut self, item: &T) -> bool {
        self.remove_item_by(item, &Natural)
    }

    #[inline]
    pub fn equals<B: Allocator>(&self, other: &Vector<T, B>) -> bool {
        self.equals_by(other, &Natural)
    }

    #[inline]
    pub fn contains_all<B: Allocator>(&self, other: &Vector<T, B>) -> bool {
        self.contains_all_by(other, &Natural)
    }

    #[inline]
    pub fn contains_any<B: Allocator>(&self, other: &Vector<T, B>) -> bool {
        self.contains_any_by(other, &Natural)
    }

    #[inline]
    pub fn try_push_unique(&mut self, item: T) -> Result<Insertion, AllocError> {
        self.try_push_unique_by(item, &Natural)
    }

    #[inline]
    pub fn try_append_unique(&mut self, items: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.try_append_unique_by(items, &Natural)
    }

    #[inline]
    pub fn remove_all_from(&mut self, items: &[T]) {
        self.remove_all_from_by(items, &Natural)
    }
}

#[cfg(test)]
fn from_items(items: &[i32]) -> Vector<i32> {
    Vector::try_from_slice(items).unwrap()
}

#[test]
fn index_of() {
    let v = from_items(&[3, 2, 4, 1, 4]);

    assert_eq!(v.index_of(&4), Some(2));
    assert_eq!(v.index_of_reverse(&4), Some(4));
    assert_eq!(v.index_of(&3), Some(0));
    assert_eq!(v.index_of_reverse(&3), Some(0));
    assert_eq!(v.index_of(&5), None);
    assert_eq!(v.index_of_reverse(&5), None);

    let empty: Vector<i32> = Vector::new();
    assert_eq!(empty.index_of(&1), None);
    assert!(!empty.contains(&1));
}

#[test]
fn contains() {
    let v = from_items(&[3, 2, 4, 1]);
    assert!(v.contains(&1));
    assert!(!v.contains(&5));

    let by_abs = |a: &i32, b: &i32| a.abs() == b.abs();
    assert!(v.contains_by(&-4, &by_abs));
    assert_eq!(v.index_of_by(&-2, &by_abs), Some(1));
}

#[test]
fn contains_all_any() {
    let v = from_items(&[3, 2, 4, 1]);
    let subset = from_items(&[1, 4]);
    let mixed = from_items(&[1, 5]);
    let disjoint = from_items(&[5, 6]);
    let empty: Vector<i32> = Vector::new();

    assert!(v.contains_all(&subset));
    assert!(!v.contains_all(&mixed));
    assert!(v.contains_all(&empty));
    assert!(v.contains_all(&v));

    assert!(v.contains_any(&mixed));
    assert!(!v.contains_any(&disjoint));
    assert!(!v.contains_any(&empty));
    assert!(v.contains_any(&v));
    assert!(empty.contains_any(&empty));
}

#[test]
fn remove_item() {
    let mut v = from_items(&[3, 2, 4, 2, 1]);
    assert!(v.remove_item(&2));
    assert_eq!(v, [3, 4, 2, 1]);
    assert!(!v.remove_item(&5));
    assert_eq!(v, [3, 4, 2, 1]);
}

#[test]
fn equality() {
    let a = from_items(&[3, 2, 4, 1]);
    let b = from_items(&[3, 2, 4, 1]);
    let c = from_items(&[3, 2, 4]);
    let d = from_items(&[3, 2, 4, 5]);
    let empty_a: Vector<i32> = Vector::new();
    let empty_b: Vector<i32> = Vector::new();

    assert!(a.equals(&a));
    assert!(a.equals(&b) && b.equals(&a));
    assert!(!a.equals(&c) && !c.equals(&a));
    assert!(!a.equals(&d) && !d.equals(&a));
    assert!(empty_a.equals(&empty_b));
    assert!(!empty_a.equals(&a));

    let by_abs = |x: &i32, y: &i32| x.abs() == y.abs();
    let negated = from_items(&[-3, 2, -4, 1]);
    assert!(a.equals_by(&negated, &by_abs));
    assert!(!a.equals(&negated));
}

#[test]
fn push_unique() {
    let mut v = from_items(&[3, 2, 4, 1]);

    assert_eq!(v.try_push_unique(3), Ok(Insertion::Present(0)));
    assert_eq!(v, [3, 2, 4, 1]);

    assert_eq!(v.try_push_unique(5), Ok(Insertion::Inserted(4)));
    assert_eq!(v, [3, 2, 4, 1, 5]);
}

#[test]
fn append_unique_and_remove_all() {
    let mut v = from_items(&[3, 2, 4, 1]);
    let other = from_items(&[1, 5, 4, 6, 5]);

    v.try_append_unique(&other).unwrap();
    assert_eq!(v, [3, 2, 4, 1, 5, 6]);

    v.remove_all_from(&other);
    assert_eq!(v, [3, 2]);

    v.remove_all_from(&[]);
    assert_eq!(v, [3, 2]);
}

#[test]
fn push_unique_alloc_failure() {
    use crate::testing::Budget;

    let budget = Budget::new(1);
    let mut v = Vector::try_with_capacity_in(2, &budget).unwrap();
    v.try_push(1).unwrap();
    v.try_push(2).unwrap();

    assert_eq!(v.try_push_unique(2), Ok(Insertion::Present(1)));
    assert_eq!(v.try_push_unique(3), Err(AllocError));
    assert_eq!(v, [1, 2]);
    assert_eq!(v.capacity(), 2);
}
