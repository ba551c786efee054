use core::fmt;
use core::iter::{Enumerate, Rev};
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use crate::allocator::{AllocError, Allocator, Global};
use crate::buffer::RawBuffer;
use crate::util::{self, alloc_failed, nnptr};

/// Iterator over `(index, &item)` pairs, front to back.
pub type IterIndexed<'a, T> = Enumerate<slice::Iter<'a, T>>;

/// Iterator over `(index, &item)` pairs, back to front.
pub type IterIndexedRev<'a, T> = Rev<Enumerate<slice::Iter<'a, T>>>;

/// A contiguous growable array whose capacity is zero or a power of two.
///
/// Pushes and insertions double the capacity when the vector is full, explicit
/// reservations round the requested capacity up to the next power of two, and
/// `shrink` brings it back down to the smallest power of two that fits.
///
/// Every operation that may allocate has a `try_` form returning
/// [`AllocError`] on failure, in which case the vector is left untouched.
/// The other forms panic if the allocator fails.
///
/// Reallocation moves the storage: slices borrowed from the vector cannot be
/// held across a mutating call, which the borrow checker enforces.
pub struct Vector<T, A: Allocator = Global> {
    buffer: RawBuffer<T>,
    len: usize,
    allocator: A,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator + Send> Send for Vector<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Vector<T, A> {}

impl<T> Vector<T, Global> {
    /// Creates an empty vector without doing any memory allocation.
    #[inline]
    pub const fn new() -> Self {
        Vector::new_in(Global)
    }

    /// Creates an empty vector able to hold at least `cap` items.
    pub fn try_with_capacity(cap: usize) -> Result<Self, AllocError> {
        Vector::try_with_capacity_in(cap, Global)
    }

    pub fn try_from_slice(data: &[T]) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Vector::try_from_slice_in(data, Global)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Creates an empty vector in the provided allocator, without allocating.
    #[inline]
    pub const fn new_in(allocator: A) -> Self {
        Vector {
            buffer: RawBuffer::dangling(),
            len: 0,
            allocator,
            _marker: PhantomData,
        }
    }

    /// Creates an empty pre-allocated vector.
    ///
    /// The capacity is `cap` rounded up to the next power of two. Does not
    /// allocate memory if `cap` is zero.
    pub fn try_with_capacity_in(cap: usize, allocator: A) -> Result<Self, AllocError> {
        let cap = util::pow2_capacity(cap)?;
        let buffer = RawBuffer::try_allocate_in(cap, &allocator)?;

        Ok(Vector {
            buffer,
            len: 0,
            allocator,
            _marker: PhantomData,
        })
    }

    pub fn try_from_slice_in(data: &[T], allocator: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut v = Self::try_with_capacity_in(data.len(), allocator)?;
        v.extend_from_slice_assuming_capacity(data);

        Ok(v)
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    #[inline]
    /// Returns `true` if the vector contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    /// Returns the number of elements in the vector, also referred to as its ‘length’.
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    /// Returns the total number of elements the vector can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns number of elements that can be added without reallocating.
    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.capacity() - self.len
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { self.buffer.as_slice(self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { self.buffer.as_mut_slice(self.len) }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.items_ptr().as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.items_ptr().as_ptr()
    }

    /// Ensures the vector can hold at least `min_capacity` elements.
    ///
    /// Does nothing if the capacity is already large enough, otherwise the
    /// capacity becomes `min_capacity` rounded up to the next power of two.
    /// On failure the vector is left as it was.
    #[inline]
    pub fn try_reserve_capacity(&mut self, min_capacity: usize) -> Result<(), AllocError> {
        if self.capacity() >= min_capacity {
            return Ok(());
        }

        let new_cap = util::pow2_capacity(min_capacity)?;
        self.try_realloc_with_capacity(new_cap)
    }

    pub fn reserve_capacity(&mut self, min_capacity: usize) {
        if self.try_reserve_capacity(min_capacity).is_err() {
            alloc_failed();
        }
    }

    /// Ensures the vector can hold `additional` more elements than it currently contains.
    #[inline]
    pub fn try_expand(&mut self, additional: usize) -> Result<(), AllocError> {
        let required = self.len.checked_add(additional).ok_or(AllocError)?;
        self.try_reserve_capacity(required)
    }

    pub fn expand(&mut self, additional: usize) {
        if self.try_expand(additional).is_err() {
            alloc_failed();
        }
    }

    /// Doubles the capacity if every slot is in use.
    #[inline(always)]
    fn try_grow_if_full(&mut self) -> Result<(), AllocError> {
        if self.len < self.capacity() {
            return Ok(());
        }

        self.try_grow()
    }

    // Kept out of line so that the common push path stays small.
    #[cold]
    fn try_grow(&mut self) -> Result<(), AllocError> {
        let new_cap = util::grow_doubling(self.capacity())?;
        self.try_realloc_with_capacity(new_cap)
    }

    #[cold]
    fn try_realloc_with_capacity(&mut self, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(new_cap >= self.len);
        unsafe { self.buffer.try_reallocate_in(new_cap, &self.allocator) }
    }

    /// Reduces the capacity to the smallest power of two that holds the
    /// current elements, releasing the storage entirely if the vector is empty.
    ///
    /// If the allocator fails to shrink the allocation, the vector keeps its
    /// previous storage and elements, and the error is returned.
    pub fn try_shrink(&mut self) -> Result<(), AllocError> {
        if self.len == 0 {
            if self.capacity() != 0 {
                log::debug!("releasing storage of an empty vector ({} slots)", self.capacity());
            }
            unsafe {
                self.buffer.deallocate_in(&self.allocator);
            }
            return Ok(());
        }

        let new_cap = util::pow2_capacity(self.len)?;
        if new_cap >= self.capacity() {
            return Ok(());
        }

        self.try_realloc_with_capacity(new_cap)
    }

    pub fn shrink(&mut self) {
        if self.try_shrink().is_err() {
            alloc_failed();
        }
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        unsafe { Some(self.get_unchecked(index)) }
    }

    /// # Safety
    ///
    /// `index` must be lower than the length of the vector.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        self.buffer.item_ptr(index).as_ref()
    }

    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }

        unsafe { Some(self.get_unchecked_mut(index)) }
    }

    /// # Safety
    ///
    /// `index` must be lower than the length of the vector.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        self.buffer.item_ptr(index).as_mut()
    }

    /// Replaces the element at position `index`, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[track_caller]
    pub fn set(&mut self, index: usize, val: T) -> T {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("set: index {index} should be < len {len}.");
        }

        if index >= self.len {
            assert_failed(index, self.len);
        }

        unsafe { core::mem::replace(self.get_unchecked_mut(index), val) }
    }

    /// Appends an element to the back of the vector, doubling the capacity
    /// if it is full.
    ///
    /// On allocation failure the element is dropped and the vector is unchanged.
    #[inline(always)]
    pub fn try_push(&mut self, val: T) -> Result<(), AllocError> {
        self.try_grow_if_full()?;

        unsafe {
            self.buffer.write_item(self.len, val);
        }
        self.len += 1;

        Ok(())
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Panics
    ///
    /// Panics if memory allocation fails.
    #[inline]
    pub fn push(&mut self, val: T) {
        if self.try_push(val).is_err() {
            alloc_failed();
        }
    }

    /// Removes the last element from the vector and returns it, or `None` if it is empty.
    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        unsafe { Some(self.buffer.read_item(self.len)) }
    }

    /// Inserts an element at position `index` within the vector, shifting all
    /// elements after it to the right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<(), AllocError> {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        let len = self.len;
        if index > len {
            assert_failed(index, len);
        }

        // Space for the new element.
        self.try_grow_if_full()?;

        unsafe {
            let p = self.buffer.item_ptr(index);
            if index < len {
                // Shift everything over to make space. (Duplicating the
                // `index`th element into two consecutive places.)
                nnptr::copy(p, nnptr::add(p, 1), len - index);
            }
            // Write it in, overwriting the first copy of the `index`th
            // element.
            nnptr::write(p, element);
        }
        self.len += 1;

        Ok(())
    }

    /// Inserts an element at position `index` within the vector.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or if memory allocation fails.
    #[track_caller]
    pub fn insert(&mut self, index: usize, element: T) {
        if self.try_insert(index, element).is_err() {
            alloc_failed();
        }
    }

    /// Removes and returns the element at position `index` within the vector,
    /// shifting all elements after it to the left.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("remove: index {index} should be < len {len}.");
        }

        if index >= self.len {
            assert_failed(index, self.len);
        }

        unsafe {
            // The place we are taking from.
            let ptr = self.buffer.item_ptr(index);
            // Copy it out, unsafely having a copy of the value on
            // the stack and in the vector at the same time.
            let ret = nnptr::read(ptr);

            // Shift everything down to fill in that spot.
            nnptr::copy(nnptr::add(ptr, 1), ptr, self.len - index - 1);
            self.len -= 1;

            ret
        }
    }

    /// Removes all values. The capacity and the storage are left untouched.
    pub fn clear(&mut self) {
        let elems: *mut [T] = self.as_mut_slice();
        unsafe {
            self.len = 0;
            ptr::drop_in_place(elems);
        }
    }

    /// Clones and appends the contents of the slice to the back of the vector.
    ///
    /// Reserves room for the whole slice up front. Does nothing if the slice is empty.
    pub fn try_extend_from_slice(&mut self, slice: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        if slice.is_empty() {
            return Ok(());
        }

        self.try_expand(slice.len())?;
        self.extend_from_slice_assuming_capacity(slice);

        Ok(())
    }

    pub fn extend_from_slice(&mut self, slice: &[T])
    where
        T: Clone,
    {
        if self.try_extend_from_slice(slice).is_err() {
            alloc_failed();
        }
    }

    fn extend_from_slice_assuming_capacity(&mut self, slice: &[T])
    where
        T: Clone,
    {
        assert!(self.remaining_capacity() >= slice.len());
        for item in slice {
            // The length is bumped per item so that a panicking clone
            // leaves every written element owned by the vector.
            unsafe {
                self.buffer.write_item(self.len, item.clone());
            }
            self.len += 1;
        }
    }

    /// Moves all the elements of `other` to the back of this vector, leaving
    /// `other` empty.
    ///
    /// On failure both vectors are left untouched.
    pub fn try_append<B: Allocator>(&mut self, other: &mut Vector<T, B>) -> Result<(), AllocError> {
        let count = other.len;
        if count == 0 {
            return Ok(());
        }

        self.try_expand(count)?;

        unsafe {
            let dst = self.buffer.item_ptr(self.len);
            nnptr::copy_nonoverlapping(other.buffer.items_ptr(), dst, count);
        }
        other.len = 0;
        self.len += count;

        Ok(())
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        let len = self.len;
        let items = self.as_mut_slice();
        for i in 0..len / 2 {
            items.swap(i, len - i - 1);
        }
    }

    /// Creates an independent copy of the vector, in a clone of its allocator.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        A: Clone,
    {
        Self::try_from_slice_in(self.as_slice(), self.allocator.clone())
    }

    /// Creates a new vector holding `transform(item)` for every item of this one.
    ///
    /// The storage for all the elements is reserved before the first call to `transform`.
    pub fn try_deep_copy<F>(&self, mut transform: F) -> Result<Self, AllocError>
    where
        F: FnMut(&T) -> T,
        A: Clone,
    {
        let mut copy = Self::try_with_capacity_in(self.len, self.allocator.clone())?;
        for item in self.as_slice() {
            unsafe {
                copy.buffer.write_item(copy.len, transform(item));
            }
            copy.len += 1;
        }

        Ok(copy)
    }

    /// Clones the elements into the front of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than the vector.
    #[track_caller]
    pub fn copy_to_slice(&self, dst: &mut [T])
    where
        T: Clone,
    {
        dst[..self.len].clone_from_slice(self.as_slice());
    }

    /// Iterates over `(index, &item)` pairs from the first element to the last.
    #[inline]
    pub fn iter_indexed(&self) -> IterIndexed<'_, T> {
        self.as_slice().iter().enumerate()
    }

    /// Iterates over `(index, &item)` pairs from the last element to the first.
    #[inline]
    pub fn iter_indexed_rev(&self) -> IterIndexedRev<'_, T> {
        self.as_slice().iter().enumerate().rev()
    }

    /// Returns the index of the first element that satisfies `predicate`.
    pub fn first_index_where<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.as_slice().iter().position(|item| predicate(item))
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        self.clear();
        unsafe {
            self.buffer.deallocate_in(&self.allocator);
        }
    }
}

impl<T> Default for Vector<T, Global> {
    fn default() -> Self {
        Vector::new()
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Vector<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(v) => v,
            Err(_) => alloc_failed(),
        }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq, A: Allocator, B: Allocator> PartialEq<Vector<T, B>> for Vector<T, A> {
    fn eq(&self, other: &Vector<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T: PartialEq, A: Allocator> PartialEq<[T]> for Vector<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, A: Allocator> PartialEq<&[T]> for Vector<T, A> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, A: Allocator, const N: usize> PartialEq<[T; N]> for Vector<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.expand(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T, Global> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Vector::new();
        v.extend(iter);
        v
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(test)]
fn from_items(items: &[i32]) -> Vector<i32> {
    Vector::try_from_slice(items).unwrap()
}

#[test]
fn base_operations() {
    let mut v = Vector::new();
    assert!(v.is_empty());

    v.extend_from_slice(&[3, 2, 4, 1]);
    assert!(!v.is_empty());
    assert_eq!(v, [3, 2, 4, 1]);
    assert_eq!(v[2], 4);
    assert_eq!(v.first(), Some(&3));
    assert_eq!(v.last(), Some(&1));

    assert_eq!(v.set(2, 5), 4);
    assert_eq!(v[2], 5);

    v.push(4);
    assert_eq!(v, [3, 2, 5, 1, 4]);

    assert_eq!(v.pop(), Some(4));
    assert_eq!(v, [3, 2, 5, 1]);

    v.insert(2, 4);
    assert_eq!(v, [3, 2, 4, 5, 1]);

    assert_eq!(v.remove(1), 2);
    assert_eq!(v, [3, 4, 5, 1]);

    let cap = v.capacity();
    v.clear();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), cap);
}

#[test]
fn push_then_access() {
    let mut v = Vector::new();
    for item in [3, 2, 4, 1] {
        v.try_push(item).unwrap();
    }
    assert_eq!(v, [3, 2, 4, 1]);
    assert_eq!(v.get(2), Some(&4));
    assert_eq!(v.get(4), None);
    assert_eq!(v.first(), Some(&3));
    assert_eq!(v.last(), Some(&1));

    assert_eq!(v.pop(), Some(1));
    assert_eq!(v, [3, 2, 4]);
}

#[test]
fn insert_remove_roundtrip() {
    let mut v = from_items(&[3, 2, 4, 1]);
    v.try_insert(2, 99).unwrap();
    assert_eq!(v, [3, 2, 99, 4, 1]);
    assert_eq!(v.remove(2), 99);
    assert_eq!(v, [3, 2, 4, 1]);

    // Inserting at the length behaves like a push.
    v.try_insert(4, 7).unwrap();
    assert_eq!(v, [3, 2, 4, 1, 7]);
    assert_eq!(v.remove(4), 7);

    v.try_insert(0, 0).unwrap();
    assert_eq!(v, [0, 3, 2, 4, 1]);
}

#[test]
#[should_panic]
fn insert_past_len() {
    let mut v = from_items(&[1, 2]);
    let _ = v.try_insert(3, 0);
}

#[test]
#[should_panic]
fn remove_past_len() {
    let mut v = from_items(&[1, 2]);
    v.remove(2);
}

#[test]
#[should_panic]
fn set_past_len() {
    let mut v = from_items(&[1, 2]);
    v.set(2, 0);
}

#[test]
fn pop_empty() {
    let mut v: Vector<u8> = Vector::new();
    assert_eq!(v.pop(), None);
    assert_eq!(v.first(), None);
    assert_eq!(v.last(), None);
}

#[test]
fn growth_doubles_from_two() {
    let mut v = Vector::new();
    assert_eq!(v.capacity(), 0);

    let mut caps = std::vec::Vec::new();
    for i in 0u32..17 {
        v.push(i);
        caps.push(v.capacity());
    }

    assert_eq!(&caps[..4], &[2, 2, 4, 4]);
    assert_eq!(caps[8], 16);
    assert_eq!(caps[16], 32);
    assert!(caps.iter().all(|cap| cap.is_power_of_two()));
}

#[test]
fn capacity() {
    let mut v: Vector<i32> = Vector::new();

    v.try_reserve_capacity(5).unwrap();
    assert_eq!(v.capacity(), 8);

    v.try_expand(3).unwrap();
    assert!(v.capacity() >= 8);

    v.try_expand(9).unwrap();
    assert_eq!(v.capacity(), 16);

    // Already large enough.
    v.try_reserve_capacity(3).unwrap();
    assert_eq!(v.capacity(), 16);

    v.push(2);
    assert!(v.capacity() >= v.len());

    v.clear();
    assert_eq!(v.len(), 0);

    v.try_shrink().unwrap();
    assert_eq!(v.capacity(), 0);

    assert_eq!(v.try_expand(usize::MAX), Err(AllocError));
    assert_eq!(v.try_reserve_capacity(usize::MAX), Err(AllocError));
    assert_eq!(v.capacity(), 0);
}

#[test]
fn shrink_to_pow2() {
    let mut v: Vector<u16> = Vector::try_with_capacity(100).unwrap();
    assert_eq!(v.capacity(), 128);

    v.extend_from_slice(&[1, 2, 3, 4, 5]);
    v.shrink();
    assert_eq!(v.capacity(), 8);
    assert_eq!(v, [1, 2, 3, 4, 5]);

    // Already minimal.
    v.shrink();
    assert_eq!(v.capacity(), 8);

    v.pop();
    v.shrink();
    assert_eq!(v.capacity(), 4);
    assert_eq!(v, [1, 2, 3, 4]);
}

#[test]
fn append_vectors() {
    let mut a = from_items(&[1, 2, 3]);
    let mut b = from_items(&[4, 5]);
    a.try_append(&mut b).unwrap();
    assert_eq!(a, [1, 2, 3, 4, 5]);
    assert!(b.is_empty());

    // Empty source is a no-op.
    a.try_append(&mut b).unwrap();
    assert_eq!(a.len(), 5);

    a.try_extend_from_slice(&[]).unwrap();
    assert_eq!(a.len(), 5);
}

#[test]
fn reverse() {
    let mut v = from_items(&[1, 2, 3, 4]);
    v.reverse();
    assert_eq!(v, [4, 3, 2, 1]);

    let mut v = from_items(&[1, 2, 3, 4, 5]);
    v.reverse();
    assert_eq!(v, [5, 4, 3, 2, 1]);

    let mut v: Vector<i32> = Vector::new();
    v.reverse();
    assert!(v.is_empty());
}

#[test]
fn copies() {
    let v1 = from_items(&[3, 2, 4, 1]);

    let v2 = v1.try_deep_copy(|item| item + 1).unwrap();
    assert_eq!(v2, [4, 3, 5, 2]);
    assert_eq!(v2.capacity(), 4);

    let mut v2 = v1.try_clone().unwrap();
    assert_eq!(v1, v2);
    assert_ne!(v1.as_ptr(), v2.as_ptr());

    let mut arr = [0; 4];
    v1.copy_to_slice(&mut arr);
    assert_eq!(v1, arr);

    v2.pop();
    assert_ne!(v1, v2);

    v2.push(5);
    assert_ne!(v1, v2);

    let empty: Vector<i32> = Vector::new();
    let copy = empty.clone();
    assert!(copy.is_empty());
    assert_eq!(copy.capacity(), 0);
}

#[test]
fn iteration() {
    let v = from_items(&[3, 2, 4, 1]);

    let forward: std::vec::Vec<(usize, i32)> = v.iter_indexed().map(|(i, x)| (i, *x)).collect();
    assert_eq!(forward, [(0, 3), (1, 2), (2, 4), (3, 1)]);

    let backward: std::vec::Vec<(usize, i32)> = v.iter_indexed_rev().map(|(i, x)| (i, *x)).collect();
    assert_eq!(backward, [(3, 1), (2, 4), (1, 2), (0, 3)]);

    // Restartable.
    assert_eq!(v.iter_indexed().count(), 4);

    let sum: i32 = (&v).into_iter().sum();
    assert_eq!(sum, 10);

    let collected: Vector<i32> = v.iter().map(|x| x * 2).collect();
    assert_eq!(collected, [6, 4, 8, 2]);
}

#[test]
fn first_index_where() {
    let v = from_items(&[3, 2, 4, 1]);
    assert_eq!(v.first_index_where(|x| *x > 3), Some(2));
    assert_eq!(v.first_index_where(|x| *x > 5), None);
}

#[test]
fn drops_elements() {
    use crate::testing::DropCounter;
    use core::cell::Cell;

    let drops = Cell::new(0);
    {
        let mut v = Vector::new();
        for i in 0..10 {
            v.push(DropCounter::new(i, &drops));
        }

        let removed = v.remove(3);
        assert_eq!(removed.value, 3);
        drop(removed);
        assert_eq!(drops.get(), 1);

        v.set(0, DropCounter::new(100, &drops));
        assert_eq!(drops.get(), 2);

        v.clear();
        assert_eq!(drops.get(), 11);

        v.push(DropCounter::new(0, &drops));
        v.push(DropCounter::new(1, &drops));
    }
    assert_eq!(drops.get(), 13);
}

#[test]
fn zero_sized_items() {
    let mut v = Vector::new();
    for _ in 0..100 {
        v.push(());
    }
    assert_eq!(v.len(), 100);
    assert_eq!(v.capacity(), 128);
    v.insert(50, ());
    assert_eq!(v.remove(0), ());
    v.clear();
    v.shrink();
    assert_eq!(v.capacity(), 0);
}

#[test]
fn alloc_failure_leaves_vector_untouched() {
    use crate::testing::Budget;

    let allocator = Budget::new(1);
    let mut v = Vector::new_in(&allocator);
    v.try_push(1u32).unwrap();
    v.try_push(2).unwrap();
    assert_eq!(v.capacity(), 2);

    assert_eq!(v.try_push(3), Err(AllocError));
    assert_eq!(v, [1, 2]);
    assert_eq!(v.capacity(), 2);

    assert_eq!(v.try_insert(0, 3), Err(AllocError));
    assert_eq!(v, [1, 2]);

    assert_eq!(v.try_reserve_capacity(100), Err(AllocError));
    assert_eq!(v.capacity(), 2);

    assert_eq!(v.try_extend_from_slice(&[3, 4, 5]), Err(AllocError));
    assert_eq!(v, [1, 2]);

    assert!(v.try_clone().is_err());
    assert!(v.try_deep_copy(|x| *x).is_err());

    allocator.set_remaining(1);
    v.try_push(3).unwrap();
    assert_eq!(v, [1, 2, 3]);
    assert_eq!(v.capacity(), 4);

    v.pop();
    v.pop();
    // Shrinking needs a reallocation the allocator refuses.
    assert_eq!(v.try_shrink(), Err(AllocError));
    assert_eq!(v, [1]);
    assert_eq!(v.capacity(), 4);

    drop(v);
    assert_eq!(allocator.live_bytes(), 0);
}
