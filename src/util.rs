use core::mem;

use crate::allocator::{AllocError, Layout};

/// Capacity of the first allocation made by a growing push or insertion.
pub(crate) const MIN_GROWTH_CAPACITY: usize = 2;

const MAX_CAPACITY: usize = isize::MAX as usize;

pub(crate) fn array_layout<T>(n: usize) -> Result<Layout, AllocError> {
    let size = mem::size_of::<T>().checked_mul(n).ok_or(AllocError)?;
    Layout::from_size_align(size, mem::align_of::<T>()).map_err(|_| AllocError)
}

/// Rounds a requested capacity up to the next power of two.
///
/// Zero stays zero, which maps to the unallocated state.
pub(crate) fn pow2_capacity(requested: usize) -> Result<usize, AllocError> {
    if requested == 0 {
        return Ok(0);
    }

    let cap = requested.checked_next_power_of_two().ok_or(AllocError)?;
    if cap > MAX_CAPACITY {
        return Err(AllocError);
    }

    Ok(cap)
}

/// Capacity after a growth step: doubles the current capacity, starting at
/// `MIN_GROWTH_CAPACITY` when nothing is allocated yet.
pub(crate) fn grow_doubling(cap: usize) -> Result<usize, AllocError> {
    if cap == 0 {
        return Ok(MIN_GROWTH_CAPACITY);
    }

    match cap.checked_mul(2) {
        Some(new_cap) if new_cap <= MAX_CAPACITY => Ok(new_cap),
        _ => Err(AllocError),
    }
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn alloc_failed() -> ! {
    panic!("memory allocation failed");
}

pub mod nnptr {
    use core::ptr::{self, NonNull};

    #[inline(always)]
    pub unsafe fn read<T>(src: NonNull<T>) -> T {
        ptr::read(src.as_ptr())
    }

    #[inline(always)]
    pub unsafe fn write<T>(dst: NonNull<T>, val: T) {
        ptr::write(dst.as_ptr(), val)
    }

    #[inline(always)]
    pub unsafe fn copy<T>(src: NonNull<T>, dst: NonNull<T>, count: usize) {
        ptr::copy(src.as_ptr(), dst.as_ptr(), count)
    }

    #[inline(always)]
    pub unsafe fn copy_nonoverlapping<T>(src: NonNull<T>, dst: NonNull<T>, count: usize) {
        ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), count)
    }

    #[inline(always)]
    pub unsafe fn add<T>(p: NonNull<T>, count: usize) -> NonNull<T> {
        NonNull::new_unchecked(p.as_ptr().add(count))
    }
}

#[test]
fn pow2_rounding() {
    assert_eq!(pow2_capacity(0), Ok(0));
    assert_eq!(pow2_capacity(1), Ok(1));
    assert_eq!(pow2_capacity(5), Ok(8));
    assert_eq!(pow2_capacity(8), Ok(8));
    assert_eq!(pow2_capacity(1000), Ok(1024));
    assert_eq!(pow2_capacity(usize::MAX), Err(AllocError));
    assert_eq!(pow2_capacity(MAX_CAPACITY), Err(AllocError));
}

#[test]
fn doubling() {
    assert_eq!(grow_doubling(0), Ok(2));
    assert_eq!(grow_doubling(2), Ok(4));
    assert_eq!(grow_doubling(64), Ok(128));
    assert_eq!(grow_doubling(1 << 62), Err(AllocError));
}

#[test]
fn layouts() {
    assert_eq!(array_layout::<u32>(4).unwrap().size(), 16);
    assert_eq!(array_layout::<u64>(3).unwrap().align(), mem::align_of::<u64>());
    assert_eq!(array_layout::<()>(1000).unwrap().size(), 0);
    assert!(array_layout::<u64>(usize::MAX).is_err());
}
