use core::ptr::NonNull;

use crate::allocator::{AllocError, Allocator};
use crate::util::{self, nnptr};

/// Raw storage for `cap` items, without length tracking or ownership of the
/// allocator.
///
/// The buffer never reads or drops the items it holds, the owner is
/// responsible for that.
pub(crate) struct RawBuffer<T> {
    data: NonNull<T>,
    cap: usize,
}

impl<T> RawBuffer<T> {
    /// Creates an empty buffer without doing any memory allocation.
    #[inline]
    pub const fn dangling() -> Self {
        RawBuffer {
            data: NonNull::dangling(),
            cap: 0,
        }
    }

    /// Allocates storage for exactly `cap` items.
    ///
    /// Does not allocate memory if `cap` is zero or if `T` is zero-sized.
    pub fn try_allocate_in<A: Allocator>(cap: usize, allocator: &A) -> Result<Self, AllocError> {
        if cap == 0 {
            return Ok(Self::dangling());
        }

        let layout = util::array_layout::<T>(cap)?;
        let data = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            allocator.allocate(layout)?.cast::<T>()
        };

        log::trace!("allocated buffer of {} items ({} bytes)", cap, layout.size());

        Ok(RawBuffer { data, cap })
    }

    /// Moves the storage into an allocation of exactly `new_cap` items.
    ///
    /// The first `min(cap, new_cap)` item slots are preserved. If the
    /// allocator fails, the buffer keeps its previous allocation and capacity.
    ///
    /// # Safety
    ///
    /// The provided allocator must be the one this buffer was created with.
    #[cold]
    pub unsafe fn try_reallocate_in<A: Allocator>(&mut self, new_cap: usize, allocator: &A) -> Result<(), AllocError> {
        let old_cap = self.cap;
        if new_cap == old_cap {
            return Ok(());
        }

        if new_cap == 0 {
            self.deallocate_in(allocator);
            return Ok(());
        }

        if old_cap == 0 {
            *self = Self::try_allocate_in(new_cap, allocator)?;
            return Ok(());
        }

        let new_layout = util::array_layout::<T>(new_cap)?;
        if new_layout.size() == 0 {
            self.cap = new_cap;
            return Ok(());
        }

        let old_layout = util::array_layout::<T>(old_cap)?;
        let old_alloc = self.data.cast::<u8>();

        let new_alloc = if new_layout.size() >= old_layout.size() {
            allocator.grow(old_alloc, old_layout, new_layout)
        } else {
            allocator.shrink(old_alloc, old_layout, new_layout)
        }?;

        log::trace!("reallocated buffer from {} to {} items", old_cap, new_cap);

        self.data = new_alloc.cast::<T>();
        self.cap = new_cap;

        Ok(())
    }

    /// Deallocates this raw buffer, leaving it in its unallocated state.
    ///
    /// The items are expected to be dropped by the caller.
    /// It is safe (no-op) to call `deallocate_in` on a buffer that is already in its unallocated state.
    ///
    /// # Safety
    ///
    /// The provided allocator must be the one this raw buffer was created with.
    pub unsafe fn deallocate_in<A: Allocator>(&mut self, allocator: &A) {
        if self.cap == 0 {
            return;
        }

        if let Ok(layout) = util::array_layout::<T>(self.cap) {
            if layout.size() != 0 {
                allocator.deallocate(self.data.cast::<u8>(), layout);
            }
        }

        log::trace!("released buffer of {} items", self.cap);

        *self = Self::dangling();
    }

    #[inline]
    pub fn items_ptr(&self) -> NonNull<T> {
        self.data
    }

    #[inline]
    /// Returns the total number of elements the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub unsafe fn item_ptr(&self, index: usize) -> NonNull<T> {
        nnptr::add(self.data, index)
    }

    #[inline]
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        core::slice::from_raw_parts(self.data.as_ptr(), len)
    }

    #[inline]
    pub unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        core::slice::from_raw_parts_mut(self.data.as_ptr(), len)
    }

    #[inline]
    pub unsafe fn write_item(&mut self, index: usize, val: T) {
        debug_assert!(index < self.cap);
        nnptr::write(self.item_ptr(index), val);
    }

    #[inline]
    pub unsafe fn read_item(&self, index: usize) -> T {
        debug_assert!(index < self.cap);
        nnptr::read(self.item_ptr(index))
    }
}

#[test]
fn realloc_preserves_items() {
    use crate::allocator::Global;

    let allocator = Global;
    let mut buffer: RawBuffer<u32> = RawBuffer::try_allocate_in(2, &allocator).unwrap();
    unsafe {
        buffer.write_item(0, 10);
        buffer.write_item(1, 11);

        buffer.try_reallocate_in(8, &allocator).unwrap();
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.as_slice(2), &[10, 11]);

        buffer.try_reallocate_in(2, &allocator).unwrap();
        assert_eq!(buffer.capacity(), 2);
        assert_eq!(buffer.as_slice(2), &[10, 11]);

        buffer.try_reallocate_in(0, &allocator).unwrap();
        assert_eq!(buffer.capacity(), 0);

        // Already unallocated.
        buffer.deallocate_in(&allocator);
    }
}

#[test]
fn zst_buffer_never_allocates() {
    use crate::testing::Budget;

    let allocator = Budget::new(0);
    let mut buffer: RawBuffer<()> = RawBuffer::try_allocate_in(4, &allocator).unwrap();
    unsafe {
        buffer.try_reallocate_in(64, &allocator).unwrap();
        assert_eq!(buffer.capacity(), 64);
        buffer.deallocate_in(&allocator);
    }
    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn failed_grow_keeps_buffer() {
    use crate::testing::Budget;

    let allocator = Budget::new(1);
    let mut buffer: RawBuffer<u64> = RawBuffer::try_allocate_in(4, &allocator).unwrap();
    unsafe {
        buffer.write_item(3, 42);
        assert_eq!(buffer.try_reallocate_in(16, &allocator), Err(AllocError));
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(buffer.read_item(3), 42);
        buffer.deallocate_in(&allocator);
    }
    assert_eq!(allocator.live_bytes(), 0);
}
