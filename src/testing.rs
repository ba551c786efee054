//! Test helpers: an allocator that runs out after a fixed number of
//! allocations, and an element type that counts its drops.

use core::cell::Cell;
use core::ptr::NonNull;

use crate::allocator::{AllocError, Allocator, Global, Layout};

/// Forwards to `Global` until its allocation budget is spent.
///
/// Every `allocate`, `grow` and `shrink` call consumes one unit of budget.
pub struct Budget {
    remaining: Cell<usize>,
    live_bytes: Cell<usize>,
}

impl Budget {
    pub fn new(allocations: usize) -> Self {
        Budget {
            remaining: Cell::new(allocations),
            live_bytes: Cell::new(0),
        }
    }

    pub fn set_remaining(&self, allocations: usize) {
        self.remaining.set(allocations);
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }

    fn take(&self) -> Result<(), AllocError> {
        match self.remaining.get() {
            0 => Err(AllocError),
            n => {
                self.remaining.set(n - 1);
                Ok(())
            }
        }
    }
}

unsafe impl Allocator for Budget {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        self.take()?;
        let alloc = Global.allocate(layout)?;
        self.live_bytes.set(self.live_bytes.get() + layout.size());

        Ok(alloc)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        Global.deallocate(ptr, layout);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
    }

    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        self.take()?;
        let alloc = Global.grow(ptr, old_layout, new_layout)?;
        self.live_bytes.set(self.live_bytes.get() + new_layout.size() - old_layout.size());

        Ok(alloc)
    }

    unsafe fn shrink(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        self.take()?;
        let alloc = Global.shrink(ptr, old_layout, new_layout)?;
        self.live_bytes.set(self.live_bytes.get() - (old_layout.size() - new_layout.size()));

        Ok(alloc)
    }
}

/// Increments the shared counter when dropped.
#[derive(Debug)]
pub struct DropCounter<'a> {
    pub value: i32,
    pub drops: &'a Cell<usize>,
}

impl<'a> DropCounter<'a> {
    pub fn new(value: i32, drops: &'a Cell<usize>) -> Self {
        DropCounter { value, drops }
    }
}

impl Clone for DropCounter<'_> {
    fn clone(&self) -> Self {
        DropCounter { value: self.value, drops: self.drops }
    }
}

impl PartialEq for DropCounter<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for DropCounter<'_> {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
