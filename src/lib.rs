//! A growable contiguous vector whose capacity is always a power of two,
//! with linear search, set-like queries and sorted maintenance layered on
//! top through equality and ordering relations.
//!
//! ```
//! use pow2vec::{Insertion, Vector};
//!
//! let mut v = Vector::new();
//! v.try_extend_from_slice(&[3, 2, 4, 1]).unwrap();
//! assert_eq!(v.capacity(), 4);
//!
//! v.sort();
//! assert_eq!(v, [1, 2, 3, 4]);
//! assert_eq!(v.try_insert_sorted_unique(2), Ok(Insertion::Present(1)));
//! assert_eq!(v.try_insert_sorted_unique(7), Ok(Insertion::Inserted(4)));
//! ```

pub mod allocator {
    pub use allocator_api2::alloc::{AllocError, Allocator, Global, Layout};
}

mod buffer;
mod util;
pub mod relation;
pub mod sort;
pub mod vec;
mod search;
mod sorted;
#[cfg(test)]
mod testing;

pub use allocator::AllocError;
pub use relation::{ByFn, Equatable, Natural, Ordered};
pub use vec::Vector;

/// Cache line size in bytes, used to size the linear tail of sorted searches.
#[cfg(not(feature = "cache-line-128"))]
pub const CACHE_LINE_SIZE: usize = 64;
#[cfg(feature = "cache-line-128")]
pub const CACHE_LINE_SIZE: usize = 128;

/// Maximum number of pending ranges held by the quicksort stack.
pub const SORT_STACK_SIZE: usize = 64;

/// Outcome of an insertion that declines to add duplicates.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Insertion {
    /// The element was added at this index.
    Inserted(usize),
    /// An equal element already lives at this index, nothing was added.
    Present(usize),
}

impl Insertion {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Insertion::Inserted(idx) | Insertion::Present(idx) => idx,
        }
    }

    #[inline]
    pub fn is_inserted(self) -> bool {
        matches!(self, Insertion::Inserted(_))
    }
}
