//! Equality and ordering relations.
//!
//! The search and sorted layers of [`Vector`](crate::Vector) are generic over
//! these relations, so the same container can be searched with `==`, with a
//! key comparison, or with any other predicate picked at the call site.

use core::cmp::Ordering;

/// An equality relation over `T`.
pub trait Equatable<T> {
    fn equal(&self, a: &T, b: &T) -> bool;

    /// Compares two slices element-wise, in order.
    ///
    /// Relations that are plain value equality override this to compare the
    /// slices in one pass.
    fn equal_slices(&self, a: &[T], b: &[T]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.equal(x, y))
    }
}

/// A strict weak ordering over `T`, expressed as a less-than predicate.
pub trait Ordered<T>: Equatable<T> {
    fn less(&self, a: &T, b: &T) -> bool;

    /// Three-way comparison derived from `less`, for use with comparator
    /// based sort routines.
    fn compare(&self, a: &T, b: &T) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// `==` and `<`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: PartialEq> Equatable<T> for Natural {
    #[inline]
    fn equal(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn equal_slices(&self, a: &[T], b: &[T]) -> bool {
        // Lowered to a memcmp for primitive element types.
        a == b
    }
}

impl<T: PartialOrd> Ordered<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T, F> Equatable<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equal(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// A relation built from an equality closure and a less-than closure.
#[derive(Copy, Clone)]
pub struct ByFn<E, L> {
    eq: E,
    less: L,
}

impl<E, L> ByFn<E, L> {
    pub fn new(eq: E, less: L) -> Self {
        ByFn { eq, less }
    }
}

impl<T, E, L> Equatable<T> for ByFn<E, L>
where
    E: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equal(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }
}

impl<T, E, L> Ordered<T> for ByFn<E, L>
where
    E: Fn(&T, &T) -> bool,
    L: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        (self.less)(a, b)
    }
}

#[test]
fn natural_compare() {
    assert_eq!(Natural.compare(&1, &2), Ordering::Less);
    assert_eq!(Natural.compare(&2, &1), Ordering::Greater);
    assert_eq!(Natural.compare(&2, &2), Ordering::Equal);
    assert!(Natural.equal_slices(&[1u8, 2, 3][..], &[1, 2, 3][..]));
    assert!(!Natural.equal_slices(&[1u8, 2, 3][..], &[1, 2][..]));
}

#[test]
fn closures_as_relations() {
    let by_abs = |a: &i32, b: &i32| a.abs() == b.abs();
    assert!(by_abs.equal(&-3, &3));
    assert!(by_abs.equal_slices(&[1, -2][..], &[-1, 2][..]));
    assert!(!by_abs.equal_slices(&[1, -2][..], &[-1, 3][..]));

    let by_key = ByFn::new(
        |a: &(u32, char), b: &(u32, char)| a.0 == b.0,
        |a: &(u32, char), b: &(u32, char)| a.0 < b.0,
    );
    assert!(by_key.equal(&(1, 'a'), &(1, 'b')));
    assert_eq!(by_key.compare(&(2, 'a'), &(1, 'z')), Ordering::Greater);
}
