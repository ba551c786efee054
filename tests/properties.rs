use proptest::prelude::*;

use pow2vec::{Insertion, Vector};

fn from_items(items: &[i32]) -> Vector<i32> {
    Vector::try_from_slice(items).unwrap()
}

fn naive_lower_bound(items: &[i32], item: i32) -> usize {
    items.iter().position(|x| *x >= item).unwrap_or(items.len())
}

proptest! {
    #[test]
    fn reserve_rounds_up_to_pow2(requests in prop::collection::vec(0usize..5000, 1..8)) {
        let mut v: Vector<u64> = Vector::new();
        let mut previous = 0;
        for cap in requests {
            v.try_reserve_capacity(cap).unwrap();
            prop_assert!(v.capacity() >= cap);
            prop_assert!(v.capacity() >= previous);
            prop_assert!(v.capacity() == 0 || v.capacity().is_power_of_two());
            previous = v.capacity();
        }
    }

    #[test]
    fn push_pop(items in prop::collection::vec(any::<i32>(), 0..200), extra: i32) {
        let mut v = from_items(&items);
        v.try_push(extra).unwrap();
        prop_assert_eq!(v.len(), items.len() + 1);
        prop_assert_eq!(v.pop(), Some(extra));
        prop_assert_eq!(&v[..], &items[..]);
        prop_assert!(v.capacity().is_power_of_two() || v.capacity() == 0);
    }

    #[test]
    fn insert_remove(items in prop::collection::vec(any::<i32>(), 0..100), extra: i32, pos: prop::sample::Index) {
        let mut v = from_items(&items);
        let idx = pos.index(items.len() + 1);
        v.try_insert(idx, extra).unwrap();
        prop_assert_eq!(v[idx], extra);
        prop_assert_eq!(v.remove(idx), extra);
        prop_assert_eq!(&v[..], &items[..]);
    }

    #[test]
    fn shrink_fits_length(items in prop::collection::vec(any::<i32>(), 0..300), keep in 0usize..300) {
        let mut v = from_items(&items);
        while v.len() > keep {
            v.pop();
        }
        v.try_shrink().unwrap();
        if v.is_empty() {
            prop_assert_eq!(v.capacity(), 0);
        } else {
            prop_assert_eq!(v.capacity(), v.len().next_power_of_two());
        }
    }

    #[test]
    fn sort_is_sorted_permutation(items in prop::collection::vec(-50i32..50, 0..500)) {
        let mut v = from_items(&items);
        v.sort();

        let mut expected = items.clone();
        expected.sort();
        prop_assert_eq!(&v[..], &expected[..]);

        let once = v.clone();
        v.sort();
        prop_assert_eq!(v, once);
    }

    #[test]
    fn sort_range_only_touches_range(items in prop::collection::vec(any::<i32>(), 1..200), a: prop::sample::Index, b: prop::sample::Index) {
        let mut v = from_items(&items);
        let start = a.index(items.len());
        let len = b.index(items.len() - start + 1);
        v.sort_range(start, len);

        let mut expected = items.clone();
        expected[start..start + len].sort();
        prop_assert_eq!(&v[..], &expected[..]);
    }

    #[test]
    fn insertion_index_is_lower_bound(mut items in prop::collection::vec(-100i32..100, 0..400), probe in -110i32..110) {
        items.sort();
        let v = from_items(&items);
        prop_assert_eq!(v.insertion_index_sorted(&probe), naive_lower_bound(&items, probe));
    }

    #[test]
    fn insert_sorted_keeps_order(items in prop::collection::vec(-20i32..20, 0..100)) {
        let mut v: Vector<i32> = Vector::new();
        let mut unique: Vector<i32> = Vector::new();
        for item in &items {
            v.try_insert_sorted(*item).unwrap();
            let outcome = unique.try_insert_sorted_unique(*item).unwrap();
            prop_assert_eq!(unique[outcome.index()], *item);
        }

        let mut expected = items.clone();
        expected.sort();
        prop_assert_eq!(&v[..], &expected[..]);

        expected.dedup();
        prop_assert_eq!(&unique[..], &expected[..]);
    }

    #[test]
    fn push_unique_never_duplicates(items in prop::collection::vec(0i32..30, 0..100)) {
        let mut v: Vector<i32> = Vector::new();
        for item in &items {
            match v.try_push_unique(*item).unwrap() {
                Insertion::Inserted(idx) => prop_assert_eq!(idx, v.len() - 1),
                Insertion::Present(idx) => prop_assert_eq!(v[idx], *item),
            }
        }

        for (i, item) in v.iter().enumerate() {
            prop_assert_eq!(v.index_of(item), Some(i));
        }
    }

    #[test]
    fn equality_is_reflexive_and_symmetric(a in prop::collection::vec(0i32..4, 0..6), b in prop::collection::vec(0i32..4, 0..6)) {
        let va = from_items(&a);
        let vb = from_items(&b);
        prop_assert!(va.equals(&va));
        prop_assert_eq!(va.equals(&vb), vb.equals(&va));
        prop_assert_eq!(va.equals(&vb), a == b);
    }
}
