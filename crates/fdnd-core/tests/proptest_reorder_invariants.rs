//! Property-based invariant tests for the reorder transform.
//!
//! 1. Length and multiset of elements are preserved
//! 2. The moved element lands at the destination
//! 3. The relative order of all other elements is unchanged
//! 4. Equal indices reproduce the input
//! 5. Out-of-range indices are rejected without panicking

use fdnd_core::reorder;
use proptest::prelude::*;

fn list_and_indices() -> impl Strategy<Value = (Vec<u32>, usize, usize)> {
    (1usize..40).prop_flat_map(|len| {
        (
            prop::collection::vec(any::<u32>(), len),
            0..len,
            0..len,
        )
    })
}

proptest! {
    #[test]
    fn preserves_length_and_multiset((list, s, d) in list_and_indices()) {
        let out = reorder(&list, s, d).expect("indices in range");
        prop_assert_eq!(out.len(), list.len());
        let mut a = list.clone();
        let mut b = out.clone();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn moved_element_lands_at_destination((list, s, d) in list_and_indices()) {
        let out = reorder(&list, s, d).expect("indices in range");
        prop_assert_eq!(out[d], list[s]);
    }

    #[test]
    fn others_keep_relative_order((list, s, d) in list_and_indices()) {
        let tagged: Vec<(usize, u32)> = list.iter().copied().enumerate().collect();
        let out = reorder(&tagged, s, d).expect("indices in range");
        let rest: Vec<usize> = out.iter().map(|(i, _)| *i).filter(|i| *i != s).collect();
        let mut sorted = rest.clone();
        sorted.sort_unstable();
        prop_assert_eq!(rest, sorted);
    }

    #[test]
    fn equal_indices_are_identity((list, s, _d) in list_and_indices()) {
        prop_assert_eq!(reorder(&list, s, s), Some(list.clone()));
    }

    #[test]
    fn out_of_range_is_rejected(list in prop::collection::vec(any::<u8>(), 0..10), extra in 0usize..5) {
        let len = list.len();
        prop_assert_eq!(reorder(&list, len + extra, 0), None);
        prop_assert_eq!(reorder(&list, 0, len + extra), None);
    }
}
