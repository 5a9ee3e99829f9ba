//! Behavioral properties of the ordered collection.

use mechalog_core::arraylist::{ArrayList, ListError, SortOrder, INITIAL_CAPACITY};
use pretty_assertions::assert_eq;

#[test]
fn appends_read_back_in_order() {
    let mut list = ArrayList::new();
    let n = 10_000;

    for i in 0..n {
        list.push(i).unwrap();
    }

    assert_eq!(list.len(), n);
    for i in 0..n {
        assert_eq!(list.get(i), Some(&i));
    }
}

#[test]
fn growth_never_loses_data() {
    let mut list = ArrayList::new();
    let mut expected = Vec::new();

    // mixed appends and front inserts across many growth boundaries
    for i in 0..257usize {
        if i % 3 == 0 {
            list.insert(0, i).unwrap();
            expected.insert(0, i);
        } else {
            list.push(i).unwrap();
            expected.push(i);
        }
    }

    assert_eq!(list.as_slice(), expected.as_slice());
    assert!(list.capacity() >= list.len());
    assert_eq!(list.capacity() % INITIAL_CAPACITY, 0);
}

#[test]
fn insert_then_remove_restores_sequence() {
    let original: ArrayList<u32> = (0..10).collect();

    for i in 0..=original.len() {
        let mut list = original.clone();
        list.insert(i, 999).unwrap();
        assert_eq!(list.len(), original.len() + 1);
        assert_eq!(list.remove(i), Ok(999));
        assert_eq!(list.as_slice(), original.as_slice());
    }
}

#[test]
fn remove_returns_what_get_saw() {
    let mut list: ArrayList<u32> = (100..110).collect();

    let seen = *list.get(4).unwrap();
    let removed = list.remove(4).unwrap();
    assert_eq!(removed, seen);

    // afterwards the gap is closed
    assert_eq!(list.len(), 9);
    assert_eq!(list.get(4), Some(&105));
}

#[test]
fn index_of_and_contains_are_consistent() {
    let list: ArrayList<i32> = vec![2, 4, 6, 8].into_iter().collect();

    for candidate in 0..10 {
        assert_eq!(
            list.index_of(&candidate).is_some(),
            list.contains(&candidate)
        );
    }
}

#[test]
fn sub_list_of_full_range_has_exactly_len_elements() {
    let list: ArrayList<u32> = (0..7).collect();
    let copy = list.sub_list(0, list.len()).unwrap();
    assert_eq!(copy.len(), list.len());
    assert_eq!(copy.as_slice(), list.as_slice());
}

#[test]
fn empty_list_operations() {
    let mut list: ArrayList<u32> = ArrayList::new();

    assert_eq!(list.get(0), None);
    assert_eq!(list.remove(0), Err(ListError::OutOfBounds { index: 0, len: 0 }));
    assert_eq!(list.index_of(&1), None);
    assert_eq!(list.sub_list(0, 0).unwrap().len(), 0);

    // sorting an empty list is a no-op
    list.sort_by(|a, b| a.cmp(b), SortOrder::Ascending);
    assert!(list.is_empty());
}

#[test]
fn sort_orders_adjacent_pairs_both_directions() {
    let values = vec![9, 3, 3, 7, 1, 0, 5, 3, 8, 2];

    let mut ascending: ArrayList<i32> = values.iter().copied().collect();
    ascending.sort_by(|a, b| a.cmp(b), SortOrder::Ascending);
    for pair in ascending.as_slice().windows(2) {
        assert!(pair[0] <= pair[1]);
    }

    let mut descending: ArrayList<i32> = values.into_iter().collect();
    descending.sort_by(|a, b| a.cmp(b), SortOrder::Descending);
    for pair in descending.as_slice().windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[test]
fn sort_with_custom_comparator() {
    let mut list: ArrayList<&str> = vec!["kiwi", "fig", "banana"].into_iter().collect();
    list.sort_by(|a, b| a.len().cmp(&b.len()), SortOrder::Ascending);
    assert_eq!(list.as_slice(), &["fig", "kiwi", "banana"]);
}

#[test]
fn clone_and_original_do_not_alias() {
    let mut original: ArrayList<u32> = (0..5).collect();
    let mut copy = original.clone();

    copy.remove(0).unwrap();
    copy.push(42).unwrap();
    assert_eq!(original.as_slice(), &[0, 1, 2, 3, 4]);

    original.clear();
    assert_eq!(copy.as_slice(), &[1, 2, 3, 4, 42]);
}

// create empty -> append A, B, C -> spot-check reads around a removal and
// a front insert
#[test]
fn scenario_walkthrough() {
    let mut list = ArrayList::new();
    list.push("A").unwrap();
    list.push("B").unwrap();
    list.push("C").unwrap();

    assert_eq!(list.get(1), Some(&"B"));

    list.remove(0).unwrap();
    assert_eq!(list.get(0), Some(&"B"));
    assert_eq!(list.len(), 2);

    list.insert(0, "Z").unwrap();
    assert_eq!(list.as_slice(), &["Z", "B", "C"]);
}
