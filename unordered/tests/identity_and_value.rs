//! Identity versus value semantics through the public API.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use unordered::{Error, Identity, UnorderedArray, unordered};

/// Equality looks at the name only, so the same person a year later is
/// value-equal but a different instance.
#[derive(Debug)]
struct Person {
    name: String,
    #[allow(dead_code)]
    age: u32,
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Person {
    fn new(name: &str, age: u32) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_owned(),
            age,
        })
    }
}

fn george_twice() -> (Rc<Person>, Rc<Person>) {
    (Person::new("George", 23), Person::new("George", 24))
}

#[test]
fn index_of_finds_equal_but_not_identical() {
    let (george, george_next_year) = george_twice();
    let mut people = UnorderedArray::new();
    assert_eq!(people.index_of(&george), None);

    people.add(Rc::clone(&george));
    assert_eq!(people.index_of(&george), Some(0));
    assert_eq!(people.index_of(&george_next_year), Some(0));
    assert_eq!(people.index_of_identity(&george), Some(0));
    assert_eq!(people.index_of_identity(&george_next_year), None);
}

#[test]
fn contains_by_value_and_identity() {
    let (george, george_next_year) = george_twice();
    let mut people = UnorderedArray::new();
    assert!(!people.contains(&george));

    people.add(Rc::clone(&george));
    assert!(people.contains_identity(&george));
    assert!(people.contains(&george_next_year));
    assert!(!people.contains_identity(&george_next_year));

    assert!(people.contains_all([&george, &george_next_year]));
    assert!(!people.contains_all_identity([&george, &george_next_year]));
    assert!(people.contains_all_identity([&george, &george]));
}

#[test]
fn remove_value_takes_first_equal() {
    let (george, future_george) = george_twice();
    let mut people = unordered![Rc::clone(&george), Rc::clone(&future_george)];

    assert!(people.remove_value(&future_george));
    assert_eq!(people.len(), 1);
    // The scan found `george` first, so the identical instance survives.
    assert!(people.contains_identity(&future_george));
}

#[test]
fn remove_value_identity_takes_the_instance() {
    let (george, future_george) = george_twice();
    let mut people = unordered![Rc::clone(&george), Rc::clone(&future_george)];

    assert!(people.remove_value_identity(&future_george));
    assert_eq!(people.len(), 1);
    assert!(!people.contains_identity(&future_george));
    assert!(people.contains_identity(&george));
}

#[test]
fn remove_value_identity_missing_instance() {
    let (george, future_george) = george_twice();
    let mut people = unordered![Rc::clone(&george)];
    assert!(!people.remove_value_identity(&future_george));
    assert_eq!(people.len(), 1);
}

#[test]
fn count_by_value_and_identity() {
    let (george, future_george) = george_twice();
    let people = unordered![
        Rc::clone(&george),
        Rc::clone(&future_george),
        Rc::clone(&george)
    ];
    assert_eq!(people.count(&george), 3);
    assert_eq!(people.count_identity(&george), 2);
    assert_eq!(people.count_identity(&future_george), 1);
}

#[test]
fn get_preserves_identity() {
    let (george, future_george) = george_twice();
    let mut people = UnorderedArray::with_capacity(1);
    people.add_many([Rc::clone(&george), Rc::clone(&future_george)]);

    assert!(Rc::ptr_eq(people.get(0).unwrap(), &george));
    assert!(Rc::ptr_eq(people.get(1).unwrap(), &future_george));
}

#[test]
fn equality_by_value_and_identity() {
    let (george, future_george) = george_twice();
    let anna = Person::new("Anna", 30);

    let ours = unordered![Rc::clone(&george), Rc::clone(&anna)];
    let theirs = unordered![Rc::clone(&anna), Rc::clone(&future_george)];
    assert_eq!(ours, theirs);
    assert!(!ours.equals_identities(&theirs));

    let same = unordered![Rc::clone(&anna), Rc::clone(&george)];
    assert!(ours.equals_identities(&same));
}

#[test]
fn each_slot_matches_once() {
    let (george, future_george) = george_twice();
    let anna = Person::new("Anna", 30);

    let ours = unordered![Rc::clone(&george), Rc::clone(&anna)];
    let theirs = unordered![Rc::clone(&george), Rc::clone(&future_george)];
    assert!(ours != theirs);
    assert!(!ours.equals_identities(&theirs));
}

#[test]
fn equal_multisets_hash_alike() {
    let a = unordered![1, 2, 2, 3];
    let b = unordered![3, 1, 2, 2];
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());
    assert!(unordered![1, 2, 3] != a);
}

#[test]
fn absent_markers_are_found_by_identity() {
    let mut values: UnorderedArray<Option<Rc<Person>>> = UnorderedArray::new();
    values.add_many([Some(Person::new("Anna", 30)), None, None]);

    assert_eq!(values.index_of(&None), Some(1));
    assert_eq!(values.count(&None), 2);
    assert!(values.remove_value(&None));
    assert_eq!(values.count(&None), 1);
}

#[test]
fn absent_markers_pair_up_in_equality() {
    let anna = Person::new("Anna", 30);
    let ours = unordered![Some(Rc::clone(&anna)), None];

    let reordered = unordered![None, Some(Person::new("Anna", 31))];
    assert_eq!(ours, reordered);
    assert!(!ours.equals_identities(&reordered));
    assert!(ours.equals_identities(&unordered![None, Some(Rc::clone(&anna))]));

    let only_markers: UnorderedArray<Option<Rc<Person>>> = unordered![None, None];
    assert!(ours != only_markers);
    assert!(only_markers != ours);
    assert!(!ours.equals_identities(&only_markers));
}

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl Identity for Point {}

#[test]
fn owned_strings_compare_by_value() {
    let mut words = unordered!["a".to_string(), "b".to_string(), "a".to_string()];
    assert_eq!(words, unordered!["a".to_string(), "a".to_string(), "b".to_string()]);
    assert!(words != unordered!["a".to_string(), "b".to_string(), "b".to_string()]);

    assert!(words.contains(&"a".to_string()));
    assert_eq!(words.index_of(&"b".to_string()), Some(1));
    assert_eq!(words.count(&"a".to_string()), 2);
    assert!(!words.contains_identity(&"a".to_string()));
    assert_eq!(words.index_of_identity(&words[2]), Some(2));

    assert!(words.remove_value(&"a".to_string()));
    assert_eq!(words.as_slice(), &["a".to_string(), "b".to_string()]);
    assert!(!words.remove_value(&"c".to_string()));
}

#[test]
fn derived_structs_compare_by_value() {
    let mut points = unordered![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }];
    assert_eq!(points, unordered![Point { x: 3, y: 4 }, Point { x: 1, y: 2 }]);
    assert!(points.contains_all([&Point { x: 3, y: 4 }, &Point { x: 1, y: 2 }]));
    assert_eq!(points.index_of(&Point { x: 3, y: 4 }), Some(1));
    assert_eq!(points.index_of_identity(&Point { x: 3, y: 4 }), None);

    assert!(points.remove_value(&Point { x: 1, y: 2 }));
    assert_eq!(points.as_slice(), &[Point { x: 3, y: 4 }]);
    assert!(!points.equals_identities(&points.clone()));
    assert!(points.equals_identities(&points));
}

#[test]
fn vectors_compare_by_value() {
    let rows = unordered![vec![1, 2], vec![], vec![1, 2]];
    assert_eq!(rows.count(&vec![1, 2]), 2);
    assert!(rows.contains(&Vec::new()));
    assert_eq!(rows, unordered![vec![], vec![1, 2], vec![1, 2]]);
}

#[test]
fn copy_round_trip() {
    let mut original = UnorderedArray::with_capacity(64);
    original.add_many([5, 4, 3]);
    original.remove_index(0).unwrap();

    let copy = UnorderedArray::copy_of(&original);
    assert_eq!(copy.len(), original.len());
    assert_eq!(copy.capacity(), original.len());
    assert_eq!(copy, original);
}

#[test]
fn bounds_errors_leave_the_array_alone() {
    let mut arr = unordered![1, 2, 3];
    let capacity = arr.capacity();

    assert_eq!(arr.get(3), Err(Error::IndexOutOfBounds { index: 3, size: 3 }));
    assert_eq!(
        arr.remove_index(3),
        Err(Error::IndexOutOfBounds { index: 3, size: 3 })
    );
    assert_eq!(
        arr.insert(4, 9),
        Err(Error::InsertOutOfBounds { index: 4, size: 3 })
    );
    assert!(arr.insert(4, 9).unwrap_err().is_bounds());
    assert_eq!(arr.as_slice(), &[1, 2, 3]);
    assert_eq!(arr.capacity(), capacity);

    let empty: UnorderedArray<i32> = UnorderedArray::new();
    assert!(empty.first().unwrap_err().is_bounds());
    assert!(empty.last().unwrap_err().is_bounds());
}
