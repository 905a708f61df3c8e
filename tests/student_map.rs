#![warn(rust_2018_idioms)]

use chrono::NaiveDate;
use student::{Student, StudentComparator};
use tracing_subscriber::EnvFilter;

use tree_map::{treemap, Argument, Error, TreeMap};

fn date(text: &str) -> NaiveDate {
    text.parse().unwrap()
}

fn init_tracing() {
    // Run with `RUST_LOG=tree_map=trace` to see structural events
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The eight-key fixture:
///
/// ```text
///          6
///       /     \
///      1       8
///     / \     / \
///    0   3   7   9
///         \
///          4
/// ```
fn fill(map: &mut TreeMap<&'static str, i32>) {
    map.insert("6", 6);
    // left part
    map.insert("1", 1);
    map.insert("0", 0);
    map.insert("3", 3);
    map.insert("4", 4);
    // right part
    map.insert("8", 8);
    map.insert("7", 7);
    map.insert("9", 9);
}

fn students() -> TreeMap<Student, i32, StudentComparator> {
    let mut map = TreeMap::with_cmp(StudentComparator);
    map.insert(Student::new("b", date("2020-03-02"), "2"), 2);
    map.insert(Student::new("a", date("2020-03-02"), "3"), 3);
    map.insert(Student::new("d", date("2020-03-02"), "4"), 4);
    map.insert(Student::new("g", date("2020-03-02"), "5"), 5);
    map.insert(Student::new("i", date("2020-03-02"), "55"), 55);
    map
}

#[test]
fn empty_on_creation() {
    let map: TreeMap<&str, i32> = TreeMap::new();
    assert!(map.is_empty());
}

#[test]
fn empty_after_clear() {
    init_tracing();
    let mut map = TreeMap::new();
    fill(&mut map);
    map.clear();
    assert!(map.is_empty());
}

#[test]
fn comparator_ordered_put_all_renders_sorted() {
    init_tracing();
    let expected = students();
    let mut actual = TreeMap::with_cmp(StudentComparator);
    actual.put_all(&expected);

    // `put_all` inserts in sorted order, so pre-order rendering is sorted too
    let rendered: Vec<String> = expected.entry_set().iter()
        .map(|(student, value)| format!("{}={}", student, value))
        .collect();
    assert_eq!(actual.to_string(), format!("{{{}}}", rendered.join(", ")));
    assert_eq!(
        actual.to_string(),
        "{Student(a, 2020-03-02, #3)=3, Student(b, 2020-03-02, #2)=2, \
         Student(d, 2020-03-02, #4)=4, Student(g, 2020-03-02, #5)=5, \
         Student(i, 2020-03-02, #55)=55}",
    );
}

#[test]
fn comparator_orders_same_name_youngest_first() {
    let mut map = TreeMap::with_cmp(StudentComparator);
    map.insert(Student::new("a", date("1999-01-01"), "1"), 1);
    map.insert(Student::new("a", date("2020-03-02"), "2"), 2);
    map.insert(Student::new("0", date("2000-06-15"), "3"), 3);

    let ids: Vec<String> = map.key_set().iter().map(|student| student.id().to_string()).collect();
    assert_eq!(ids, vec!["3", "2", "1"]);

    // Same name and date is the same key, whatever the id
    let duplicate = Student::new("a", date("1999-01-01"), "99");
    assert_eq!(map.insert(duplicate.clone(), 100), Some(1));
    assert_eq!(map.len(), 3);
    // The first inserted key is kept
    assert_eq!(map.get_entry(&duplicate).map(|(student, _)| student.id()), Some("1"));
}

#[test]
fn copy_constructor_matches_source() {
    let mut map = TreeMap::new();
    fill(&mut map);
    let actual = TreeMap::from_map(&map);
    assert_eq!(map.entry_set(), actual.entry_set());
}

#[test]
fn size_grows_on_insert() {
    let mut map = TreeMap::new();
    map.insert("1", 1);
    assert_eq!(map.len(), 1);
}

#[test]
fn size_shrinks_on_remove() {
    let mut map = TreeMap::new();
    map.insert("1", 1);
    map.insert("3", 1);
    map.remove(&"3");
    assert!(map.contains_key(&"1"));
    assert_eq!(map.len(), 1);
}

#[test]
fn key_set_is_sorted() {
    let mut map = TreeMap::new();
    fill(&mut map);

    let mut expected = vec!["6", "1", "0", "3", "4", "8", "7", "9"];
    expected.sort();
    assert_eq!(map.key_set(), expected);
}

#[test]
fn remove_nodes() {
    init_tracing();
    let cases: &[(&str, &[&str])] = &[
        ("7", &["0", "1", "3", "4", "6", "8", "9"]),
        ("9", &["0", "1", "3", "4", "6", "7", "8"]),
        ("3", &["0", "1", "4", "6", "7", "8", "9"]),
        ("1", &["0", "3", "4", "6", "7", "8", "9"]),
        ("0", &["1", "3", "4", "6", "7", "8", "9"]),
        // Removing the root clears the map
        ("6", &[]),
    ];

    for &(key, expected) in cases {
        let mut map = TreeMap::new();
        fill(&mut map);
        let removed = map.remove(&key);
        if key == "6" {
            assert_eq!(removed, None, "the root hands back no value");
        } else {
            assert_eq!(removed, key.parse::<i32>().ok(), "after removing {:?}", key);
        }
        assert_eq!(map.key_set(), expected, "after removing {:?}", key);
        assert_eq!(map.len(), expected.len(), "after removing {:?}", key);
    }
}

#[test]
fn get_by_key() {
    let mut map = TreeMap::new();
    fill(&mut map);

    for &(key, expected) in &[("6", Some(6)), ("12", None), ("9", Some(9)), ("3", Some(3)), ("8", Some(8))] {
        assert_eq!(map.get(&key).copied(), expected);
    }
}

#[test]
fn put_returns_previous() {
    for &(key, expected) in &[("6", Some(6)), ("12", None), ("9", Some(9)), ("3", Some(3)), ("8", Some(8))] {
        let mut map = TreeMap::new();
        fill(&mut map);
        assert_eq!(map.insert(key, 1), expected);
    }
}

#[test]
fn absent_arguments_are_rejected() {
    let mut map: TreeMap<&str, i32> = TreeMap::new();

    assert_eq!(map.try_insert(None, Some(1)), Err(Error::InvalidArgument(Argument::Key)));
    assert_eq!(map.try_insert(Some("123"), None), Err(Error::InvalidArgument(Argument::Value)));
    assert_eq!(map.try_insert(None, None), Err(Error::InvalidArgument(Argument::Key)));
    assert_eq!(map.try_remove(None), Err(Error::InvalidArgument(Argument::Key)));
    assert_eq!(map.try_get(None), Err(Error::InvalidArgument(Argument::Key)));
    assert!(map.is_empty());
}

#[test]
fn put_all_merges() {
    let mut actual = TreeMap::new();
    actual.insert("6", 6);
    actual.insert("1", 1);
    actual.insert("0", 0);
    actual.insert("3", 3);
    actual.insert("4", 4);
    actual.insert("8", 8);
    actual.insert("7", 7);

    let other = treemap!{"9" => 9};
    actual.put_all(&other);

    let mut map = TreeMap::new();
    fill(&mut map);
    assert_eq!(map.entry_set(), actual.entry_set());
    assert_eq!(map.values(), actual.values());
    assert_eq!(map.len(), actual.len());
}

#[test]
fn try_put_all_keeps_earlier_pairs() {
    let mut map = TreeMap::new();
    let pairs = vec![(Some("6"), Some(6)), (Some("1"), Some(1)), (None, Some(0)), (Some("8"), Some(8))];

    assert_eq!(map.try_put_all(pairs), Err(Error::InvalidArgument(Argument::Key)));
    assert_eq!(map.key_set(), vec!["1", "6"]);
    assert_eq!(map.len(), 2);
}

#[test]
fn rendering_follows_tree_order() {
    let mut map = TreeMap::new();
    fill(&mut map);
    assert_eq!(map.to_string(), "{6=6, 1=1, 0=0, 3=3, 4=4, 8=8, 7=7, 9=9}");
}
