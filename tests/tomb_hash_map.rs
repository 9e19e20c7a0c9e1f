// TombHashMap integration tests.
//
// Each test documents the behavior verified. The core invariants exercised:
// - Round-trip: every distinct inserted key is found with its value.
// - Tombstones: erase hides a key without shrinking; reinsertion revives it.
// - Insert never overwrites; get_or_insert_default upserts.
// - Order: iteration follows first insertion, skipping erased keys.
// - Load factor: 2 * len <= capacity after every insert.
use tomb_hashmap::config::DEFAULT_CAPACITY;
use tomb_hashmap::{MapConfig, MapError, TombHashMap};

fn keys<V>(m: &TombHashMap<String, V>) -> Vec<String> {
    m.keys().cloned().collect()
}

// Test: the walk-through scenario end to end.
// Verifies: sizes, lookups, order and capacity after erase, revival via
// upsert and compaction.
#[test]
fn insert_erase_revive_compact_scenario() {
    let mut m: TombHashMap<String, i32> = TombHashMap::new();
    assert_eq!(m.capacity(), DEFAULT_CAPACITY);
    let names: Vec<String> = (0..10).map(|i| format!("k{i}")).collect();
    for (i, k) in names.iter().enumerate() {
        m.insert(k.clone(), i as i32);
    }
    assert_eq!(m.len(), 10);
    for (i, k) in names.iter().enumerate() {
        assert_eq!(m.at(k.as_str()), Ok(&(i as i32)));
    }

    for k in names.iter().step_by(2) {
        assert!(m.remove(k.as_str()));
    }
    assert_eq!(m.len(), 5);
    for k in names.iter().step_by(2) {
        assert_eq!(m.find(k.as_str()).next(), None);
    }
    assert_eq!(keys(&m), vec!["k1", "k3", "k5", "k7", "k9"]);

    *m.get_or_insert_default("k4".to_string()) = 44;
    assert_eq!(m.len(), 6);
    assert_eq!(m.at("k4"), Ok(&44));
    let before: Vec<(String, i32)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
    assert_eq!(before[2], ("k4".to_string(), 44), "revived key keeps its slot");

    m.compact();
    assert_eq!(m.len(), 6);
    assert_eq!(m.capacity(), 24);
    assert_eq!(m.tombstones(), 0);
    let after: Vec<(String, i32)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
    assert_eq!(before, after);
}

// Test: round-trip with many keys across several grows.
#[test]
fn round_trip_through_growth() {
    let mut m = TombHashMap::with_capacity(2);
    for i in 0..5_000u64 {
        m.insert(i, i * 3);
        assert!(2 * m.len() <= m.capacity());
    }
    assert_eq!(m.len(), 5_000);
    for i in 0..5_000u64 {
        assert_eq!(m.get(&i), Some(&(i * 3)));
    }
    assert!(m.keys().copied().eq(0..5_000u64), "order survives rehash");
}

// Test: insert-if-absent semantics.
#[test]
fn insert_keeps_first_value() {
    let mut m = TombHashMap::new();
    m.insert("k", 1);
    m.insert("k", 2);
    assert_eq!(m.at(&"k"), Ok(&1));
    assert_eq!(m.len(), 1);
}

// Test: erase followed by insert.
// Verifies: the key is found again, size returns to its pre-erase value,
// capacity is untouched.
#[test]
fn erase_then_insert_restores_size() {
    let mut m = TombHashMap::with_capacity(32);
    m.insert(1, "one");
    m.insert(2, "two");
    let cap = m.capacity();
    assert!(m.remove(&1));
    assert_eq!(m.find(&1).next(), None);
    m.insert(1, "uno");
    assert_eq!(m.len(), 2);
    assert_eq!(m.capacity(), cap);
    assert_eq!(m.get(&1), Some(&"one"), "insert does not update values");
}

// Test: idempotent erase.
#[test]
fn erase_absent_or_erased_is_noop() {
    let mut m = TombHashMap::from([(1, 1), (2, 2)]);
    assert!(!m.remove(&3));
    assert!(m.remove(&1));
    assert!(!m.remove(&1));
    assert_eq!(m.len(), 1);
}

// Test: upsert through get_or_insert_default and get_mut/at_mut.
#[test]
fn upsert_paths() {
    let mut m: TombHashMap<&str, Vec<i32>> = TombHashMap::new();
    m.get_or_insert_default("a").push(1);
    m.get_or_insert_default("a").push(2);
    assert_eq!(m["a"], vec![1, 2]);

    m.at_mut(&"a").unwrap().push(3);
    assert_eq!(m.at(&"a").map(Vec::len), Ok(3));
    assert_eq!(m.at_mut(&"b"), Err(MapError::KeyNotFound));
}

// Test: at reports absence as an error, Index panics.
#[test]
fn at_fails_on_absent_key() {
    let m: TombHashMap<String, i32> = TombHashMap::new();
    let err = m.at("missing").unwrap_err();
    assert_eq!(err, MapError::KeyNotFound);
    assert_eq!(err.to_string(), "key not found");

    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| m["missing"]));
    assert!(res.is_err());
}

// Test: find positions inside insertion order.
#[test]
fn find_yields_entry_then_successors() {
    let m: TombHashMap<char, u8> = "abcde".chars().zip(0u8..).collect();
    let rest: String = m.find(&'c').map(|(k, _)| *k).collect();
    assert_eq!(rest, "cde");
    assert_eq!(m.find(&'z').count(), 0);
}

// Test: constructors and the bulk-load surface.
#[test]
fn construction_surface() {
    let from_arr = TombHashMap::from([("x", 1), ("y", 2), ("x", 3)]);
    assert_eq!(from_arr.len(), 2);
    assert_eq!(from_arr["x"], 1, "earlier pairs win when bulk loading");

    let cfg = MapConfig::new().with_initial_capacity(8);
    let mut m: TombHashMap<i32, i32, std::collections::hash_map::RandomState> =
        TombHashMap::with_config(cfg, Default::default());
    assert_eq!(m.capacity(), 8);
    assert_eq!(m.config(), &cfg);
    m.extend([(1, 1), (2, 2)]);
    m.extend([(&3, &3)]);
    assert_eq!(m.len(), 3);

    let zero = TombHashMap::<u8, u8>::with_capacity(0);
    assert_eq!(zero.capacity(), 1);
}

// Test: iterator family.
#[test]
fn iterators_follow_insertion_order() {
    let mut m: TombHashMap<&str, i32> = TombHashMap::new();
    for (i, k) in ["q", "w", "e", "r"].into_iter().enumerate() {
        m.insert(k, i as i32);
    }
    m.remove(&"w");

    for (_, v) in m.iter_mut() {
        *v += 10;
    }
    for v in m.values_mut() {
        *v *= 2;
    }
    assert_eq!(m.values().copied().collect::<Vec<_>>(), vec![20, 24, 26]);
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec!["q", "e", "r"]);

    let mut seen = Vec::new();
    for (k, v) in &m {
        seen.push((*k, *v));
    }
    assert_eq!(seen, vec![("q", 20), ("e", 24), ("r", 26)]);

    for (_, v) in &mut m {
        *v = 0;
    }
    let owned: Vec<_> = m.into_iter().collect();
    assert_eq!(owned, vec![("q", 0), ("e", 0), ("r", 0)]);
}

// Test: clear discards everything and resets capacity.
#[test]
fn clear_resets() {
    let mut m = TombHashMap::with_capacity(4);
    for i in 0..64 {
        m.insert(i, i);
    }
    m.remove(&5);
    m.clear();
    assert!(m.is_empty());
    assert_eq!(m.capacity(), 4);
    assert_eq!(m.tombstones(), 0);
    m.insert(5, 50);
    assert_eq!(m.get(&5), Some(&50), "cleared keys do not revive");
}

// Test: copy and move.
#[test]
fn clone_and_move() {
    let mut a = TombHashMap::from([(1, "a"), (2, "b"), (3, "c")]);
    a.remove(&2);
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(b.tombstones(), 0);
    assert_eq!(b.keys().copied().collect::<Vec<_>>(), vec![1, 3]);

    let mut c = TombHashMap::new();
    c.clone_from(&b);
    assert_eq!(c, b);

    let moved = c;
    assert_eq!(moved.len(), 2);
}

// Test: erasing never rehashes, even with many tombstones.
#[test]
fn heavy_churn_then_compact() {
    let mut m = TombHashMap::with_capacity(256);
    for i in 0..100 {
        m.insert(i, i);
    }
    for i in 0..90 {
        m.remove(&i);
    }
    assert_eq!(m.capacity(), 256);
    assert_eq!(m.tombstones(), 90);
    m.compact();
    assert_eq!(m.capacity(), 40);
    assert_eq!(m.tombstones(), 0);
    assert!(m.keys().copied().eq(90..100));
}
