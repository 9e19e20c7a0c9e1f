#![cfg(test)]

// Property tests for TombHashMap kept inside the crate so the model can
// check tombstone counts alongside the public surface.

use crate::config::{COMPACT_FACTOR, FILL_FACTOR};
use crate::TombHashMap;
use proptest::prelude::*;
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Remove(usize),
    Upsert(usize, i32),
    Find(usize),
    At(usize),
    Iterate,
    Compact,
    Clear,
}

// Reference model: a plain vector in log order, tombstones included, with
// the same growth and compaction rules spelled out directly.
struct Model {
    log: Vec<(Key, i32, bool)>,
    capacity: usize,
    initial: usize,
}

impl Model {
    fn new(initial: usize) -> Self {
        Self {
            log: Vec::new(),
            capacity: initial,
            initial,
        }
    }

    fn live(&self) -> usize {
        self.log.iter().filter(|e| e.2).count()
    }

    fn position(&self, k: &Key) -> Option<usize> {
        self.log.iter().position(|e| &e.0 == k)
    }

    fn drop_tombstones(&mut self) {
        self.log.retain(|e| e.2);
    }

    fn after_increment(&mut self) {
        if FILL_FACTOR * self.live() > self.capacity {
            self.capacity *= FILL_FACTOR;
            self.drop_tombstones();
        }
    }

    fn insert(&mut self, k: Key, v: i32, overwrite_tombstone: bool) {
        match self.position(&k) {
            Some(i) if self.log[i].2 => return,
            Some(i) => {
                self.log[i].2 = true;
                if overwrite_tombstone {
                    self.log[i].1 = v;
                }
            }
            None => self.log.push((k, v, true)),
        }
        self.after_increment();
    }

    fn remove(&mut self, k: &Key) -> bool {
        match self.position(k) {
            Some(i) if self.log[i].2 => {
                self.log[i].2 = false;
                true
            }
            _ => false,
        }
    }

    fn get(&self, k: &Key) -> Option<i32> {
        self.position(k)
            .filter(|&i| self.log[i].2)
            .map(|i| self.log[i].1)
    }

    fn live_entries(&self) -> Vec<(Key, i32)> {
        self.log
            .iter()
            .filter(|e| e.2)
            .map(|e| (e.0.clone(), e.1))
            .collect()
    }

    fn compact(&mut self) {
        self.drop_tombstones();
        self.capacity = (COMPACT_FACTOR * self.log.len()).max(1);
    }

    fn clear(&mut self) {
        self.log.clear();
        self.capacity = self.initial;
    }
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (1usize..=16, proptest::collection::vec("[a-z]{0,4}", 1..=12)).prop_flat_map(
        |(initial, pool)| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
                3 => idx.clone().prop_map(Op::Remove),
                2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Upsert(i, v)),
                2 => idx.clone().prop_map(Op::Find),
                1 => idx.clone().prop_map(Op::At),
                1 => Just(Op::Iterate),
                1 => Just(Op::Compact),
                1 => Just(Op::Clear),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (initial, pool.clone(), ops))
        },
    )
}

fn run<S: BuildHasher>(
    mut sut: TombHashMap<Key, i32, S>,
    initial: usize,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model = Model::new(initial);
    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = Key(pool[i].clone());
                sut.insert(k.clone(), v);
                model.insert(k, v, false);
                prop_assert!(2 * sut.len() <= sut.capacity(), "load factor bound");
            }
            Op::Remove(i) => {
                let k = Key(pool[i].clone());
                prop_assert_eq!(sut.remove(k.0.as_str()), model.remove(&k));
            }
            Op::Upsert(i, v) => {
                let k = Key(pool[i].clone());
                *sut.get_or_insert_default(k.clone()) = v;
                if model.get(&k).is_none() {
                    model.insert(k.clone(), 0, true);
                }
                if let Some(p) = model.position(&k) {
                    model.log[p].1 = v;
                }
            }
            Op::Find(i) => {
                let k = Key(pool[i].clone());
                let tail: Vec<_> = sut.find(&k).map(|(k, v)| (k.clone(), *v)).collect();
                let expected: Vec<_> = match model.get(&k) {
                    Some(_) => {
                        let live = model.live_entries();
                        let at = live.iter().position(|e| e.0 == k).unwrap_or(live.len());
                        live[at..].to_vec()
                    }
                    None => Vec::new(),
                };
                prop_assert_eq!(tail, expected);
            }
            Op::At(i) => {
                let k = Key(pool[i].clone());
                prop_assert_eq!(sut.at(k.0.as_str()).ok().copied(), model.get(&k));
                prop_assert_eq!(sut.contains_key(k.0.as_str()), model.get(&k).is_some());
            }
            Op::Iterate => {
                let got: Vec<_> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(got, model.live_entries());
            }
            Op::Compact => {
                sut.compact();
                model.compact();
            }
            Op::Clear => {
                sut.clear();
                model.clear();
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.live());
        prop_assert_eq!(sut.is_empty(), model.live() == 0);
        prop_assert_eq!(sut.capacity(), model.capacity);
        prop_assert_eq!(sut.tombstones(), model.log.len() - model.live());
    }
    let got: Vec<_> = sut.into_iter().collect();
    prop_assert_eq!(got, model.live_entries());
    Ok(())
}

// Property: state-machine equivalence against an ordered vector model.
// - insert never overwrites; revived tombstones keep their old value.
// - get_or_insert_default upserts.
// - iteration and find follow first-insertion order, skipping tombstones.
// - capacity follows the grow/compact/clear rules exactly.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((initial, pool, ops) in arb_scenario()) {
        let sut = TombHashMap::with_capacity(initial);
        run(sut, initial, &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain scans.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((initial, pool, ops) in arb_scenario()) {
        let sut = TombHashMap::with_capacity_and_hasher(initial, ConstBuildHasher);
        run(sut, initial, &pool, ops)?;
    }
}
