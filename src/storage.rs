//! Storage: arena, bucket table and insertion log kept in step.
//!
//! Everything here works on precomputed hashes and never calls `K: Hash`.
//! The only user code it runs is `K: Eq` while scanning a chain. The map
//! layer above owns the hasher and the reentrancy check.

use crate::bucket_table::BucketTable;
use crate::entry::{Arena, Entry, Handle};
use crate::insertion_log::{InsertionLog, Iter, IterMut};
use core::borrow::Borrow;

/// What an insert found for its key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Inserted {
    /// A live entry already held the key; nothing changed.
    Present,
    /// A tombstone for the key was made live again.
    Resurrected,
    /// A new entry was appended.
    Created,
}

#[derive(Debug)]
pub(crate) struct Storage<K, V> {
    pub(crate) slots: Arena<K, V>,
    pub(crate) table: BucketTable,
    pub(crate) log: InsertionLog,
    pub(crate) live: usize,
}

impl<K, V> Storage<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Arena::new(),
            table: BucketTable::with_capacity(capacity),
            log: InsertionLog::default(),
            live: 0,
        }
    }

    #[inline]
    pub(crate) fn entry(&self, h: Handle) -> &Entry<K, V> {
        &self.slots[h.raw_handle()]
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, h: Handle) -> &mut Entry<K, V> {
        &mut self.slots[h.raw_handle()]
    }

    /// Finds the entry holding `q`, live or tombstoned. Keys are unique
    /// across the whole arena, so at most one entry can match.
    pub(crate) fn probe<Q>(&self, hash: u64, q: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.table.find(hash, |h| {
            let e = &self.slots[h.raw_handle()];
            e.hash == hash && e.key.borrow() == q
        })
    }

    /// Like `probe` but ignores tombstones.
    pub(crate) fn find_live<Q>(&self, hash: u64, q: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.probe(hash, q).filter(|&h| self.entry(h).live)
    }

    /// Insert-if-absent. A live match keeps its value. A tombstoned match is
    /// resurrected; its old value is kept unless `overwrite_tombstone` is set,
    /// in which case `value` replaces it. May grow the table, so the returned
    /// handle is the entry's handle after any rehash.
    pub(crate) fn insert(
        &mut self,
        hash: u64,
        key: K,
        value: V,
        overwrite_tombstone: bool,
    ) -> (Handle, Inserted)
    where
        K: Eq,
    {
        let (handle, outcome) = match self.probe(hash, &key) {
            Some(h) => {
                let e = self.entry_mut(h);
                if e.live {
                    return (h, Inserted::Present);
                }
                e.live = true;
                if overwrite_tombstone {
                    e.value = value;
                }
                log::trace!("resurrected tombstone at log index {}", e.log_index);
                (h, Inserted::Resurrected)
            }
            None => {
                let log_index = self.log.len();
                let h = Handle::new(self.slots.insert(Entry::new(key, value, hash, log_index)));
                self.log.push(h);
                self.table.push(hash, h);
                (h, Inserted::Created)
            }
        };
        self.live += 1;
        (self.grow_if_needed(handle), outcome)
    }

    /// Tombstones the live entry for `q`. Returns whether one existed.
    pub(crate) fn erase<Q>(&mut self, hash: u64, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        match self.find_live(hash, q) {
            Some(h) => {
                self.entry_mut(h).live = false;
                self.live -= 1;
                true
            }
            None => false,
        }
    }

    /// Iterator starting at `h`'s log position.
    pub(crate) fn iter_from(&self, h: Handle) -> Iter<'_, K, V> {
        let index = self.entry(h).log_index;
        debug_assert_eq!(self.log.get(index), Some(h));
        Iter::new(self.log.tail(index), &self.slots)
    }

    /// The past-the-end iterator.
    pub(crate) fn iter_end(&self) -> Iter<'_, K, V> {
        Iter::new(self.log.tail(self.log.len()), &self.slots)
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.log.tail(0), &self.slots)
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&self.log, &mut self.slots)
    }

    #[inline]
    pub(crate) fn tombstones(&self) -> usize {
        self.log.len() - self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(s: &Storage<&'static str, i32>) -> Vec<&'static str> {
        s.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn insert_reports_outcome() {
        let mut s = Storage::with_capacity(64);
        assert_eq!(s.insert(1, "a", 1, false).1, Inserted::Created);
        assert_eq!(s.insert(1, "a", 2, false).1, Inserted::Present);
        assert!(s.erase(1, "a"));
        assert_eq!(s.insert(1, "a", 3, false).1, Inserted::Resurrected);
        assert_eq!(s.live, 1);
        assert_eq!(s.log.len(), 1, "resurrection reuses the logged entry");
    }

    #[test]
    fn resurrection_keeps_value_unless_overwritten() {
        let mut s = Storage::with_capacity(64);
        s.insert(1, "a", 1, false);
        s.erase(1, "a");
        let (h, _) = s.insert(1, "a", 2, false);
        assert_eq!(s.entry(h).value, 1);

        s.erase(1, "a");
        let (h, _) = s.insert(1, "a", 3, true);
        assert_eq!(s.entry(h).value, 3);
    }

    #[test]
    fn erase_is_idempotent_and_keeps_log() {
        let mut s = Storage::with_capacity(64);
        s.insert(1, "a", 1, false);
        s.insert(2, "b", 2, false);
        assert!(s.erase(1, "a"));
        assert!(!s.erase(1, "a"));
        assert!(!s.erase(3, "zz"));
        assert_eq!(s.live, 1);
        assert_eq!(s.tombstones(), 1);
        assert_eq!(keys(&s), vec!["b"]);
        assert!(s.probe(1, "a").is_some());
        assert!(s.find_live(1, "a").is_none());
    }

    #[test]
    fn colliding_hashes_resolve_by_key() {
        let mut s = Storage::with_capacity(64);
        s.insert(7, "a", 1, false);
        s.insert(7, "b", 2, false);
        let ha = s.find_live(7, "a").unwrap();
        let hb = s.find_live(7, "b").unwrap();
        assert_ne!(ha, hb);
        assert_eq!(s.entry(hb).value, 2);
    }

    #[test]
    fn iter_from_starts_at_entry() {
        let mut s = Storage::with_capacity(64);
        for (i, k) in ["a", "b", "c"].into_iter().enumerate() {
            s.insert(i as u64, k, i as i32, false);
        }
        let hb = s.find_live(1, "b").unwrap();
        let tail: Vec<_> = s.iter_from(hb).map(|(k, _)| *k).collect();
        assert_eq!(tail, vec!["b", "c"]);
        assert_eq!(s.iter_end().count(), 0);
    }
}
