//! Rehasher: grow, compaction and reset of `Storage`.
//!
//! A rebuild drains the old arena in log order, drops tombstones, and moves
//! each live entry into a fresh arena, log and bucket table. Handles are
//! remapped on the way, which keeps arena slot order equal to log order.
//! Buckets are filled from cached hashes only.

use crate::bucket_table::BucketTable;
use crate::config::{COMPACT_FACTOR, FILL_FACTOR};
use crate::entry::{Arena, Handle};
use crate::insertion_log::InsertionLog;
use crate::storage::Storage;

impl<K, V> Storage<K, V> {
    /// Doubles the table if the last insert pushed the load factor past
    /// `1 / FILL_FACTOR`. Returns where `follow` lives afterwards.
    pub(crate) fn grow_if_needed(&mut self, follow: Handle) -> Handle {
        let capacity = self.table.capacity();
        if FILL_FACTOR * self.live <= capacity {
            return follow;
        }
        let new_capacity = capacity * FILL_FACTOR;
        log::debug!(
            "growing bucket table: {} -> {} buckets ({} live, {} tombstones)",
            capacity,
            new_capacity,
            self.live,
            self.tombstones()
        );
        let moved = self.rebuild(new_capacity, Some(follow));
        debug_assert!(FILL_FACTOR * self.live <= self.table.capacity());
        // `follow` was just inserted or resurrected, so it is live and survives.
        moved.unwrap_or(follow)
    }

    /// Drops tombstones and resizes the table to `COMPACT_FACTOR` buckets
    /// per live entry (at least one bucket).
    pub(crate) fn compact(&mut self) {
        let new_capacity = (COMPACT_FACTOR * self.live).max(1);
        log::debug!(
            "compacting: {} -> {} buckets, dropping {} tombstones",
            self.table.capacity(),
            new_capacity,
            self.tombstones()
        );
        self.rebuild(new_capacity, None);
    }

    /// Discards every entry and starts over with `capacity` buckets.
    pub(crate) fn reset(&mut self, capacity: usize) {
        log::debug!(
            "clearing {} entries ({} live), capacity reset to {}",
            self.log.len(),
            self.live,
            capacity
        );
        *self = Storage::with_capacity(capacity);
    }

    fn rebuild(&mut self, capacity: usize, follow: Option<Handle>) -> Option<Handle> {
        let mut old_slots = core::mem::replace(&mut self.slots, Arena::with_capacity(self.live));
        let old_log = core::mem::replace(&mut self.log, InsertionLog::with_capacity(self.live));
        self.table = BucketTable::with_capacity(capacity);

        let mut followed = None;
        for old in old_log.into_handles() {
            let Some(mut entry) = old_slots.remove(old.raw_handle()) else {
                continue;
            };
            if !entry.live {
                continue;
            }
            let hash = entry.hash;
            entry.log_index = self.log.len();
            let h = Handle::new(self.slots.insert(entry));
            self.log.push(h);
            self.table.push(hash, h);
            if follow == Some(old) {
                followed = Some(h);
            }
        }
        debug_assert_eq!(self.log.len(), self.live);
        followed
    }
}
