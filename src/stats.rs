//! Low-level table statistics, behind the `stats` feature.

use crate::TombHashMap;

/// Snapshot of a map's bucket table and insertion log.
#[derive(Clone, Debug, PartialEq)]
pub struct TableStats {
    /// Number of buckets.
    pub capacity: usize,
    /// Live entries.
    pub live: usize,
    /// Erased entries not yet dropped by a rehash.
    pub tombstones: usize,
    /// Length of the insertion log (live plus tombstones).
    pub log_len: usize,
    /// Buckets with no entries at all.
    pub empty_buckets: usize,
    /// Longest chain, counting tombstones.
    pub longest_chain: usize,
    /// `live / capacity`.
    pub load_factor: f64,
}

impl TableStats {
    pub fn print(&self) {
        println!("=== TombHashMap Stats ===");
        println!("Capacity: {} buckets", self.capacity);
        println!("Live: {}  Tombstones: {}", self.live, self.tombstones);
        println!("Log length: {}", self.log_len);
        println!("Empty buckets: {}", self.empty_buckets);
        println!("Longest chain: {}", self.longest_chain);
        println!("Load factor: {:.2}%", self.load_factor * 100.0);
    }
}

impl<K, V, S> TombHashMap<K, V, S> {
    pub fn stats(&self) -> TableStats {
        let storage = self.storage();
        let mut empty_buckets = 0;
        let mut longest_chain = 0;
        for len in storage.table.chain_lengths() {
            if len == 0 {
                empty_buckets += 1;
            }
            longest_chain = longest_chain.max(len);
        }
        let capacity = storage.table.capacity();
        TableStats {
            capacity,
            live: storage.live,
            tombstones: storage.tombstones(),
            log_len: storage.log.len(),
            empty_buckets,
            longest_chain,
            load_factor: storage.live as f64 / capacity as f64,
        }
    }
}
