//! BucketTable: separate-chaining index from reduced hash to entry handles.
//!
//! The table never looks at keys itself. Callers pass the cached `u64` hash
//! and an equality predicate over handles, the same shape as
//! `hashbrown::HashTable::find`. Chains are unordered and scanned linearly.

use crate::entry::Handle;

#[derive(Debug, Clone)]
pub(crate) struct BucketTable {
    buckets: Vec<Vec<Handle>>,
}

impl BucketTable {
    /// Creates `capacity` empty buckets. `capacity` must be non-zero.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "bucket table needs at least one bucket");
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        Self { buckets }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Returns the first handle in `hash`'s chain accepted by `eq`.
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(Handle) -> bool) -> Option<Handle> {
        self.buckets[self.bucket_index(hash)]
            .iter()
            .copied()
            .find(|&h| eq(h))
    }

    /// Appends `handle` to `hash`'s chain. Does not check for duplicates.
    pub(crate) fn push(&mut self, hash: u64, handle: Handle) {
        let b = self.bucket_index(hash);
        self.buckets[b].push(handle);
    }

    /// Chain lengths in bucket order.
    #[cfg(feature = "stats")]
    pub(crate) fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(Vec::len)
    }
}
