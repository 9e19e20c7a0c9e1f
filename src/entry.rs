//! Entry: the unit shared by the bucket table and the insertion log.

use slotmap::{DefaultKey, SlotMap};

/// Storage for every entry of a map, live or tombstoned.
pub(crate) type Arena<K, V> = SlotMap<DefaultKey, Entry<K, V>>;

/// Generational arena key naming one entry. Both the bucket table and the
/// insertion log refer to entries through these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Hash of `key`, computed once. Rehashing only ever reads this.
    pub(crate) hash: u64,
    /// Position of this entry's handle in the insertion log.
    pub(crate) log_index: usize,
    /// False once the entry has been erased (tombstoned).
    pub(crate) live: bool,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V, hash: u64, log_index: usize) -> Self {
        Self {
            key,
            value,
            hash,
            log_index,
            live: true,
        }
    }
}
