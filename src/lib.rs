//! tomb-hashmap: a single-threaded, insertion-ordered hash map with
//! separate chaining and tombstone-based lazy deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: O(1) expected insert/lookup/erase with deterministic iteration in
//!   first-insertion order, and no physical removal on erase.
//! - Layers:
//!   - Entry: key, value, cached hash, liveness flag and position in the
//!     insertion log. Entries live in a `slotmap` arena and are named by
//!     generational handles.
//!   - BucketTable: `Vec<Vec<Handle>>`, one chain per bucket, addressed by
//!     `hash % capacity`.
//!   - InsertionLog: `Vec<Handle>` in first-insertion order; iterators walk
//!     it and skip tombstones lazily.
//!   - Storage: keeps the three above in step; the rehasher (grow, compact,
//!     reset) is implemented on it.
//!   - TombHashMap<K, V, S>: public API; owns the hasher, the configuration
//!     and a debug-only reentrancy check.
//!
//! Constraints
//! - Single-threaded: no internal synchronization. The map is `!Sync` in
//!   debug builds through the reentrancy check's `Cell`.
//! - Each entry is referenced once from its bucket and once from the log.
//!   Both references are arena handles, never pointers.
//! - Keys are unique across live and tombstoned entries. Inserting an
//!   erased key revives its tombstone instead of adding a second entry.
//! - Load factor: after every insert `2 * len() <= capacity()`. The insert
//!   that breaks it doubles the table.
//!
//! Insert versus upsert
//! - `insert` is insert-if-absent: a live value is never overwritten, and a
//!   revived tombstone keeps the value it had when erased.
//! - `get_or_insert_default` is the update-or-insert path; a revived
//!   tombstone is reset to `V::default()`.
//!
//! Tombstones and rehashing
//! - `remove` only clears the liveness flag. Capacity never shrinks on
//!   erase and erase never rehashes.
//! - Grow, `compact()` and `clear()` are the only places entries are
//!   physically dropped. Grow and compact rebuild the arena in log order,
//!   dropping tombstones and remapping handles; relative order survives.
//! - Each entry stores a precomputed `u64` hash and rebuilding always uses
//!   it; `K: Hash` is never invoked after insertion.
//!
//! Iterators
//! - Iterators borrow the map, so the borrow checker rules out the
//!   invalidation hazards of a rehash during iteration.
//! - `find` returns an iterator positioned at the found entry, using the
//!   entry's log index to jump there without scanning the log.
//!
//! Errors
//! - `at`/`at_mut` return `Err(MapError::KeyNotFound)` on absence. Every
//!   other operation treats absence as a normal outcome.
//!
//! Notes and non-goals
//! - No thread-safety, persistence or I/O.
//! - No fixed-capacity mode; start with a large capacity instead.
//! - Rehash events are reported through `log::debug!`; the crate never
//!   installs a logger.

mod bucket_table;
pub mod config;
mod entry;
pub mod error;
mod insertion_log;
mod reentrancy;
mod rehash;
#[cfg(feature = "stats")]
mod stats;
mod storage;
mod tomb_hash_map;
mod tomb_hash_map_proptest;

// Public surface
pub use config::MapConfig;
pub use error::{MapError, Result};
pub use insertion_log::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
#[cfg(feature = "stats")]
pub use stats::TableStats;
pub use tomb_hash_map::TombHashMap;
