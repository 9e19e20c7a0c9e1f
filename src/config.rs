//! Sizing constants and per-map configuration.

/// Bucket count a map starts with when no capacity is requested.
pub const DEFAULT_CAPACITY: usize = 1087;

/// A table keeps at least this many buckets per live entry. Crossing the
/// bound on insert multiplies the bucket count by the same factor.
pub const FILL_FACTOR: usize = 2;

/// Buckets per live entry after an explicit `compact()`.
pub const COMPACT_FACTOR: usize = FILL_FACTOR * FILL_FACTOR;

/// Construction-time settings for a [`TombHashMap`](crate::TombHashMap).
///
/// The starting capacity is also what `clear()` returns the table to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapConfig {
    initial_capacity: usize,
}

impl MapConfig {
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Sets the starting bucket count. Zero is raised to one so that bucket
    /// addressing never divides by zero.
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new()
    }
}
