//! TombHashMap: public map over `Storage`, owning the hasher and the
//! reentrancy check.

use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::insertion_log::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::reentrancy::ReentrancyCheck;
use crate::storage::Storage;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use hashbrown::DefaultHashBuilder;

/// An insertion-ordered hash map with chained buckets and lazy deletion.
///
/// Erased entries become tombstones. They stay in their bucket and in the
/// insertion log until the next grow, [`compact`](Self::compact) or
/// [`clear`](Self::clear). Iteration walks the insertion log, so entries come
/// out in the order they were first inserted.
///
/// `insert` never overwrites a live value. Use
/// [`get_or_insert_default`](Self::get_or_insert_default) or
/// [`get_mut`](Self::get_mut) to update.
///
/// ```
/// use tomb_hashmap::TombHashMap;
///
/// let mut m = TombHashMap::new();
/// m.insert("a", 1);
/// m.insert("a", 2);
/// assert_eq!(m.at(&"a"), Ok(&1));
///
/// *m.get_or_insert_default("a") = 3;
/// assert_eq!(m["a"], 3);
/// ```
pub struct TombHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    config: MapConfig,
    storage: Storage<K, V>,
    reentrancy: ReentrancyCheck,
}

impl<K, V> TombHashMap<K, V, DefaultHashBuilder> {
    /// Empty map with [`DEFAULT_CAPACITY`](crate::config::DEFAULT_CAPACITY) buckets.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Empty map with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> TombHashMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config(MapConfig::default(), hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::with_config(MapConfig::new().with_initial_capacity(capacity), hasher)
    }

    pub fn with_config(config: MapConfig, hasher: S) -> Self {
        Self {
            hasher,
            config,
            storage: Storage::with_capacity(config.initial_capacity()),
            reentrancy: ReentrancyCheck::new(),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.storage.live
    }

    pub fn is_empty(&self) -> bool {
        self.storage.live == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.storage.table.capacity()
    }

    /// Erased entries still occupying the table and the insertion log.
    pub fn tombstones(&self) -> usize {
        self.storage.tombstones()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    #[cfg(feature = "stats")]
    pub(crate) fn storage(&self) -> &Storage<K, V> {
        &self.storage
    }

    /// Live entries in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.storage.iter()
    }

    /// Live entries in insertion order, with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.storage.iter_mut()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Drops every entry, live or not, and returns to the configured
    /// starting capacity.
    pub fn clear(&mut self) {
        self.storage.reset(self.config.initial_capacity());
    }

    /// Drops tombstones and resizes to four buckets per live entry.
    ///
    /// Iteration order and contents are unchanged.
    pub fn compact(&mut self) {
        self.storage.compact();
    }
}

impl<K, V, S> TombHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Inserts `key` if it has no live entry.
    ///
    /// A live entry keeps its value. A previously erased key is revived
    /// with the value it had when it was erased; `value` is dropped.
    pub fn insert(&mut self, key: K, value: V) {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&key);
        self.storage.insert(hash, key, value, false);
    }

    /// Tombstones the entry for `q`. Returns whether a live entry existed.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        self.storage.erase(hash, q)
    }

    /// Iterator positioned at `q`'s entry: its first item is that entry and
    /// the rest follow in insertion order. Empty when `q` is absent.
    pub fn find<Q>(&self, q: &Q) -> Iter<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        match self.storage.find_live(hash, q) {
            Some(h) => self.storage.iter_from(h),
            None => self.storage.iter_end(),
        }
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(q).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let e = self.storage.entry(self.storage.find_live(hash, q)?);
        Some((&e.key, &e.value))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let h = self.storage.find_live(hash, q)?;
        Some(&mut self.storage.entry_mut(h).value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(q).is_some()
    }

    /// Checked lookup: fails with [`MapError::KeyNotFound`] when `q` is absent.
    pub fn at<Q>(&self, q: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).ok_or(MapError::KeyNotFound)
    }

    pub fn at_mut<Q>(&mut self, q: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(q).ok_or(MapError::KeyNotFound)
    }

    /// Returns the value for `key`, inserting `V::default()` first when there
    /// is no live entry. This is the update-or-insert path:
    /// `*map.get_or_insert_default(k) = v`.
    ///
    /// Reviving an erased key resets its value to `V::default()`.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&key);
        let h = match self.storage.find_live(hash, &key) {
            Some(h) => h,
            None => self.storage.insert(hash, key, V::default(), true).0,
        };
        &mut self.storage.entry_mut(h).value
    }
}

impl<K, V> Default for TombHashMap<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Clone for TombHashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Deep copy: a fresh table at the configured starting capacity with
    /// every live entry re-inserted in order. Tombstones are not copied.
    fn clone(&self) -> Self {
        let mut out = Self::with_config(self.config, self.hasher.clone());
        out.extend(self.iter().map(|(k, v)| (k.clone(), v.clone())));
        out
    }
}

impl<K, V, S> fmt::Debug for TombHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for TombHashMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for TombHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, Q, V, S> Index<&Q> for TombHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Eq + Hash,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` has no live entry. Use [`TombHashMap::at`] to get an
    /// error instead.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<K, V, S> Extend<(K, V)> for TombHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts each pair with `insert` semantics: earlier pairs win.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for TombHashMap<K, V, S>
where
    K: Eq + Hash + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for TombHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = Self::with_hasher(S::default());
        m.extend(iter);
        m
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for TombHashMap<K, V, DefaultHashBuilder>
where
    K: Eq + Hash,
{
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, S> IntoIterator for &'a TombHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut TombHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for TombHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.storage.slots)
    }
}
