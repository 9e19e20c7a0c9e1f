//! InsertionLog: handles in first-insertion order, plus the public iterators.
//!
//! The log is append-only between rehashes. Erasing only flips an entry's
//! `live` flag, so the log keeps tombstoned handles and the iterators skip
//! them lazily while walking.
//!
//! The arena is rebuilt from scratch on every rehash and never has slots
//! removed in between, so arena slot order always equals log order.
//! `IterMut` and `IntoIter` walk the arena directly and rely on this.

use crate::entry::{Arena, Entry, Handle};
use core::fmt;
use core::iter::FusedIterator;
use slotmap::DefaultKey;

#[derive(Debug, Clone, Default)]
pub(crate) struct InsertionLog {
    order: Vec<Handle>,
}

impl InsertionLog {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Appends `handle` and returns its log index.
    pub(crate) fn push(&mut self, handle: Handle) -> usize {
        let index = self.order.len();
        self.order.push(handle);
        index
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<Handle> {
        self.order.get(index).copied()
    }

    /// Handles from `index` to the end; empty when `index == len()`.
    #[inline]
    pub(crate) fn tail(&self, index: usize) -> &[Handle] {
        &self.order[index..]
    }

    pub(crate) fn into_handles(self) -> Vec<Handle> {
        self.order
    }
}

/// Iterator over live entries in insertion order.
///
/// Returned by [`TombHashMap::iter`](crate::TombHashMap::iter) and, positioned
/// at a found entry, by [`TombHashMap::find`](crate::TombHashMap::find).
pub struct Iter<'a, K, V> {
    handles: core::slice::Iter<'a, Handle>,
    slots: &'a Arena<K, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(handles: &'a [Handle], slots: &'a Arena<K, V>) -> Self {
        Self {
            handles: handles.iter(),
            slots,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            handles: self.handles.clone(),
            slots: self.slots,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for h in self.handles.by_ref() {
            let e = &self.slots[h.raw_handle()];
            if e.live {
                return Some((&e.key, &e.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.handles.len()))
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterator over live entries in insertion order with mutable values.
pub struct IterMut<'a, K, V> {
    slots: slotmap::basic::IterMut<'a, DefaultKey, Entry<K, V>>,
    order: core::slice::Iter<'a, Handle>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(log: &'a InsertionLog, slots: &'a mut Arena<K, V>) -> Self {
        Self {
            slots: slots.iter_mut(),
            order: log.order.iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (k, e) = self.slots.next()?;
            let logged = self.order.next();
            debug_assert_eq!(
                logged.map(Handle::raw_handle),
                Some(k),
                "arena order diverged from insertion log"
            );
            if e.live {
                return Some((&e.key, &mut e.value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len()))
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over live entries in insertion order.
pub struct IntoIter<K, V> {
    inner: slotmap::basic::IntoIter<DefaultKey, Entry<K, V>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(slots: Arena<K, V>) -> Self {
        Self {
            inner: slots.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find(|(_, e)| e.live)
            .map(|(_, e)| (e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator over live keys in insertion order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over live values in insertion order.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Iterator over live values in insertion order, mutably.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
