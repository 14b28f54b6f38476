//! The LRU cache: a key index over an arena-backed recency order.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::iter::FusedIterator;

use crate::error::{LruError, check_capacity};
use crate::order::{Handle, Order};

/// Callback run for every entry that leaves the cache.
///
/// The cache owns the callback for its whole life, so it cannot borrow from
/// the caller's stack, and it must be `Send` so the cache can move behind a
/// lock or into another thread. Share state with the caller through an
/// `Arc<Mutex<_>>` or a channel sender.
pub type EvictFn<K, V> = Box<dyn FnMut(&K, &V) + Send>;

/// LRU cache with a fixed (but resizable) capacity.
///
/// Adding a new key to a full cache evicts the least recently used entry.
/// `get` and re-adding an existing key both count as a use; `peek`,
/// `contains`, `get_oldest` and iteration do not.
///
/// The optional eviction callback sees every entry that leaves the cache,
/// whichever operation removed it. It runs after the entry has been
/// unlinked, before the triggering call returns.
///
/// Not synchronized. `get` reorders entries and so takes `&mut self`; wrap
/// the whole cache in a lock to share it between threads.
pub struct LruCache<K, V> {
    capacity: usize,
    index: HashMap<K, Handle>,
    order: Order<K, V>,
    on_evict: Option<EvictFn<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity.
    ///
    /// Fails with [`LruError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, LruError> {
        let capacity = check_capacity(capacity)?;
        Ok(Self {
            capacity,
            index: HashMap::new(),
            order: Order::new(),
            on_evict: None,
        })
    }

    /// Create a new LRU cache that reports every departing entry to `on_evict`.
    ///
    /// The callback is stored as an [`EvictFn`], hence the `Send + 'static`
    /// bound. To collect evictions on the caller's side, hand it a sender:
    ///
    /// ```
    /// use std::sync::mpsc;
    ///
    /// use recency_lru::LruCache;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// let mut cache = LruCache::with_evict(1, move |key: &u32, value: &u32| {
    ///     let _ = tx.send((*key, *value));
    /// })
    /// .unwrap();
    ///
    /// cache.add(1, 10);
    /// cache.add(2, 20);
    /// cache.purge();
    /// drop(cache);
    ///
    /// assert_eq!(rx.iter().collect::<Vec<_>>(), vec![(1, 10), (2, 20)]);
    /// ```
    pub fn with_evict<F>(capacity: usize, on_evict: F) -> Result<Self, LruError>
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        let mut cache = Self::new(capacity)?;
        cache.on_evict = Some(Box::new(on_evict));
        Ok(cache)
    }

    /// Insert or update an entry, marking it as most recently used.
    ///
    /// Returns `true` when the insertion pushed the least recently used
    /// entry out. Updating an existing key never evicts.
    pub fn add(&mut self, key: K, value: V) -> bool {
        if let Some(&handle) = self.index.get(&key) {
            *self.order.value_mut(handle) = value;
            self.order.move_to_front(handle);
            return false;
        }

        let handle = self.order.push_front(key.clone(), value);
        self.index.insert(key, handle);

        let mut evicted = false;
        while self.order.len() > self.capacity {
            evicted |= self.evict_oldest();
        }
        evicted
    }

    /// Get a value from the cache, marking it as recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let handle = *self.index.get(key)?;
        self.order.move_to_front(handle);
        Some(self.order.entry(handle).1)
    }

    /// Get a value without touching its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index
            .get(key)
            .map(|&handle| self.order.entry(handle).1)
    }

    /// Check if the cache contains a key. Does not touch recency.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Remove a key, reporting it to the eviction callback.
    ///
    /// Returns `false` (and runs no callback) if the key was absent.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(handle) = self.index.remove(key) else {
            return false;
        };
        let (key, value) = self.order.remove(handle);
        self.notify(&key, &value);
        true
    }

    /// Remove and return the least recently used entry.
    pub fn remove_oldest(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.pop_back()?;
        self.index.remove(&key);
        self.notify(&key, &value);
        Some((key, value))
    }

    /// Remove every entry. The callback runs once per entry, oldest first.
    pub fn purge(&mut self) {
        let drained = self.order.drain_oldest_first();
        self.index.clear();
        tracing::debug!(purged = drained.len(), "purged cache");
        for (key, value) in &drained {
            self.notify(key, value);
        }
    }

    /// Change the capacity, evicting least recently used entries until the
    /// cache fits. Returns how many entries were evicted.
    ///
    /// A zero capacity is rejected the same way [`LruCache::new`] rejects
    /// it, and leaves the cache untouched. The new capacity takes effect only
    /// once every eviction has gone through, so a panicking callback leaves
    /// the old capacity in place.
    pub fn resize(&mut self, capacity: usize) -> Result<usize, LruError> {
        let capacity = check_capacity(capacity)?;

        let excess = self.order.len().saturating_sub(capacity);
        for _ in 0..excess {
            self.evict_oldest();
        }
        self.capacity = capacity;
        tracing::debug!(capacity, evicted = excess, "resized cache");
        Ok(excess)
    }

    fn evict_oldest(&mut self) -> bool {
        let Some((key, value)) = self.order.pop_back() else {
            return false;
        };
        self.index.remove(&key);
        tracing::trace!(
            len = self.order.len(),
            capacity = self.capacity,
            "evicted least recently used entry"
        );
        self.notify(&key, &value);
        true
    }

    fn notify(&mut self, key: &K, value: &V) {
        if let Some(on_evict) = self.on_evict.as_mut() {
            on_evict(key, value);
        }
    }
}

impl<K, V> LruCache<K, V> {
    /// Peek at the least recently used entry without removing it.
    pub fn get_oldest(&self) -> Option<(&K, &V)> {
        self.order.tail().map(|handle| self.order.entry(handle))
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Entries from least to most recently used. Does not touch recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            order: &self.order,
            oldest: self.order.tail(),
            newest: self.order.head(),
            remaining: self.order.len(),
        }
    }

    /// Get the number of items in the cache.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Get the capacity of the cache.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K: Debug, V: Debug> Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache entries, oldest first. See [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    order: &'a Order<K, V>,
    oldest: Option<Handle>,
    newest: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let order = self.order;
        let handle = self.oldest?;
        self.oldest = order.newer(handle);
        self.remaining -= 1;
        Some(order.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let order = self.order;
        let handle = self.newest?;
        self.newest = order.older(handle);
        self.remaining -= 1;
        Some(order.entry(handle))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Iterator over cache keys, oldest first. See [`LruCache::keys`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("remaining", &self.inner.remaining)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;
    use recency_testkit::EvictionLog;

    fn keys_of<K: Clone, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.keys().cloned().collect()
    }

    #[test]
    fn test_lru_cache_new() {
        let cache: LruCache<i32, &str> = LruCache::new(3).unwrap();
        assert_eq!(cache.capacity(), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_cache_zero_capacity_rejected() {
        let err = LruCache::<i32, i32>::new(0).unwrap_err();
        assert_eq!(err, LruError::InvalidCapacity(0));

        let err = LruCache::<i32, i32>::with_evict(0, |_, _| {}).unwrap_err();
        assert_eq!(err, LruError::InvalidCapacity(0));
    }

    #[test]
    fn test_lru_cache_add_and_get() {
        let mut cache = LruCache::new(3).unwrap();
        assert!(!cache.add(1, "one"));
        assert!(!cache.add(2, "two"));

        assert_eq!(cache.get(&1), Some(&"one"));
        assert_eq!(cache.get(&2), Some(&"two"));
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_cache_get_refreshes_before_eviction() {
        let log = EvictionLog::new();
        let mut cache = LruCache::with_evict(3, log.recorder()).unwrap();
        cache.add("a", 1);
        cache.add("b", 2);
        cache.add("c", 3);

        // Access "a" to make "b" the least recently used
        cache.get(&"a");

        assert!(cache.add("d", 4));
        assert_eq!(log.entries(), vec![("b", 2)]);
        assert_eq!(keys_of(&cache), vec!["c", "a", "d"]);
    }

    #[test]
    fn test_lru_cache_eviction_bounded_by_capacity() {
        let mut cache = LruCache::new(2).unwrap();
        for i in 0..10 {
            cache.add(i, i * 10);
            assert!(cache.len() <= 2);
        }
        assert_eq!(keys_of(&cache), vec![8, 9]);
    }

    #[test]
    fn test_lru_cache_update_existing() {
        let log = EvictionLog::new();
        let mut cache = LruCache::with_evict(2, log.recorder()).unwrap();
        cache.add(1, "one");
        cache.add(2, "two");

        assert!(!cache.add(1, "updated"));
        assert_eq!(cache.len(), 2);
        assert!(log.is_empty());
        assert_eq!(cache.peek(&1), Some(&"updated"));
        // Updating moved 1 to the front
        assert_eq!(keys_of(&cache), vec![2, 1]);
    }

    #[test]
    fn test_lru_cache_peek_and_contains_keep_order() {
        let mut cache = LruCache::new(3).unwrap();
        cache.add("a", 1);
        cache.add("b", 2);
        cache.add("c", 3);

        for _ in 0..3 {
            assert_eq!(cache.peek(&"a"), Some(&1));
            assert!(cache.contains(&"a"));
            assert!(!cache.contains(&"z"));
            assert_eq!(cache.peek(&"z"), None);
        }
        assert_eq!(keys_of(&cache), vec!["a", "b", "c"]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_lru_cache_remove() {
        let log = EvictionLog::new();
        let mut cache = LruCache::with_evict(3, log.recorder()).unwrap();
        cache.add(1, "one");

        assert!(cache.remove(&1));
        assert!(!cache.contains(&1));
        assert!(cache.is_empty());
        assert_eq!(log.entries(), vec![(1, "one")]);
    }

    #[test]
    fn test_lru_cache_remove_absent_is_noop() {
        let log = EvictionLog::new();
        let mut cache = LruCache::with_evict(3, log.recorder()).unwrap();
        cache.add(1, "one");

        assert!(!cache.remove(&7));
        assert_eq!(cache.len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn test_lru_cache_remove_oldest() {
        let log = EvictionLog::new();
        let mut cache = LruCache::with_evict(3, log.recorder()).unwrap();
        assert_eq!(cache.remove_oldest(), None);

        cache.add("a", 1);
        cache.add("b", 2);
        cache.get(&"a");

        assert_eq!(cache.remove_oldest(), Some(("b", 2)));
        assert_eq!(cache.remove_oldest(), Some(("a", 1)));
        assert_eq!(cache.remove_oldest(), None);
        assert_eq!(log.entries(), vec![("b", 2), ("a", 1)]);
    }

    #[test]
    fn test_lru_cache_get_oldest_does_not_reorder() {
        let mut cache = LruCache::new(3).unwrap();
        assert_eq!(cache.get_oldest(), None);

        cache.add("a", 1);
        cache.add("b", 2);
        assert_eq!(cache.get_oldest(), Some((&"a", &1)));
        assert_eq!(cache.get_oldest(), Some((&"a", &1)));
        assert_eq!(keys_of(&cache), vec!["a", "b"]);
    }

    #[test]
    fn test_lru_cache_purge_notifies_every_entry() {
        let log = EvictionLog::new();
        let mut cache = LruCache::with_evict(4, log.recorder()).unwrap();
        cache.add("a", 1);
        cache.add("b", 2);
        cache.add("c", 3);

        cache.purge();

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.keys().count(), 0);
        assert_eq!(cache.capacity(), 4);
        let mut evicted = log.entries();
        evicted.sort();
        assert_eq!(evicted, vec![("a", 1), ("b", 2), ("c", 3)]);

        // Usable again afterwards
        assert!(!cache.add("d", 4));
        assert_eq!(cache.get(&"d"), Some(&4));
    }

    #[test]
    fn test_lru_cache_resize_shrink() {
        let log = EvictionLog::new();
        let mut cache = LruCache::with_evict(5, log.recorder()).unwrap();
        for (i, key) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
            cache.add(key, i);
        }

        assert_eq!(cache.resize(2), Ok(3));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);
        assert_eq!(keys_of(&cache), vec!["d", "e"]);
        assert_eq!(log.entries(), vec![("a", 0), ("b", 1), ("c", 2)]);
    }

    #[test]
    fn test_lru_cache_resize_grow() {
        let log = EvictionLog::new();
        let mut cache = LruCache::with_evict(2, log.recorder()).unwrap();
        cache.add(1, 1);
        cache.add(2, 2);

        assert_eq!(cache.resize(4), Ok(0));
        assert_eq!(cache.capacity(), 4);
        assert!(log.is_empty());

        assert!(!cache.add(3, 3));
        assert!(!cache.add(4, 4));
        assert!(cache.add(5, 5));
        assert_eq!(keys_of(&cache), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_lru_cache_resize_zero_rejected() {
        let mut cache = LruCache::new(3).unwrap();
        cache.add(1, 1);

        assert_eq!(cache.resize(0), Err(LruError::InvalidCapacity(0)));
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_cache_iter_both_directions() {
        let mut cache = LruCache::new(3).unwrap();
        cache.add("a", 1);
        cache.add("b", 2);
        cache.add("c", 3);
        cache.get(&"a");

        let oldest_first: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(oldest_first, vec![("b", 2), ("c", 3), ("a", 1)]);

        let newest_first: Vec<_> = cache.keys().rev().copied().collect();
        assert_eq!(newest_first, vec!["a", "c", "b"]);

        let mut keys = cache.keys();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys.next(), Some(&"b"));
        assert_eq!(keys.next_back(), Some(&"a"));
        assert_eq!(keys.next(), Some(&"c"));
        assert_eq!(keys.next_back(), None);
        assert_eq!(keys.next(), None);
    }

    #[test]
    fn test_lru_cache_round_trip() {
        let mut cache = LruCache::new(2).unwrap();
        cache.add("k", String::from("v"));
        let len = cache.len();
        assert_eq!(cache.get(&"k").map(String::as_str), Some("v"));
        assert_eq!(cache.len(), len);
    }

    #[test]
    fn test_lru_cache_debug_lists_oldest_first() {
        let mut cache = LruCache::new(3).unwrap();
        cache.add("a", 1);
        cache.add("b", 2);
        cache.get(&"a");

        insta::assert_snapshot!(
            format!("{cache:?}"),
            @r#"LruCache { capacity: 3, entries: [("b", 2), ("a", 1)], .. }"#
        );
    }

    fn panics_on(target: i32) -> impl FnMut(&i32, &i32) + Send {
        move |key: &i32, _: &i32| {
            if *key == target {
                panic!("eviction callback failed on {key}");
            }
        }
    }

    #[test]
    fn test_lru_cache_panicking_callback_during_add() {
        let mut cache = LruCache::with_evict(2, panics_on(0)).unwrap();
        cache.add(0, 0);
        cache.add(1, 1);

        let result = catch_unwind(AssertUnwindSafe(|| cache.add(2, 2)));
        assert!(result.is_err());

        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(keys_of(&cache), vec![1, 2]);
        assert!(!cache.contains(&0));

        assert!(cache.add(3, 3));
        assert_eq!(keys_of(&cache), vec![2, 3]);
    }

    #[test]
    fn test_lru_cache_panicking_callback_during_resize() {
        let mut cache = LruCache::with_evict(5, panics_on(2)).unwrap();
        for key in 0..5 {
            cache.add(key, key);
        }

        let result = catch_unwind(AssertUnwindSafe(|| cache.resize(1)));
        assert!(result.is_err());

        // Keys 0..=2 are gone but the shrink never completed
        assert_eq!(cache.capacity(), 5);
        assert_eq!(cache.len(), 2);
        assert!(cache.len() <= cache.capacity());
        assert_eq!(keys_of(&cache), vec![3, 4]);

        for key in 5..9 {
            cache.add(key, key);
        }
        assert_eq!(cache.len(), 5);
        assert_eq!(keys_of(&cache), vec![4, 5, 6, 7, 8]);

        assert_eq!(cache.resize(1), Ok(4));
        assert_eq!(cache.capacity(), 1);
        assert_eq!(keys_of(&cache), vec![8]);
    }

    #[test]
    fn test_lru_cache_panicking_callback_during_purge() {
        let mut cache = LruCache::with_evict(3, panics_on(1)).unwrap();
        for key in 0..3 {
            cache.add(key, key);
        }

        let result = catch_unwind(AssertUnwindSafe(|| cache.purge()));
        assert!(result.is_err());

        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 3);
        assert!(!cache.contains(&2));

        cache.add(7, 7);
        assert_eq!(cache.get(&7), Some(&7));
        assert_eq!(keys_of(&cache), vec![7]);
    }

    #[test]
    fn test_lru_cache_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<LruCache<String, Vec<u8>>>();
    }
}
