//! Cache trait for code that wants to stay generic over the cache type.

use std::hash::Hash;

use crate::cache::LruCache;
use crate::error::LruError;

/// Operations of a recency-ordered, capacity-bounded cache.
///
/// `keys` returns owned keys, oldest first, so the trait stays object safe.
pub trait RecencyCache<K, V> {
    /// Insert or update; `true` if an older entry was evicted to make room.
    fn add(&mut self, key: K, value: V) -> bool;

    /// Look up and mark as recently used.
    fn get(&mut self, key: &K) -> Option<&V>;

    fn contains(&self, key: &K) -> bool;

    /// Look up without marking as used.
    fn peek(&self, key: &K) -> Option<&V>;

    fn remove(&mut self, key: &K) -> bool;

    fn remove_oldest(&mut self) -> Option<(K, V)>;

    fn get_oldest(&self) -> Option<(&K, &V)>;

    fn keys(&self) -> Vec<K>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge(&mut self);

    /// Change capacity; returns the number of entries evicted.
    fn resize(&mut self, capacity: usize) -> Result<usize, LruError>;
}

impl<K, V> RecencyCache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn add(&mut self, key: K, value: V) -> bool {
        LruCache::add(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        LruCache::peek(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        LruCache::remove(self, key)
    }

    fn remove_oldest(&mut self) -> Option<(K, V)> {
        LruCache::remove_oldest(self)
    }

    fn get_oldest(&self) -> Option<(&K, &V)> {
        LruCache::get_oldest(self)
    }

    fn keys(&self) -> Vec<K> {
        LruCache::keys(self).cloned().collect()
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn purge(&mut self) {
        LruCache::purge(self)
    }

    fn resize(&mut self, capacity: usize) -> Result<usize, LruError> {
        LruCache::resize(self, capacity)
    }
}
