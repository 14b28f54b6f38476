//! Naive LRU used as an oracle in property tests and fuzzing.
//!
//! Entries sit in a `Vec` ordered from least to most recently used, so every
//! operation is a linear scan. Slow, but small enough to check by eye.

/// Reference LRU model. Mirrors the cache's operations and keeps its own
/// log of departed entries in place of a callback.
#[derive(Debug, Clone)]
pub struct ReferenceLru<K, V> {
    capacity: usize,
    entries: Vec<(K, V)>,
    evicted: Vec<(K, V)>,
}

impl<K, V> ReferenceLru<K, V>
where
    K: PartialEq + Clone,
    V: Clone,
{
    /// Create a new model with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
            evicted: Vec::new(),
        }
    }

    pub fn add(&mut self, key: K, value: V) -> bool {
        // If key exists, update and move to the end (most recently used)
        if let Some(pos) = self.position(&key) {
            self.entries.remove(pos);
            self.entries.push((key, value));
            return false;
        }

        self.entries.push((key, value));
        if self.entries.len() > self.capacity {
            let oldest = self.entries.remove(0);
            self.evicted.push(oldest);
            return true;
        }
        false
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        let value = entry.1.clone();
        self.entries.push(entry);
        Some(value)
    }

    pub fn peek(&self, key: &K) -> Option<V> {
        self.position(key).map(|pos| self.entries[pos].1.clone())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(pos) => {
                let entry = self.entries.remove(pos);
                self.evicted.push(entry);
                true
            }
            None => false,
        }
    }

    pub fn remove_oldest(&mut self) -> Option<(K, V)> {
        if self.entries.is_empty() {
            return None;
        }
        let entry = self.entries.remove(0);
        self.evicted.push(entry.clone());
        Some(entry)
    }

    pub fn get_oldest(&self) -> Option<(K, V)> {
        self.entries.first().cloned()
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear all items; each one counts as departed, oldest first.
    pub fn purge(&mut self) {
        self.evicted.append(&mut self.entries);
    }

    /// Mirrors the cache: zero is refused and changes nothing.
    pub fn resize(&mut self, capacity: usize) -> Option<usize> {
        if capacity == 0 {
            return None;
        }
        self.capacity = capacity;
        let excess = self.entries.len().saturating_sub(capacity);
        self.evicted.extend(self.entries.drain(..excess));
        Some(excess)
    }

    /// Entries that have left the model, in departure order.
    pub fn evicted(&self) -> &[(K, V)] {
        &self.evicted
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}
