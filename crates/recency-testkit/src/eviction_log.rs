use std::sync::{Arc, Mutex, MutexGuard};

/// Records every `(key, value)` passed to an eviction callback.
///
/// Clone the log (or call [`EvictionLog::recorder`]) to hand a writer to the
/// cache while keeping a reader in the test.
#[derive(Debug)]
pub struct EvictionLog<K, V> {
    entries: Arc<Mutex<Vec<(K, V)>>>,
}

impl<K, V> Clone for EvictionLog<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for EvictionLog<K, V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<K, V> EvictionLog<K, V>
where
    K: Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends to this log.
    pub fn recorder(&self) -> impl FnMut(&K, &V) + Send + use<K, V> {
        let log = self.clone();
        move |key: &K, value: &V| log.lock().push((key.clone(), value.clone()))
    }

    /// Everything recorded so far, in callback order.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Hand back the recorded entries and start over.
    pub fn take(&self) -> Vec<(K, V)> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(K, V)>> {
        self.entries.lock().expect("eviction log poisoned")
    }
}
