//! Fuzz harness for cache operation sequences
//!
//! Decodes the input into a script of cache calls, replays it against both
//! `LruCache` and the naive `ReferenceLru`, and panics on any disagreement.
//! The first byte picks the starting capacity.

#![no_main]

use libfuzzer_sys::fuzz_target;
use recency_lru::LruCache;
use recency_testkit::ops::MAX_CAPACITY;
use recency_testkit::{CacheOp, EvictionLog, ReferenceLru, decode_ops};

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first) % MAX_CAPACITY + 1;

    let log = EvictionLog::new();
    let mut cache = LruCache::with_evict(capacity, log.recorder()).unwrap();
    let mut model = ReferenceLru::new(capacity);

    for op in decode_ops(rest) {
        match op {
            CacheOp::Add(k, v) => assert_eq!(cache.add(k, v), model.add(k, v)),
            CacheOp::Get(k) => assert_eq!(cache.get(&k).copied(), model.get(&k)),
            CacheOp::Peek(k) => assert_eq!(cache.peek(&k).copied(), model.peek(&k)),
            CacheOp::Contains(k) => assert_eq!(cache.contains(&k), model.contains(&k)),
            CacheOp::Remove(k) => assert_eq!(cache.remove(&k), model.remove(&k)),
            CacheOp::RemoveOldest => assert_eq!(cache.remove_oldest(), model.remove_oldest()),
            CacheOp::GetOldest => assert_eq!(
                cache.get_oldest().map(|(k, v)| (*k, *v)),
                model.get_oldest()
            ),
            CacheOp::Purge => {
                cache.purge();
                model.purge();
            }
            CacheOp::Resize(c) => assert_eq!(cache.resize(c).ok(), model.resize(c)),
        }

        assert!(cache.len() <= cache.capacity());
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), model.keys());
    }

    assert_eq!(log.entries().as_slice(), model.evicted());
});
