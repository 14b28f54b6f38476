//! LRU (Least Recently Used) cache with eviction callbacks and runtime resizing.
//!
//! [`LruCache`] bounds the number of live entries. Adding a new key to a full
//! cache evicts the least recently used entry; an optional callback is told
//! about every entry that leaves, whether it was evicted, removed, purged or
//! pushed out by shrinking the capacity.
//!
//! Entries live in a slot arena linked into a recency list, and a hash index
//! maps each key to its slot, so lookups, updates and evictions are O(1).
//!
//! ```
//! use recency_lru::LruCache;
//!
//! let mut cache = LruCache::new(3).unwrap();
//! cache.add("a", 1);
//! cache.add("b", 2);
//! cache.add("c", 3);
//!
//! // "a" becomes the most recently used, so "b" is evicted next.
//! assert_eq!(cache.get(&"a"), Some(&1));
//! assert!(cache.add("d", 4));
//!
//! let keys: Vec<_> = cache.keys().copied().collect();
//! assert_eq!(keys, ["c", "a", "d"]);
//! ```
//!
//! The cache does no locking. Share it across threads by putting the whole
//! cache behind a `Mutex`.

mod cache;
mod config;
mod error;
mod order;
mod traits;

pub use cache::{EvictFn, Iter, Keys, LruCache};
pub use config::LruConfig;
pub use error::LruError;
pub use traits::RecencyCache;
