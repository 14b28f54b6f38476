//! Proptest strategies for recency property-based testing

use proptest::prelude::*;

use crate::ops::{CacheOp, KEY_SPACE, MAX_CAPACITY};

// ============================================================================
// Base Strategies
// ============================================================================

/// Strategy for generating valid (positive) capacities
pub fn strategy_capacity() -> impl Strategy<Value = usize> {
    1usize..=MAX_CAPACITY
}

/// Strategy for generating keys from the small shared key space
pub fn strategy_key() -> impl Strategy<Value = u8> {
    0..KEY_SPACE
}

/// Strategy for generating values
pub fn strategy_value() -> impl Strategy<Value = u32> {
    any::<u32>()
}

/// Strategy for generating a run of distinct keys
pub fn strategy_distinct_keys(max: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::hash_set(any::<u32>(), 0..=max)
        .prop_map(|keys| keys.into_iter().collect())
}

// ============================================================================
// Operation Scripts
// ============================================================================

/// Strategy for generating a single cache call, weighted toward adds
pub fn strategy_cache_op() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (strategy_key(), strategy_value()).prop_map(|(k, v)| CacheOp::Add(k, v)),
        3 => strategy_key().prop_map(CacheOp::Get),
        1 => strategy_key().prop_map(CacheOp::Peek),
        1 => strategy_key().prop_map(CacheOp::Contains),
        2 => strategy_key().prop_map(CacheOp::Remove),
        1 => Just(CacheOp::RemoveOldest),
        1 => Just(CacheOp::GetOldest),
        1 => Just(CacheOp::Purge),
        1 => (0..=MAX_CAPACITY).prop_map(CacheOp::Resize),
    ]
}

/// Strategy for generating operation scripts
pub fn strategy_cache_ops(max_len: usize) -> impl Strategy<Value = Vec<CacheOp>> {
    prop::collection::vec(strategy_cache_op(), 0..=max_len)
}
