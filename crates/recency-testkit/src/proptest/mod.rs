//! Proptest strategies for recency property-based testing
//!
//! This module provides reusable proptest strategies for generating cache
//! capacities, keys and operation scripts.

pub mod strategies;

pub use strategies::{
    strategy_cache_op, strategy_cache_ops, strategy_capacity, strategy_distinct_keys,
    strategy_key, strategy_value,
};
