//! Cache configuration that embeds in an application's own config document.

use std::hash::Hash;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cache::LruCache;
use crate::error::{LruError, check_capacity};

/// Sizing for an [`LruCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LruConfig {
    /// Maximum number of live entries
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    128
}

impl Default for LruConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl LruConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn validate(&self) -> Result<(), LruError> {
        check_capacity(self.capacity).map(|_| ())
    }

    /// Parse and validate a JSON config section.
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let config: Self =
            serde_json::from_str(text).context("Failed to parse JSON cache config")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config section.
    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self =
            serde_yaml::from_str(text).context("Failed to parse YAML cache config")?;
        config.validate()?;
        Ok(config)
    }

    /// Build an empty cache with this capacity.
    pub fn build<K, V>(&self) -> Result<LruCache<K, V>, LruError>
    where
        K: Hash + Eq + Clone,
    {
        LruCache::new(self.capacity)
    }

    /// Build an empty cache with this capacity and an eviction callback.
    pub fn build_with_evict<K, V, F>(&self, on_evict: F) -> Result<LruCache<K, V>, LruError>
    where
        K: Hash + Eq + Clone,
        F: FnMut(&K, &V) + Send + 'static,
    {
        LruCache::with_evict(self.capacity, on_evict)
    }
}
