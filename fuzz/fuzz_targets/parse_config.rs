//! Fuzz harness for cache config parsing
//!
//! Arbitrary text must either fail to parse or yield a config that builds a
//! usable cache.

#![no_main]

use libfuzzer_sys::fuzz_target;
use recency_lru::LruConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    for config in [LruConfig::from_json_str(input), LruConfig::from_yaml_str(input)]
        .into_iter()
        .flatten()
    {
        let mut cache = config.build::<u8, u8>().unwrap();
        cache.add(0, 0);
        assert!(cache.len() <= config.capacity);
    }
});
