//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check freshness, replacement and statistics invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashMap;

use crate::cache::{Cache, CachedValue};

// == Strategies ==
/// Generates document keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}".prop_map(|s| s)
}

/// Generates a cached result, either a small document or a "not found"
fn cached_value_strategy() -> impl Strategy<Value = CachedValue> {
    prop_oneof![
        any::<i64>().prop_map(|n| CachedValue::found(json!({ "n": n }))),
        Just(CachedValue::NotFound),
    ]
}

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_500_000_000, 0).unwrap()
}

#[derive(Debug, Clone)]
enum CacheOp {
    Fill { key: String, value: CachedValue },
    Lookup { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), cached_value_strategy())
            .prop_map(|(key, value)| CacheOp::Fill { key, value }),
        key_strategy().prop_map(|key| CacheOp::Lookup { key }),
        Just(CacheOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // An entry filled at t0 with TTL T is returned for every instant in
    // [t0, t0+T) and is a miss from t0+T onwards.
    #[test]
    fn prop_freshness_window(
        key in key_strategy(),
        value in cached_value_strategy(),
        ttl_ms in 1i64..100_000,
        offset_ms in 0i64..200_000,
    ) {
        let cache = Cache::new();
        let t0 = epoch();
        let ttl = Duration::milliseconds(ttl_ms);

        cache.fill(&key, value.clone(), t0, ttl);
        let found = cache.lookup(&key, t0 + Duration::milliseconds(offset_ms));

        if offset_ms < ttl_ms {
            prop_assert_eq!(found.map(|e| e.value), Some(value));
        } else {
            prop_assert!(found.is_none(), "Entry should be stale after its TTL");
        }
    }

    // The last fill for a key always wins, and there is never more than one
    // entry per key.
    #[test]
    fn prop_last_fill_wins(
        key in key_strategy(),
        values in prop::collection::vec(cached_value_strategy(), 1..10),
    ) {
        let cache = Cache::new();
        let t0 = epoch();

        for value in &values {
            cache.fill(&key, value.clone(), t0, Duration::seconds(1));
        }

        let entry = cache.lookup(&key, t0).unwrap();
        prop_assert_eq!(Some(entry.value), values.last().cloned());
        prop_assert_eq!(cache.len(), 1);
    }

    // Against a model map, lookups agree and the statistics add up.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let cache = Cache::new();
        let t0 = epoch();
        let mut model: HashMap<String, CachedValue> = HashMap::new();
        let mut expected_fills: u64 = 0;
        let mut expected_lookups: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Fill { key, value } => {
                    cache.fill(&key, value.clone(), t0, Duration::seconds(1));
                    model.insert(key, value);
                    expected_fills += 1;
                }
                CacheOp::Lookup { key } => {
                    let got = cache.lookup(&key, t0).map(|e| e.value);
                    prop_assert_eq!(got, model.get(&key).cloned());
                    expected_lookups += 1;
                }
                CacheOp::Clear => {
                    prop_assert_eq!(cache.clear(), model.len());
                    model.clear();
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.fills, expected_fills);
        prop_assert_eq!(stats.hits + stats.negative_hits + stats.misses, expected_lookups);
        prop_assert_eq!(stats.total_entries, model.len());
    }

    // Purging at an instant removes exactly the entries stale at that instant.
    #[test]
    fn prop_purge_removes_only_stale(
        ttls in prop::collection::vec(1i64..10_000, 1..20),
        at_ms in 0i64..10_000,
    ) {
        let cache = Cache::new();
        let t0 = epoch();

        for (i, ttl_ms) in ttls.iter().enumerate() {
            cache.fill(&format!("key{}", i), CachedValue::NotFound, t0, Duration::milliseconds(*ttl_ms));
        }

        let expected = ttls.iter().filter(|ttl_ms| **ttl_ms <= at_ms).count();
        let removed = cache.purge_expired(t0 + Duration::milliseconds(at_ms));

        prop_assert_eq!(removed, expected);
        prop_assert_eq!(cache.len(), ttls.len() - expected);
    }
}
