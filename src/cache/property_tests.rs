//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the entry validity window.

use proptest::prelude::*;
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;

use crate::cache::CacheEntry;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // An entry is served strictly before created_at + ttl and never at or after it.
    #[test]
    fn prop_entry_valid_iff_before_expiry(ttl_ms in 0u64..600_000, offset_ms in 0u64..1_200_000) {
        let created = Instant::now();
        let entry = CacheEntry::created_at(vec![json!({ "id": 1 })], created, Duration::from_millis(ttl_ms));
        let now = created + Duration::from_millis(offset_ms);

        prop_assert_eq!(entry.is_valid_at(now), offset_ms < ttl_ms);
        prop_assert_eq!(entry.expires_at - entry.created_at, Duration::from_millis(ttl_ms));
    }

    // The payload is shared, never copied, between the entry and its readers.
    #[test]
    fn prop_entry_preserves_payload(ids in prop::collection::vec(0u64..10_000, 0..50)) {
        let users: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();
        let entry = CacheEntry::created_at(users.clone(), Instant::now(), Duration::from_secs(60));
        let reader = entry.clone();

        prop_assert_eq!(entry.data.as_ref(), &users);
        prop_assert!(std::sync::Arc::ptr_eq(&entry.data, &reader.data));
    }
}
