//! Cache Entry Module
//!
//! Defines the on-disk shape of a cached item and its expiration metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and expiration metadata.
///
/// Serialized as `{"lifetime": <unix seconds>, "data": <value>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Expiration timestamp (Unix seconds). Recorded, never enforced by the store.
    #[serde(rename = "lifetime")]
    pub expires_at: i64,
    /// The stored value
    #[serde(rename = "data")]
    pub value: Value,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `lifetime_secs` from now.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `lifetime_secs` - Lifetime in seconds
    pub fn new(value: Value, lifetime_secs: u64) -> Self {
        let lifetime = i64::try_from(lifetime_secs).unwrap_or(i64::MAX);
        Self {
            value,
            expires_at: current_timestamp().saturating_add(lifetime),
        }
    }

    // == Is Expired ==
    /// Checks if the recorded expiration time has passed.
    ///
    /// The store never consults this on read. It exists for callers that want
    /// to act on the advisory timestamp themselves.
    pub fn is_expired(&self) -> bool {
        current_timestamp() > self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining lifetime in seconds, `0` once expired.
    pub fn ttl_remaining(&self) -> u64 {
        u64::try_from(self.expires_at.saturating_sub(current_timestamp())).unwrap_or(0)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Loose truthiness used by `has` and `touch`.
///
/// `null`, `false`, `0`, `0.0`, `""`, `"0"`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_creation() {
        let before = current_timestamp();
        let entry = CacheEntry::new(json!("test_value"), 60);

        assert_eq!(entry.value, json!("test_value"));
        assert!(entry.expires_at >= before + 60);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_future_timestamp_not_expired() {
        let entry = CacheEntry {
            value: json!(1),
            expires_at: current_timestamp() + 5,
        };
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expired_in_past() {
        let entry = CacheEntry {
            value: json!(1),
            expires_at: current_timestamp() - 10,
        };
        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), 0);
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(json!("v"), 10);
        let remaining = entry.ttl_remaining();
        assert!(remaining <= 10);
        assert!(remaining >= 9);
    }

    #[test]
    fn test_ttl_remaining_extreme_timestamps() {
        let ancient = CacheEntry {
            value: json!(1),
            expires_at: i64::MIN,
        };
        assert!(ancient.is_expired());
        assert_eq!(ancient.ttl_remaining(), 0);

        let distant = CacheEntry {
            value: json!(1),
            expires_at: i64::MAX,
        };
        assert!(!distant.is_expired());
        assert!(distant.ttl_remaining() > 0);
    }

    #[test]
    fn test_huge_lifetime_saturates() {
        let entry = CacheEntry::new(json!("v"), u64::MAX);
        assert_eq!(entry.expires_at, i64::MAX);
    }

    #[test]
    fn test_serialized_shape() {
        let entry = CacheEntry {
            value: json!({"name": "A"}),
            expires_at: 1_700_000_000,
        };
        let encoded = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            encoded,
            json!({"lifetime": 1_700_000_000, "data": {"name": "A"}})
        );
    }

    #[test]
    fn test_truthiness() {
        for falsy in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!("0"),
            json!([]),
            json!({}),
        ] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [
            json!(true),
            json!(1),
            json!(-0.5),
            json!("a"),
            json!("false"),
            json!([0]),
            json!({"a": null}),
        ] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }
}
