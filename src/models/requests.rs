//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional lifetime in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional lifetime in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for POST /touch/:key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TouchRequest {
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for POST /get_multiple
#[derive(Debug, Clone, Deserialize)]
pub struct GetMultipleRequest {
    pub keys: Vec<String>,
    /// Value reported for absent keys
    #[serde(default)]
    pub default: Value,
}

/// Request body for PUT /set_multiple
#[derive(Debug, Clone, Deserialize)]
pub struct SetMultipleRequest {
    pub values: Map<String, Value>,
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for POST /del_multiple
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteMultipleRequest {
    pub keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": {"name": "A"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, json!({"name": "A"}));
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "test", "value": 0, "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, json!(0));
        assert_eq!(req.ttl, Some(60));
    }

    #[test]
    fn test_set_request_null_value() {
        let json = r#"{"key": "test", "value": null}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert!(req.value.is_null());
    }

    #[test]
    fn test_get_multiple_default_is_null() {
        let req: GetMultipleRequest = serde_json::from_str(r#"{"keys": ["a", "b"]}"#).unwrap();
        assert_eq!(req.keys, vec!["a", "b"]);
        assert!(req.default.is_null());
    }

    #[test]
    fn test_set_multiple_request() {
        let req: SetMultipleRequest =
            serde_json::from_str(r#"{"values": {"a": 1, "b": 2}, "ttl": 5}"#).unwrap();
        assert_eq!(req.values.len(), 2);
        assert_eq!(req.ttl, Some(5));
    }
}
