//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value, `null` when absent
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for GET /has/:key
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    pub key: String,
    /// True when the key holds a truthy value
    pub exists: bool,
}

impl HasResponse {
    pub fn new(key: impl Into<String>, exists: bool) -> Self {
        Self {
            key: key.into(),
            exists,
        }
    }
}

/// Response body for single-key mutations (set, touch, delete)
#[derive(Debug, Clone, Serialize)]
pub struct WriteResponse {
    /// The key that was written
    pub key: String,
    /// Whether the backing file was rewritten
    pub persisted: bool,
}

impl WriteResponse {
    /// Creates a new WriteResponse
    pub fn new(key: impl Into<String>, persisted: bool) -> Self {
        Self {
            key: key.into(),
            persisted,
        }
    }
}

/// Response body for clear and bulk mutations
#[derive(Debug, Clone, Serialize)]
pub struct PersistResponse {
    pub persisted: bool,
}

/// Response body for POST /get_multiple
#[derive(Debug, Clone, Serialize)]
pub struct GetMultipleResponse {
    pub values: HashMap<String, Value>,
}

/// Response body for the info endpoint (GET /info)
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    /// Backing file path
    pub path: String,
    /// Current number of entries in cache
    pub total_entries: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
