//! JSON File Cache - A persistent key-value cache backed by one JSON file
//!
//! Keeps the whole dataset in memory and rewrites the file on every mutation.
//! Expiration timestamps are recorded as metadata only.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{is_valid_key, CacheEntry, JsonFileCache};
pub use config::Config;
pub use error::{CacheError, Result};
