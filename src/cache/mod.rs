//! Cache Module
//!
//! Provides a key-value cache mirrored in memory and persisted as a single
//! JSON file, with advisory expiration timestamps.

mod entry;
mod key;
mod persist;
mod store;


// Re-export public types
pub use entry::{current_timestamp, is_truthy, CacheEntry};
pub use key::is_valid_key;
pub use store::JsonFileCache;

// == Public Constants ==
/// Backing file name used when none is given
pub const DEFAULT_FILENAME: &str = "filesystem-cache.json";

/// Lifetime in seconds recorded for entries stored without an explicit one
pub const DEFAULT_LIFETIME: u64 = 3600;

/// Subdirectory of the system temp dir used when no directory is given
pub const DEFAULT_DIRECTORY_NAME: &str = "JsonFileCache";
