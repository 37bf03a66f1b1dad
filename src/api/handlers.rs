//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use parking_lot::RwLock;
use serde_json::Value;

use crate::cache::JsonFileCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteMultipleRequest, GetMultipleRequest, GetMultipleResponse, GetResponse, HasResponse,
    HealthResponse, InfoResponse, PersistResponse, SetMultipleRequest, SetRequest, TouchRequest,
    WriteResponse,
};

/// Application state shared across all handlers.
///
/// Contains the cache wrapped in Arc<RwLock<>> so one server owns one
/// in-memory mirror of the backing file. Store calls run on the blocking
/// pool because every mutation rewrites and fsyncs the file.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<JsonFileCache>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: JsonFileCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Opens the cache described by the Config.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(JsonFileCache::from_config(config)?))
    }

    /// Runs `f` under the read lock on the blocking pool.
    pub async fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&JsonFileCache) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let cache = Arc::clone(&self.cache);
        tokio::task::spawn_blocking(move || f(&cache.read()))
            .await
            .map_err(|e| CacheError::Internal(format!("Cache task failed: {e}")))?
    }

    /// Runs `f` under the write lock on the blocking pool.
    pub async fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut JsonFileCache) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let cache = Arc::clone(&self.cache);
        tokio::task::spawn_blocking(move || f(&mut cache.write()))
            .await
            .map_err(|e| CacheError::Internal(format!("Cache task failed: {e}")))?
    }
}

/// Handler for PUT /set
///
/// Stores any JSON value under a key with an optional lifetime.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<WriteResponse>> {
    let SetRequest { key, value, ttl } = req;
    let persisted = {
        let key = key.clone();
        state.write(move |cache| cache.set(&key, value, ttl)).await?
    };

    Ok(Json(WriteResponse::new(key, persisted)))
}

/// Handler for GET /get/:key
///
/// Absent keys report a `null` value.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = {
        let key = key.clone();
        state.read(move |cache| cache.get(&key, Value::Null)).await?
    };

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    let exists = {
        let key = key.clone();
        state.read(move |cache| cache.has(&key)).await?
    };

    Ok(Json(HasResponse::new(key, exists)))
}

/// Handler for POST /touch/:key
///
/// The body is optional; without one the default lifetime applies.
pub async fn touch_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Option<Json<TouchRequest>>,
) -> Result<Json<WriteResponse>> {
    let ttl = body.and_then(|Json(req)| req.ttl);
    let persisted = {
        let key = key.clone();
        state.write(move |cache| cache.touch(&key, ttl)).await?
    };

    Ok(Json(WriteResponse::new(key, persisted)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<WriteResponse>> {
    let persisted = {
        let key = key.clone();
        state.write(move |cache| cache.delete(&key)).await?
    };

    Ok(Json(WriteResponse::new(key, persisted)))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<PersistResponse>> {
    let persisted = state.write(|cache| Ok(cache.clear())).await?;

    Ok(Json(PersistResponse { persisted }))
}

/// Handler for POST /get_multiple
pub async fn get_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<GetMultipleRequest>,
) -> Result<Json<GetMultipleResponse>> {
    let values = state
        .read(move |cache| cache.get_multiple(&req.keys, req.default))
        .await?;

    Ok(Json(GetMultipleResponse { values }))
}

/// Handler for PUT /set_multiple
pub async fn set_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<SetMultipleRequest>,
) -> Result<Json<PersistResponse>> {
    let persisted = state
        .write(move |cache| cache.set_multiple(req.values, req.ttl))
        .await?;

    Ok(Json(PersistResponse { persisted }))
}

/// Handler for POST /del_multiple
pub async fn delete_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<DeleteMultipleRequest>,
) -> Result<Json<PersistResponse>> {
    let persisted = state
        .write(move |cache| cache.delete_multiple(&req.keys))
        .await?;

    Ok(Json(PersistResponse { persisted }))
}

/// Handler for GET /info
pub async fn info_handler(State(state): State<AppState>) -> Result<Json<InfoResponse>> {
    let info = state
        .read(|cache| {
            Ok(InfoResponse {
                path: cache.path().display().to_string(),
                total_entries: cache.len(),
            })
        })
        .await?;

    Ok(Json(info))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
