//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.
//!
//! Cache calls block on the instance lock and on the snapshot write, so they
//! run on tokio's blocking pool rather than on the async workers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, FlushResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// Cache of arbitrary JSON values keyed by string, as served over HTTP.
pub type JsonCache = Cache<String, Value>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe durable cache
    pub cache: Arc<JsonCache>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: JsonCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Opens the durable cache described by the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Cache::open(config)?))
    }

    /// Runs a cache operation on the blocking pool.
    async fn with_cache<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&JsonCache) -> T + Send + 'static,
        T: Send + 'static,
    {
        let cache = Arc::clone(&self.cache);
        tokio::task::spawn_blocking(move || op(&cache))
            .await
            .map_err(|e| CacheError::Internal(format!("cache task failed: {}", e)))
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value, with the request TTL or the configured one.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req
        .ttl
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .map_err(|e| CacheError::InvalidRequest(format!("Invalid TTL: {}", e)))
        })
        .transpose()?;

    let key = req.key.clone();
    state
        .with_cache(move |cache| match ttl {
            Some(ttl) => cache.put_with_ttl(req.key, req.value, ttl),
            None => cache.put(req.key, req.value),
        })
        .await?;

    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// A read refreshes recency and may drop an expired entry, so it goes through
/// the same exclusive path as writes.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let lookup = key.clone();
    let value = state
        .with_cache(move |cache| cache.get(&lookup))
        .await?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let target = key.clone();
    state
        .with_cache(move |cache| cache.remove(&target))
        .await?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /flush
///
/// Forces a snapshot write.
pub async fn flush_handler(State(state): State<AppState>) -> Result<Json<FlushResponse>> {
    let (persisted, entries) = state
        .with_cache(|cache| (cache.flush(), cache.len()))
        .await?;

    Ok(Json(FlushResponse { persisted, entries }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.with_cache(|cache| cache.stats()).await?;
    Ok(Json(StatsResponse::from(stats)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::new(Cache::in_memory(100, Duration::from_secs(300)))
    }

    fn set_request(key: &str, value: Value, ttl: Option<f64>) -> SetRequest {
        SetRequest {
            key: key.to_string(),
            value,
            ttl,
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = set_request("test_key", json!({"a": [1, 2, 3]}), None);
        assert!(set_handler(State(state.clone()), Json(req)).await.is_ok());

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"a": [1, 2, 3]}));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(test_state()), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_with_short_ttl_expires() {
        let state = test_state();

        let req = set_request("short", json!(1), Some(0.1));
        set_handler(State(state.clone()), Json(req)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        let result = get_handler(State(state.clone()), Path("short".to_string())).await;
        assert!(result.is_err());
        assert_eq!(stats_handler(State(state)).await.unwrap().expirations, 1);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();

        let req = set_request("to_delete", json!("value"), None);
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());

        let result = delete_handler(State(state), Path("to_delete".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_flush_handler_in_memory() {
        let response = flush_handler(State(test_state())).await.unwrap();
        assert!(response.persisted);
        assert_eq!(response.entries, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let req = set_request("", json!("value"), None);
        let result = set_handler(State(test_state()), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
