//! API Handlers
//!
//! HTTP request handlers for each clipboard endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::keygen::generate_unique_key;
use crate::models::{GetResponse, SaveRequest, SaveResponse};
use crate::store::KvStore;

/// Lifetime of every saved entry
pub const DEFAULT_ENTRY_TTL: Duration = Duration::from_secs(10 * 60);

/// Application state shared across all handlers.
///
/// The store handle is created once at startup and shared by every
/// request; the store itself is responsible for concurrent access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    /// TTL applied to every saved entry
    pub entry_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState over the given store with the default TTL.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            entry_ttl: DEFAULT_ENTRY_TTL,
        }
    }

    /// Overrides the entry TTL.
    pub fn with_ttl(mut self, entry_ttl: Duration) -> Self {
        self.entry_ttl = entry_ttl;
        self
    }
}

/// Handler for POST /save
///
/// Stores the trimmed value under a new key.
pub async fn save_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected save body");
        ApiError::InvalidRequest("Invalid request".to_string())
    })?;

    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }
    let value = req.trimmed();

    // The existence check alone leaves a window for a concurrent save to
    // claim the same key; the NX write closes it.
    let key = loop {
        let key = generate_unique_key(state.store.as_ref())
            .await
            .map_err(ApiError::KeyGeneration)?;

        let claimed = state
            .store
            .set_nx_ex(&key, value, state.entry_ttl)
            .await
            .map_err(ApiError::SaveFailed)?;
        if claimed {
            break key;
        }
        warn!(key = %key, "key claimed by a concurrent save, regenerating");
    };

    debug!(key = %key, bytes = value.len(), "saved entry");
    Ok(Json(SaveResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value by key. Expired keys are reported like unknown ones.
pub async fn get_handler(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<GetResponse>> {
    let Path(key) = path.map_err(|rejection| {
        debug!(%rejection, "rejected key path");
        ApiError::InvalidRequest("Invalid request".to_string())
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ApiError::InvalidRequest("Key cannot be empty".to_string()));
    }

    match state.store.get(key).await.map_err(ApiError::Store)? {
        Some(data) => Ok(Json(GetResponse::new(data))),
        None => Err(ApiError::NotFound),
    }
}
