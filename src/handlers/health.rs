//! Health check endpoint for service monitoring.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
///
/// Returns service status and the state of the trial record file.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// `present` once the record file has been written, `missing` before
    pub store: String,

    /// Number of codes with a stored record
    pub records: usize,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "store": "present",
///   "records": 12,
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// The record file is read but never written; a missing file is healthy.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = if tokio::fs::try_exists(state.store.path())
        .await
        .unwrap_or(false)
    {
        "present"
    } else {
        "missing"
    };
    let records = state.store.load().await.len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        store: store.to_string(),
        records,
        timestamp: Utc::now(),
    })
}
