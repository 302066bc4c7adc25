//! Admin HTTP handlers.
//!
//! This module implements the admin endpoints, reachable only with the admin
//! code:
//! - GET /api/v1/admin/trials - Trial state of every allow-listed code
//! - POST /api/v1/admin/trials/{code} - Reset, force-expire or clear one code
//! - GET /api/v1/admin/export - The record file as `trials.json`

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};

use crate::{
    error::AppError,
    handlers::content::text_attachment,
    models::trial::{AdminActionRequest, TrialRow},
    services::access_service,
    state::AppState,
};

/// List the trial state of every code.
///
/// # Response (200 OK)
///
/// ```json
/// [
///   { "code": "demo1", "first_use": null, "days_passed": null,
///     "remaining_days": 7, "status": "ACTIVE", "uses": 0 },
///   { "code": "test123", "first_use": null, "days_passed": null,
///     "remaining_days": null, "status": "ACTIVE", "uses": 14 }
/// ]
/// ```
pub async fn list_trials(State(state): State<AppState>) -> Json<Vec<TrialRow>> {
    Json(access_service::trial_table(&state).await)
}

/// Apply an admin action to one code.
///
/// # Request Body
///
/// ```json
/// { "action": "reset_to_today" }
/// ```
///
/// Actions: `reset_to_today`, `force_expire`, `clear_record`.
///
/// # Response
///
/// - **Success (200 OK)**: Returns the updated trial row
/// - **Error (401)**: Code in the path is malformed
pub async fn apply_action(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<AdminActionRequest>,
) -> Result<Json<TrialRow>, AppError> {
    let row = access_service::apply_admin_action(&state, &code, request.action).await?;
    Ok(Json(row))
}

/// Download the whole record file.
pub async fn export_trials(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state.store.export().await?;
    Ok(text_attachment(
        "application/json; charset=utf-8",
        "trials.json",
        body,
    ))
}
