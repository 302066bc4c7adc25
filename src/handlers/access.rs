//! Demo code access HTTP handler.
//!
//! This module implements the login endpoint:
//! - POST /api/v1/access - Validate a demo code and register the use

use axum::{Json, extract::State};

use crate::{
    error::AppError,
    models::trial::{AccessRequest, AccessResponse},
    services::access_service,
    state::AppState,
};

/// Validate a demo code.
///
/// # Endpoint
///
/// `POST /api/v1/access`
///
/// # Request Body
///
/// ```json
/// { "code": "demo7" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the code's role and trial state
/// - **Error (401)**: Code is not on the allow-list
/// - **Error (403)**: Trial window has passed
///
/// ```json
/// {
///   "role": "demo",
///   "code": "demo7",
///   "first_use": "2025-06-10",
///   "days_passed": 2,
///   "remaining_days": 5,
///   "status": "ACTIVE",
///   "uses": 3
/// }
/// ```
///
/// Every accepted call counts as a use, including calls that end in 403.
pub async fn access(
    State(state): State<AppState>,
    Json(request): Json<AccessRequest>,
) -> Result<Json<AccessResponse>, AppError> {
    let access = access_service::enter(&state, &request.code).await?;

    if !access.is_active() {
        return Err(AppError::TrialExpired {
            first_use: access.trial.first_use,
            trial_days: state.policy.trial_days(),
        });
    }

    Ok(Json(AccessResponse {
        role: access.role,
        trial: access.trial,
    }))
}
