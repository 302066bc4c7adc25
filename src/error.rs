//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde_json::json;

use crate::store::StoreError;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Store Errors**: The trial record file could not be written
/// - **Access Errors**: Unknown demo code, expired trial, admin-only route
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Writing the trial record file failed.
    ///
    /// Reads never fail: an unreadable file is treated as empty.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The demo code is malformed or not on the allow-list.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid demo code")]
    InvalidDemoCode,

    /// The code is valid but its trial window has passed.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("The {trial_days}-day trial for this code has expired")]
    TrialExpired {
        first_use: Option<NaiveDate>,
        trial_days: i64,
    },

    /// A non-admin code was used on an admin route.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Admin code required")]
    AdminRequired,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidDemoCode` → 401 Unauthorized
/// - `TrialExpired` → 403 Forbidden (adds `first_use` to the body)
/// - `AdminRequired` → 403 Forbidden
/// - `InvalidRequest` → 400 Bad Request
/// - `Store` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidDemoCode => (
                StatusCode::UNAUTHORIZED,
                "invalid_demo_code",
                self.to_string(),
            ),
            AppError::TrialExpired { first_use, .. } => {
                let body = Json(json!({
                    "error": {
                        "code": "trial_expired",
                        "message": self.to_string(),
                        "first_use": first_use,
                    }
                }));
                return (StatusCode::FORBIDDEN, body).into_response();
            }
            AppError::AdminRequired => (StatusCode::FORBIDDEN, "admin_required", self.to_string()),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Store(ref err) => {
                tracing::error!(error = %err, "trial store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
