//! Demo code authentication middleware.
//!
//! This middleware intercepts every protected API request to:
//! 1. Extract the demo code from the Authorization header
//! 2. Check it against the allow-list
//! 3. Inject the validated code into the request
//! 4. Reject unknown codes with HTTP 401

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, models::demo_code::DemoCode, state::AppState};

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; handlers extract it with
/// `Extension<DemoContext>`.
#[derive(Debug, Clone)]
pub struct DemoContext {
    /// The validated, normalized code
    pub code: DemoCode,

    /// Whether the code is the admin code
    pub is_admin: bool,
}

/// Demo code authentication middleware function.
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer demo7
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if the code is on the allow-list (calls next handler)
/// - `Err(AppError::InvalidDemoCode)` otherwise (returns 401)
pub async fn demo_code_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidDemoCode)?;

    let raw_code = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidDemoCode)?;

    let code = state.codes.validate(raw_code)?;
    let context = DemoContext {
        is_admin: state.codes.is_admin(&code),
        code,
    };

    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

/// Admin gate, layered after [`demo_code_middleware`].
///
/// Rejects any validated code other than the admin code with HTTP 403.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let is_admin = request
        .extensions()
        .get::<DemoContext>()
        .is_some_and(|context| context.is_admin);

    if !is_admin {
        tracing::warn!("admin route refused");
        return Err(AppError::AdminRequired);
    }

    Ok(next.run(request).await)
}
