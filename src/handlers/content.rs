//! Content generation HTTP handlers.
//!
//! This module implements the generator endpoints:
//! - POST /api/v1/content/generate - Sample title, description and hashtags
//! - POST /api/v1/content/export - The same content as a text download
//!
//! Both require a demo code whose trial is still active.

use axum::{
    Extension, Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    error::AppError,
    middleware::auth::DemoContext,
    models::content::{ContentRequest, GeneratedContent},
    services::{access_service, content_service},
    state::AppState,
};

/// Generate sample content for a product.
///
/// # Request Body
///
/// ```json
/// {
///   "product_name": "Linen Shirt",
///   "category": "clothing",
///   "keywords": "cotton, durable",
///   "tone": "friendly"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the generated content
/// - **Error (400)**: Product name is blank
/// - **Error (403)**: Trial window has passed
pub async fn generate(
    State(state): State<AppState>,
    Extension(demo): Extension<DemoContext>,
    Json(request): Json<ContentRequest>,
) -> Result<Json<GeneratedContent>, AppError> {
    access_service::require_active(&state, &demo.code).await?;

    let content = content_service::generate(&request)?;
    tracing::debug!(code = %demo.code.fingerprint(), id = %content.id, "content generated");

    Ok(Json(content))
}

/// Generate sample content and return it as a `.txt` attachment.
pub async fn export(
    State(state): State<AppState>,
    Extension(demo): Extension<DemoContext>,
    Json(request): Json<ContentRequest>,
) -> Result<Response, AppError> {
    access_service::require_active(&state, &demo.code).await?;

    let content = content_service::generate(&request)?;
    let file_name = content_service::export_file_name(&content.product_name);

    Ok(text_attachment(
        "text/plain; charset=utf-8",
        &file_name,
        content_service::export_text(&content),
    ))
}

/// Body served as a file download.
pub fn text_attachment(content_type: &'static str, file_name: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}
