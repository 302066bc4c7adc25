//! Browser page handlers.
//!
//! Form-driven HTML flow on top of the same services as the JSON API:
//! - GET / - Demo code form
//! - POST / - Validate the code; show the generator, the expiry notice or the admin panel
//! - POST /generate - Render generated content for an active code
//! - POST /export - Download generated content as `.txt` for an active code
//! - POST /admin/action - Apply an admin action and re-render the panel
//! - POST /admin/export - Download the record file (admin code)
//!
//! The validated code travels in a hidden form field between pages.

use axum::{
    Form,
    extract::State,
    response::{Html, Response},
};
use serde::Deserialize;

use crate::{
    error::AppError,
    handlers::content::text_attachment,
    models::{
        content::{Category, ContentRequest, Tone},
        demo_code::DemoCode,
        trial::{AdminAction, TrialRow},
    },
    services::{access_service, content_service},
    state::AppState,
    views,
};

/// Demo code form submission.
#[derive(Debug, Deserialize)]
pub struct CodeForm {
    #[serde(default)]
    pub code: String,
}

/// Generator form submission.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub code: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub tone: Tone,
}

impl GenerateForm {
    fn content_request(&self) -> ContentRequest {
        ContentRequest {
            product_name: self.product_name.clone(),
            category: self.category,
            keywords: self.keywords.clone(),
            tone: self.tone,
        }
    }
}

/// Admin action form submission.
#[derive(Debug, Deserialize)]
pub struct AdminActionForm {
    pub code: String,
    pub target: String,
    pub action: AdminAction,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(views::login_page(&state.branding, None))
}

/// Validate the submitted code and render the matching view.
///
/// A valid code always counts as a use, expired or not.
pub async fn enter(
    State(state): State<AppState>,
    Form(form): Form<CodeForm>,
) -> Result<Html<String>, AppError> {
    if form.code.trim().is_empty() {
        return Ok(Html(views::login_page(&state.branding, None)));
    }

    let access = match access_service::enter(&state, &form.code).await {
        Ok(access) => access,
        Err(AppError::InvalidDemoCode) => {
            return Ok(Html(views::login_page(
                &state.branding,
                Some("Invalid demo code. Contact us for a trial code."),
            )));
        }
        Err(err) => return Err(err),
    };

    if access.is_admin() {
        return Ok(Html(admin_view(&state, None).await));
    }

    if !access.is_active() {
        return Ok(Html(views::expired_page(
            &state.branding,
            &access,
            state.policy.trial_days(),
        )));
    }

    Ok(Html(views::generator_page(
        &state.branding,
        &access.trial.code,
        access.trial.remaining_days,
        &ContentRequest::default(),
        None,
        None,
    )))
}

/// Generate sample content from the page form.
///
/// Checks the trial without counting another use.
pub async fn generate(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Html<String>, AppError> {
    let (code, trial) = match active_code(&state, &form.code).await {
        Ok(active) => active,
        Err(AppError::InvalidDemoCode) => {
            return Ok(Html(views::login_page(
                &state.branding,
                Some("Invalid demo code. Contact us for a trial code."),
            )));
        }
        Err(AppError::TrialExpired { .. }) => {
            return Ok(Html(views::login_page(
                &state.branding,
                Some("The trial for this code has expired."),
            )));
        }
        Err(err) => return Err(err),
    };

    let request = form.content_request();

    let html = match content_service::generate(&request) {
        Ok(content) => views::generator_page(
            &state.branding,
            &code,
            trial.remaining_days,
            &request,
            Some(&content),
            None,
        ),
        Err(AppError::InvalidRequest(_)) => views::generator_page(
            &state.branding,
            &code,
            trial.remaining_days,
            &request,
            None,
            Some("Please fill in a product name to create a sample."),
        ),
        Err(err) => return Err(err),
    };

    Ok(Html(html))
}

/// Download the generated description as a `.txt` file.
///
/// Regenerates from the hidden form fields; no use is counted.
pub async fn export_content(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Response, AppError> {
    active_code(&state, &form.code).await?;

    let content = content_service::generate(&form.content_request())?;
    let file_name = content_service::export_file_name(&content.product_name);

    Ok(text_attachment(
        "text/plain; charset=utf-8",
        &file_name,
        content_service::export_text(&content),
    ))
}

/// Apply an admin action submitted from the admin panel.
pub async fn admin_action(
    State(state): State<AppState>,
    Form(form): Form<AdminActionForm>,
) -> Result<Html<String>, AppError> {
    admin_code(&state, &form.code)?;

    let row = access_service::apply_admin_action(&state, &form.target, form.action).await?;
    let first_use = row
        .first_use
        .map(|d| d.to_string())
        .unwrap_or_else(|| "none".to_string());
    let message = match form.action {
        AdminAction::ResetToToday => format!("Code {} was reset: first_use = {first_use}", row.code),
        AdminAction::ForceExpire => {
            format!("Code {} marked as expired (first_use = {first_use})", row.code)
        }
        AdminAction::ClearRecord => format!(
            "Code {} was cleared (the next login counts as a first use)",
            row.code
        ),
    };

    Ok(Html(admin_view(&state, Some(&message)).await))
}

/// Download the record file from the admin panel.
pub async fn export_trials(
    State(state): State<AppState>,
    Form(form): Form<CodeForm>,
) -> Result<Response, AppError> {
    admin_code(&state, &form.code)?;

    let body = state.store.export().await?;
    Ok(text_attachment(
        "application/json; charset=utf-8",
        "trials.json",
        body,
    ))
}

/// Allow-listed code whose trial is still running.
async fn active_code(state: &AppState, input: &str) -> Result<(DemoCode, TrialRow), AppError> {
    let code = state.codes.validate(input)?;
    let trial = access_service::require_active(state, &code).await?;
    Ok((code, trial))
}

fn admin_code(state: &AppState, input: &str) -> Result<DemoCode, AppError> {
    let code = state.codes.validate(input)?;
    if !state.codes.is_admin(&code) {
        return Err(AppError::AdminRequired);
    }
    Ok(code)
}

async fn admin_view(state: &AppState, message: Option<&str>) -> String {
    let rows = access_service::trial_table(state).await;
    views::admin_page(
        &state.branding,
        state.codes.admin_code(),
        &rows,
        state.codes.demo_codes(),
        message,
    )
}
