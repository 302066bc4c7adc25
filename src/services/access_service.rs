//! Access service - demo code validation and trial record updates.
//!
//! This service ties the allow-list, the trial policy and the record store
//! together. Each operation loads the record file, applies the policy and
//! saves the result when something changed.

use crate::{
    error::AppError,
    models::{
        demo_code::DemoCode,
        trial::{AdminAction, Role, TrialRow, TrialStatus},
    },
    state::AppState,
    store::{lookup, peek},
};

/// Outcome of a successful code validation.
#[derive(Debug, Clone)]
pub struct Access {
    pub role: Role,
    pub trial: TrialRow,
}

impl Access {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_active(&self) -> bool {
        self.trial.status == TrialStatus::Active
    }
}

/// Validate a demo code and register the use.
///
/// # Process
///
/// 1. Normalize and check the code against the allow-list
/// 2. Look up (or create) the trial record
/// 3. Stamp the first use if unset and bump the use counter
/// 4. Save and return the updated trial view
///
/// An expired code is still returned here; callers decide how to refuse it.
///
/// # Errors
///
/// - `InvalidDemoCode`: code is malformed or not on the allow-list
/// - `Store`: the record file could not be written
pub async fn enter(state: &AppState, input: &str) -> Result<Access, AppError> {
    let code = state.codes.validate(input).inspect_err(|_| {
        tracing::warn!("rejected demo code");
    })?;

    let today = state.today();
    let policy = &state.policy;
    let trial = state
        .store
        .update(|trials| {
            let record = lookup(trials, &code);
            policy.register_use(&code, record, today);
            policy.row(&code, record, today)
        })
        .await?;

    let role = if state.codes.is_admin(&code) {
        Role::Admin
    } else {
        Role::Demo
    };

    tracing::info!(
        code = %code.fingerprint(),
        uses = trial.uses,
        status = trial.status.as_str(),
        "demo code accepted"
    );

    Ok(Access { role, trial })
}

/// Check that an already validated code is still within its trial window.
///
/// Does not register a use and does not write the record file.
///
/// # Errors
///
/// - `TrialExpired`: the window has passed
pub async fn require_active(state: &AppState, code: &DemoCode) -> Result<TrialRow, AppError> {
    let trials = state.store.load().await;
    let row = state.policy.row(code, &peek(&trials, code), state.today());

    match row.status {
        TrialStatus::Active => Ok(row),
        TrialStatus::Expired => Err(AppError::TrialExpired {
            first_use: row.first_use,
            trial_days: state.policy.trial_days(),
        }),
    }
}

/// Trial view of every allow-listed code, `demo1..demoN` then the admin code.
///
/// Unknown codes show as never used; nothing is written.
pub async fn trial_table(state: &AppState) -> Vec<TrialRow> {
    let trials = state.store.load().await;
    let today = state.today();

    state
        .codes
        .iter()
        .map(|code| state.policy.row(code, &peek(&trials, code), today))
        .collect()
}

/// Apply an admin action to any well-formed code.
///
/// # Errors
///
/// - `InvalidDemoCode`: code is malformed
/// - `Store`: the record file could not be written
pub async fn apply_admin_action(
    state: &AppState,
    input: &str,
    action: AdminAction,
) -> Result<TrialRow, AppError> {
    let code = DemoCode::parse(input)?;

    let today = state.today();
    let policy = &state.policy;
    let row = state
        .store
        .update(|trials| {
            let record = lookup(trials, &code);
            policy.apply(action, record, today);
            policy.row(&code, record, today)
        })
        .await?;

    tracing::info!(
        code = %code.fingerprint(),
        action = action.as_str(),
        first_use = ?row.first_use,
        "admin action applied"
    );

    Ok(row)
}
