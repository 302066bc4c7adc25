//! Shared application state.
//!
//! A single [`AppState`] is built at startup and cloned into every handler.
//! The record store handle is passed explicitly here instead of living in a
//! global.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    config::Config,
    error::AppError,
    models::demo_code::DemoCodes,
    services::trial_service::{MAX_TRIAL_DAYS, TrialPolicy, local_today},
    store::RecordStore,
};

/// Names shown in the page header.
#[derive(Debug, Clone)]
pub struct Branding {
    pub app_name: String,
    pub slogan: String,
}

/// State shared by all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Trial record file.
    pub store: Arc<RecordStore>,
    /// Allow-listed demo codes.
    pub codes: Arc<DemoCodes>,
    /// Trial window rules.
    pub policy: Arc<TrialPolicy>,
    pub branding: Arc<Branding>,
    /// Source of the current calendar date.
    pub today: fn() -> NaiveDate,
}

impl AppState {
    pub fn new(store: RecordStore, codes: DemoCodes, trial_days: i64, branding: Branding) -> Self {
        let policy = TrialPolicy::for_codes(trial_days, &codes);
        Self {
            store: Arc::new(store),
            codes: Arc::new(codes),
            policy: Arc::new(policy),
            branding: Arc::new(branding),
            today: local_today,
        }
    }

    /// Build the state from configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidDemoCode`: the configured admin code is not a valid code
    /// - `InvalidRequest`: the trial length is outside `1..=MAX_TRIAL_DAYS`
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        if !(1..=MAX_TRIAL_DAYS).contains(&config.trial_days) {
            return Err(AppError::InvalidRequest(format!(
                "TRIAL_DAYS must be between 1 and {MAX_TRIAL_DAYS}"
            )));
        }

        let codes = DemoCodes::new(&config.admin_code, config.demo_code_count)?;
        let branding = Branding {
            app_name: config.app_name.clone(),
            slogan: config.app_slogan.clone(),
        };

        Ok(Self::new(
            RecordStore::new(&config.trials_file),
            codes,
            config.trial_days,
            branding,
        ))
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }
}
