//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

use crate::services::trial_service::DEFAULT_TRIAL_DAYS;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `TRIALS_FILE` (optional): path of the trial record file, defaults to `trials.json`
/// - `TRIAL_DAYS` (optional): length of the trial window in days, defaults to 7
/// - `ADMIN_CODE` (optional): the exempt admin code, defaults to `test123`
/// - `DEMO_CODE_COUNT` (optional): how many `demoN` codes are issued, defaults to 50
/// - `APP_NAME` / `APP_SLOGAN` (optional): branding shown on the HTML pages
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_trials_file")]
    pub trials_file: String,

    #[serde(default = "default_trial_days")]
    pub trial_days: i64,

    #[serde(default = "default_admin_code")]
    pub admin_code: String,

    #[serde(default = "default_demo_code_count")]
    pub demo_code_count: u32,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_app_slogan")]
    pub app_slogan: String,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_trials_file() -> String {
    "trials.json".to_string()
}

fn default_trial_days() -> i64 {
    DEFAULT_TRIAL_DAYS
}

fn default_admin_code() -> String {
    "test123".to_string()
}

fn default_demo_code_count() -> u32 {
    50
}

fn default_app_name() -> String {
    "IntellimaKG".to_string()
}

fn default_app_slogan() -> String {
    "Empower your business intelligence".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values cannot be parsed into
    /// expected types (e.g. a non-numeric `TRIAL_DAYS`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: trials_file -> TRIALS_FILE
        envy::from_env::<Config>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_variables_are_absent() {
        let vars: Vec<(String, String)> = Vec::new();
        let config = envy::from_iter::<_, Config>(vars).unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.trials_file, "trials.json");
        assert_eq!(config.trial_days, 7);
        assert_eq!(config.admin_code, "test123");
        assert_eq!(config.demo_code_count, 50);
    }

    #[test]
    fn variables_override_defaults() {
        let vars = vec![
            ("TRIAL_DAYS".to_string(), "14".to_string()),
            ("ADMIN_CODE".to_string(), "boss".to_string()),
            ("TRIALS_FILE".to_string(), "/var/lib/demo/trials.json".to_string()),
        ];
        let config = envy::from_iter::<_, Config>(vars).unwrap();

        assert_eq!(config.trial_days, 14);
        assert_eq!(config.admin_code, "boss");
        assert_eq!(config.trials_file, "/var/lib/demo/trials.json");
    }
}
