//! Trial record data models and API request/response types.
//!
//! This module defines:
//! - `TrialRecord`: the persisted per-code trial state
//! - `TrialRow`: the computed view of a record shown to users and admins
//! - Request/response types for the access and admin endpoints

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::demo_code::DemoCode;

/// Trial records keyed by normalized demo code.
///
/// A `BTreeMap` keeps the file output stable between saves.
pub type TrialMap = BTreeMap<String, TrialRecord>;

/// Represents a trial record from the record file.
///
/// # File Format
///
/// ```json
/// {
///   "demo7": { "first_use": "2025-06-01", "uses": 4 },
///   "demo8": { "first_use": null, "uses": 0 }
/// }
/// ```
///
/// The default value is the never-used record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Calendar date of the first successful validation.
    ///
    /// `None` means the code has never been used. Once set, only admin
    /// actions overwrite it.
    #[serde(default, deserialize_with = "lenient_date")]
    pub first_use: Option<NaiveDate>,

    /// Number of successful validations.
    #[serde(default)]
    pub uses: u64,
}

/// Decode `first_use` the forgiving way: anything that is not an ISO date
/// (or an ISO date-time, whose date part is kept) reads as "never used".
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(parse_iso_date))
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Whether a code may still use the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrialStatus {
    Active,
    Expired,
}

impl TrialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialStatus::Active => "ACTIVE",
            TrialStatus::Expired => "EXPIRED",
        }
    }
}

/// Computed trial state of one code, as shown in the admin table.
///
/// # JSON Example
///
/// ```json
/// {
///   "code": "demo7",
///   "first_use": "2025-06-01",
///   "days_passed": 3,
///   "remaining_days": 4,
///   "status": "ACTIVE",
///   "uses": 4
/// }
/// ```
///
/// `remaining_days` is `null` for the exempt admin code (unlimited).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialRow {
    pub code: DemoCode,
    pub first_use: Option<NaiveDate>,
    pub days_passed: Option<i64>,
    pub remaining_days: Option<i64>,
    pub status: TrialStatus,
    pub uses: u64,
}

/// Administrative action applied to a single code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    /// Restart the trial window today.
    ResetToToday,
    /// Move the first use far enough back that the trial is over.
    ForceExpire,
    /// Forget the code entirely; the next login counts as a first use.
    ClearRecord,
}

impl AdminAction {
    pub const ALL: [AdminAction; 3] = [
        AdminAction::ResetToToday,
        AdminAction::ForceExpire,
        AdminAction::ClearRecord,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::ResetToToday => "reset_to_today",
            AdminAction::ForceExpire => "force_expire",
            AdminAction::ClearRecord => "clear_record",
        }
    }
}

/// Who a validated code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Demo,
}

/// Request body for `POST /api/v1/access`.
///
/// ```json
/// { "code": "demo7" }
/// ```
#[derive(Debug, Deserialize)]
pub struct AccessRequest {
    pub code: String,
}

/// Response body for a successful access check.
#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub role: Role,

    #[serde(flatten)]
    pub trial: TrialRow,
}

/// Request body for `POST /api/v1/admin/trials/{code}`.
///
/// ```json
/// { "action": "force_expire" }
/// ```
#[derive(Debug, Deserialize)]
pub struct AdminActionRequest {
    pub action: AdminAction,
}
