//! Trial policy - Core bookkeeping for demo trial windows.
//!
//! This service handles:
//! - Elapsed-day computation from the first recorded use
//! - Active/expired determination and remaining days
//! - Registering a use (first-use stamping, use counting)
//! - Admin actions (reset, force-expire, clear)
//!
//! Every function takes `today` explicitly; callers pass the local calendar
//! date. The admin code is exempt from expiry.

use chrono::{Days, Local, NaiveDate};

use crate::models::{
    demo_code::{DemoCode, DemoCodes},
    trial::{AdminAction, TrialRecord, TrialRow, TrialStatus},
};

/// Length of the trial window when not configured otherwise.
pub const DEFAULT_TRIAL_DAYS: i64 = 7;

/// Longest accepted trial window, about a hundred years.
pub const MAX_TRIAL_DAYS: i64 = 36_500;

/// The local calendar date.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Trial window rules for a set of demo codes.
#[derive(Debug, Clone)]
pub struct TrialPolicy {
    trial_days: i64,
    exempt_code: DemoCode,
}

impl TrialPolicy {
    /// `trial_days` is clamped to `1..=MAX_TRIAL_DAYS`.
    pub fn new(trial_days: i64, exempt_code: DemoCode) -> Self {
        Self {
            trial_days: trial_days.clamp(1, MAX_TRIAL_DAYS),
            exempt_code,
        }
    }

    /// Policy whose exempt code is the allow-list's admin code.
    pub fn for_codes(trial_days: i64, codes: &DemoCodes) -> Self {
        Self::new(trial_days, codes.admin_code().clone())
    }

    pub fn trial_days(&self) -> i64 {
        self.trial_days
    }

    pub fn is_exempt(&self, code: &DemoCode) -> bool {
        *code == self.exempt_code
    }

    /// Calendar days since the first use, `None` if never used.
    pub fn days_since_first_use(&self, record: &TrialRecord, today: NaiveDate) -> Option<i64> {
        record
            .first_use
            .map(|first_use| (today - first_use).num_days())
    }

    /// Whether `code` may still use the demo.
    ///
    /// A never-used code is active: its first login starts the window.
    pub fn is_active(&self, code: &DemoCode, record: &TrialRecord, today: NaiveDate) -> bool {
        if self.is_exempt(code) {
            return true;
        }

        match self.days_since_first_use(record, today) {
            None => true,
            Some(days) => days < self.trial_days,
        }
    }

    /// Days left in the window, `None` (unlimited) for the exempt code.
    ///
    /// Never negative.
    pub fn remaining_days(
        &self,
        code: &DemoCode,
        record: &TrialRecord,
        today: NaiveDate,
    ) -> Option<i64> {
        if self.is_exempt(code) {
            return None;
        }

        let elapsed = self.days_since_first_use(record, today).unwrap_or(0);
        Some((self.trial_days - elapsed).max(0))
    }

    pub fn status(&self, code: &DemoCode, record: &TrialRecord, today: NaiveDate) -> TrialStatus {
        if self.is_active(code, record, today) {
            TrialStatus::Active
        } else {
            TrialStatus::Expired
        }
    }

    /// Record a successful validation.
    ///
    /// Stamps `first_use` with `today` only if it is unset, and always bumps
    /// `uses`. The exempt code never gets a first use.
    pub fn register_use(&self, code: &DemoCode, record: &mut TrialRecord, today: NaiveDate) {
        if record.first_use.is_none() && !self.is_exempt(code) {
            record.first_use = Some(today);
        }
        record.uses = record.uses.saturating_add(1);
    }

    /// Apply an admin action to a record.
    pub fn apply(&self, action: AdminAction, record: &mut TrialRecord, today: NaiveDate) {
        match action {
            AdminAction::ResetToToday => record.first_use = Some(today),
            AdminAction::ForceExpire => record.first_use = Some(self.expired_first_use(today)),
            AdminAction::ClearRecord => *record = TrialRecord::default(),
        }
    }

    /// A first-use date whose window closed a day before `today`.
    pub fn expired_first_use(&self, today: NaiveDate) -> NaiveDate {
        let days = Days::new(self.trial_days.unsigned_abs() + 1);
        today.checked_sub_days(days).unwrap_or(NaiveDate::MIN)
    }

    /// Computed view of one code's trial state.
    pub fn row(&self, code: &DemoCode, record: &TrialRecord, today: NaiveDate) -> TrialRow {
        TrialRow {
            code: code.clone(),
            first_use: record.first_use,
            days_passed: self.days_since_first_use(record, today),
            remaining_days: self.remaining_days(code, record, today),
            status: self.status(code, record, today),
            uses: record.uses,
        }
    }
}
