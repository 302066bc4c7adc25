//! Demo code model and the allow-list of issued codes.
//!
//! Demo codes are short case-insensitive strings. They are always handled in
//! their normalized form (trimmed, lowercase), which is also the key used in
//! the trial record file.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Longest accepted demo code, after trimming.
const MAX_CODE_LEN: usize = 64;

/// A normalized demo code.
///
/// Construct with [`DemoCode::parse`]; the inner string is guaranteed to be
/// non-empty, lowercase ASCII alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DemoCode(String);

impl DemoCode {
    /// Normalize user input into a demo code.
    ///
    /// Surrounding whitespace is dropped and the code is lowercased, so
    /// `" Demo7 "` and `"demo7"` are the same code.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let code = input.trim().to_lowercase();

        if code.is_empty() || code.len() > MAX_CODE_LEN {
            return Err(AppError::InvalidDemoCode);
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::InvalidDemoCode);
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 fingerprint of the code, safe to write to logs.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let digest = hex::encode(hasher.finalize());
        digest[..12].to_string()
    }
}

impl fmt::Display for DemoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DemoCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DemoCode> for String {
    fn from(code: DemoCode) -> Self {
        code.0
    }
}

/// The fixed allow-list of demo codes.
///
/// Contains `demo1..demoN` plus the admin code. The admin code is exempt from
/// trial expiry and unlocks the admin views.
#[derive(Debug, Clone)]
pub struct DemoCodes {
    demo_codes: Vec<DemoCode>,
    admin_code: DemoCode,
}

impl DemoCodes {
    /// Build the allow-list from the admin code and the number of `demoN` codes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDemoCode` if the configured admin code is not a valid code.
    pub fn new(admin_code: &str, demo_code_count: u32) -> Result<Self, AppError> {
        let admin_code = DemoCode::parse(admin_code)?;
        let demo_codes = (1..=demo_code_count)
            .map(|i| DemoCode(format!("demo{i}")))
            .collect();

        Ok(Self {
            demo_codes,
            admin_code,
        })
    }

    pub fn admin_code(&self) -> &DemoCode {
        &self.admin_code
    }

    pub fn is_admin(&self, code: &DemoCode) -> bool {
        *code == self.admin_code
    }

    pub fn contains(&self, code: &DemoCode) -> bool {
        self.is_admin(code) || self.demo_codes.contains(code)
    }

    /// Normalize `input` and check it against the allow-list.
    pub fn validate(&self, input: &str) -> Result<DemoCode, AppError> {
        let code = DemoCode::parse(input)?;
        if self.contains(&code) {
            Ok(code)
        } else {
            Err(AppError::InvalidDemoCode)
        }
    }

    /// The issued `demoN` codes, in order.
    pub fn demo_codes(&self) -> &[DemoCode] {
        &self.demo_codes
    }

    /// Every allow-listed code: `demo1..demoN`, then the admin code.
    pub fn iter(&self) -> impl Iterator<Item = &DemoCode> {
        self.demo_codes
            .iter()
            .chain(std::iter::once(&self.admin_code))
    }
}
