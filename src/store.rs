//! Flat-file trial record store.
//!
//! This module provides:
//! - Loading and saving the code → trial record mapping as a JSON file
//! - A serialized read-modify-write helper used by every mutation
//!
//! The file is read on every request and rewritten after every mutation.
//! There is no cross-process locking; the last writer wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::{fs, sync::Mutex};

use crate::models::{
    demo_code::DemoCode,
    trial::{TrialMap, TrialRecord},
};

/// Failure while persisting the record file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Handle to the trial record file.
///
/// Shared by all handlers through the application state. Mutations made via
/// [`RecordStore::update`] are serialized within this process.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every trial record.
    ///
    /// Never fails: a missing file yields an empty mapping, and so does an
    /// unreadable one. In the latter case the file is copied to
    /// `<file>.corrupt` first so the next save does not erase it.
    pub async fn load(&self) -> TrialMap {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return TrialMap::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cannot read trial store, starting empty");
                self.set_aside().await;
                return TrialMap::new();
            }
        };

        match serde_json::from_str(&text) {
            Ok(trials) => trials,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cannot parse trial store, starting empty");
                self.set_aside().await;
                TrialMap::new()
            }
        }
    }

    /// Write every trial record, replacing the file contents.
    ///
    /// The new contents go to a sibling temp file that is then renamed over
    /// the record file, so readers see either the old or the new mapping.
    pub async fn save(&self, trials: &TrialMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let text = serde_json::to_string_pretty(trials)?;
        let tmp = self.sibling_path("tmp");
        fs::write(&tmp, text).await?;
        fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), records = trials.len(), "trial store saved");

        Ok(())
    }

    /// Load, mutate and save in one step.
    ///
    /// The closure's return value is passed through. Concurrent calls on the
    /// same handle run one after another.
    pub async fn update<F, T>(&self, mutate: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut TrialMap) -> T,
    {
        let _guard = self.write_lock.lock().await;

        let mut trials = self.load().await;
        let output = mutate(&mut trials);
        self.save(&trials).await?;

        Ok(output)
    }

    /// The whole mapping as pretty-printed JSON, for the admin download.
    pub async fn export(&self) -> Result<String, StoreError> {
        let trials = self.load().await;
        Ok(serde_json::to_string_pretty(&trials)?)
    }

    /// Path the unreadable file is copied to.
    pub fn corrupt_path(&self) -> PathBuf {
        self.sibling_path("corrupt")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Keep the first unreadable copy; later loads of the same file leave it alone.
    async fn set_aside(&self) {
        let backup = self.corrupt_path();
        if fs::try_exists(&backup).await.unwrap_or(false) {
            return;
        }
        if let Err(err) = fs::copy(&self.path, &backup).await {
            tracing::warn!(path = %backup.display(), error = %err, "cannot keep a copy of the unreadable trial store");
        }
    }
}

/// The record for `code`, inserting the never-used default when missing.
pub fn lookup<'a>(trials: &'a mut TrialMap, code: &DemoCode) -> &'a mut TrialRecord {
    trials.entry(code.as_str().to_string()).or_default()
}

/// Read-only variant of [`lookup`] that leaves the mapping untouched.
pub fn peek(trials: &TrialMap, code: &DemoCode) -> TrialRecord {
    trials.get(code.as_str()).cloned().unwrap_or_default()
}
