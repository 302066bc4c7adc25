//! Data models for trial records, demo codes and generated content.
//!
//! This module contains the data structures persisted in the record file and
//! exchanged over the HTTP API.

/// Generated product content model
pub mod content;
/// Demo code and allow-list model
pub mod demo_code;
/// Trial record model
pub mod trial;
