//! Business logic services.
//!
//! Services contain the core logic separated from HTTP handlers:
//! trial window bookkeeping and sample content generation.

pub mod access_service;
pub mod content_service;
pub mod trial_service;
