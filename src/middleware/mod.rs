//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Authenticate requests by demo code
//! - Short-circuit requests (reject unknown or non-admin codes)

/// Demo code authentication middleware
pub mod auth;
