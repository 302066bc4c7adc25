//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON or form body, URL params)
//! 2. Calls the access, trial and content services
//! 3. Returns an HTTP response (JSON, HTML page or file download)

/// Demo code login endpoint
pub mod access;
/// Admin table, actions and export
pub mod admin;
/// Content generator endpoints
pub mod content;
/// Health check endpoint
pub mod health;
/// Browser pages
pub mod pages;
