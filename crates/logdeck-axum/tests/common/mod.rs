//! Shared fixtures for logdeck-axum integration tests.

pub mod fixtures;
