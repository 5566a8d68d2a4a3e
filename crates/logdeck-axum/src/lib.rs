//! Axum web adapter for logdeck.
//!
//! Exposes the log access engine over HTTP: JSON pages for backward
//! scrolling and Server-Sent Events for live tails.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for integration-only test infrastructure
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sse;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, build_context, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
