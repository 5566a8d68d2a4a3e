//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that validate CLI input, call the core log services and
//!   format output for the terminal
//! - Rendering goes through a `Write` so it can be tested without a TTY

pub mod apps;
pub mod page;
pub mod tail;
pub mod web;
