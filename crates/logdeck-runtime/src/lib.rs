//! OS-level adapters for the logdeck core ports.
#![deny(unsafe_code)]

pub mod ports_impl;

// Re-export port implementations for the HTTP and CLI adapters
pub use ports_impl::NotifyChangeWatcher;
