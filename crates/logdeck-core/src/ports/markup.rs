//! Markup conversion port.

/// Converts a raw log line into display-safe markup.
///
/// Implementations must be pure and total: every input yields output and
/// no call has side effects.
#[cfg_attr(test, mockall::automock)]
pub trait MarkupConverter: Send + Sync {
    fn to_markup(&self, line: &str) -> String;
}

/// Returns lines unchanged. Used by terminal output, where the raw escape
/// sequences are what the user wants to see.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughMarkup;

impl MarkupConverter for PassthroughMarkup {
    fn to_markup(&self, line: &str) -> String {
        line.to_string()
    }
}
