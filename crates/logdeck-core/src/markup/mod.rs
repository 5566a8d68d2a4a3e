//! Concrete [`MarkupConverter`](crate::ports::MarkupConverter) implementations.

mod ansi;

pub use ansi::AnsiHtmlConverter;
