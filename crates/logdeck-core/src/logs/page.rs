//! Page and cursor types returned by the reverse paginator.

use serde::{Deserialize, Serialize};

/// Cursor value meaning "nothing older is left".
///
/// Any cursor `<= 0` is treated as exhausted; this is the one the engine
/// produces itself.
pub const EXHAUSTED_CURSOR: i64 = 0;

/// One backward page of a log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    /// Lines in file order (oldest first).
    pub lines: Vec<String>,
    /// Cursor to pass back for the next older page.
    pub next_cursor: i64,
    /// Effective page size used for this read.
    pub lines_per_page: usize,
}

impl LogPage {
    /// An empty page carrying the exhausted sentinel.
    #[must_use]
    pub const fn exhausted(lines_per_page: usize) -> Self {
        Self {
            lines: Vec::new(),
            next_cursor: EXHAUSTED_CURSOR,
            lines_per_page,
        }
    }

    /// True when no older content can be requested.
    pub const fn is_exhausted(&self) -> bool {
        self.next_cursor <= 0
    }

    /// Apply `convert` to every line, keeping cursor and size.
    #[must_use]
    pub fn map_lines(self, convert: impl Fn(&str) -> String) -> Self {
        Self {
            lines: self.lines.iter().map(|l| convert(l)).collect(),
            ..self
        }
    }
}

pub(crate) fn to_cursor(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_serializes_camel_case() {
        let page = LogPage {
            lines: vec!["a".to_string()],
            next_cursor: 42,
            lines_per_page: 10,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["nextCursor"], 42);
        assert_eq!(json["linesPerPage"], 10);
        assert_eq!(json["lines"][0], "a");
    }

    #[test]
    fn test_exhausted_page() {
        let page = LogPage::exhausted(100);
        assert!(page.is_exhausted());
        assert!(page.lines.is_empty());
        assert_eq!(page.lines_per_page, 100);
    }
}
