//! Query parameters for the log endpoints.
//!
//! Numeric parameters arrive as strings so that a malformed value degrades
//! to an empty page instead of a query rejection.

use serde::Deserialize;

/// How page lines are rendered in the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Lines exactly as stored, escape sequences included.
    Raw,
    /// Lines converted to display markup.
    #[default]
    Markup,
}

/// `?nextKey=&linesPerPage=&format=` on page requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Cursor from the previous page. `cursor` is accepted too.
    #[serde(alias = "cursor")]
    pub next_key: Option<String>,
    #[serde(alias = "linePerRequest", alias = "linesPerRequest")]
    pub lines_per_page: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

impl PageQuery {
    /// The parsed cursor. Missing or non-numeric values start a fresh read
    /// from the end of the file.
    pub fn cursor(&self) -> Option<i64> {
        self.next_key
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
    }

    /// The parsed page size. A non-numeric value becomes `0`, which the
    /// paginator answers with an empty, exhausted page.
    pub fn lines_per_page(&self) -> Option<i64> {
        let raw = self.lines_per_page.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        Some(raw.parse().unwrap_or(0))
    }
}

/// `?path=` plus page parameters on arbitrary-file page requests.
#[derive(Debug, Clone, Deserialize)]
pub struct FilePageQuery {
    pub path: String,
    #[serde(flatten)]
    pub page: PageQuery,
}

/// `?path=` on arbitrary-file stream requests.
#[derive(Debug, Clone, Deserialize)]
pub struct FileStreamQuery {
    pub path: String,
}
