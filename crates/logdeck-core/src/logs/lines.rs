//! Line splitting over raw byte windows.
//!
//! Byte accounting is done on the raw bytes, never on decoded text, so
//! cursors stay exact even when a file contains invalid UTF-8.

/// One line inside a byte window, without its trailing `\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawLine<'a> {
    bytes: &'a [u8],
    terminated: bool,
}

impl RawLine<'_> {
    /// Bytes this line occupies in the file, newline included.
    pub(crate) fn span(&self) -> u64 {
        self.bytes.len() as u64 + u64::from(self.terminated)
    }

    pub(crate) const fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Lossy UTF-8 text with a trailing `\r` removed.
    pub(crate) fn to_text(&self) -> String {
        let bytes = self.bytes.strip_suffix(b"\r").unwrap_or(self.bytes);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Split `buf` into lines.
///
/// With `skip_leading_partial`, everything up to and including the first
/// `\n` is discarded because the window may have started mid-line. Callers
/// that want to keep a line starting exactly at the window boundary read one
/// look-behind byte so that the discarded prefix is just that `\n`.
pub(crate) fn split_lines(buf: &[u8], skip_leading_partial: bool) -> Vec<RawLine<'_>> {
    let body = if skip_leading_partial {
        match buf.iter().position(|&b| b == b'\n') {
            Some(newline) => &buf[newline + 1..],
            None => return Vec::new(),
        }
    } else {
        buf
    };

    body.split_inclusive(|&b| b == b'\n')
        .map(|chunk| match chunk.strip_suffix(b"\n") {
            Some(bytes) => RawLine {
                bytes,
                terminated: true,
            },
            None => RawLine {
                bytes: chunk,
                terminated: false,
            },
        })
        .collect()
}

/// Bytes skipped by [`split_lines`] before the first returned line.
pub(crate) fn leading_skip(buf: &[u8], skip_leading_partial: bool) -> usize {
    if !skip_leading_partial {
        return 0;
    }
    buf.iter()
        .position(|&b| b == b'\n')
        .map_or(buf.len(), |newline| newline + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[RawLine<'_>]) -> Vec<String> {
        lines.iter().map(RawLine::to_text).collect()
    }

    #[test]
    fn test_trailing_newline_does_not_produce_empty_line() {
        let lines = split_lines(b"a\nb\n", false);
        assert_eq!(texts(&lines), vec!["a", "b"]);
        assert!(lines.iter().all(RawLine::is_terminated));
        assert_eq!(lines.iter().map(RawLine::span).sum::<u64>(), 4);
    }

    #[test]
    fn test_unterminated_last_line_is_kept() {
        let lines = split_lines(b"a\nbc", false);
        assert_eq!(texts(&lines), vec!["a", "bc"]);
        assert!(!lines[1].is_terminated());
        assert_eq!(lines[1].span(), 2);
    }

    #[test]
    fn test_leading_partial_is_skipped() {
        let lines = split_lines(b"tial\nfull\n", true);
        assert_eq!(texts(&lines), vec!["full"]);
        assert_eq!(leading_skip(b"tial\nfull\n", true), 5);
    }

    #[test]
    fn test_no_newline_with_skip_yields_nothing() {
        assert!(split_lines(b"one very long fragment", true).is_empty());
        assert_eq!(leading_skip(b"abc", true), 3);
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let lines = split_lines(b"\n\nx\n", false);
        assert_eq!(texts(&lines), vec!["", "", "x"]);
    }

    #[test]
    fn test_crlf_and_invalid_utf8() {
        let lines = split_lines(b"win\r\nbad\xff\n", false);
        assert_eq!(lines[0].to_text(), "win");
        assert_eq!(lines[0].span(), 5);
        assert_eq!(lines[1].to_text(), "bad\u{fffd}");
    }
}
