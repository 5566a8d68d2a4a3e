//! ANSI SGR to HTML conversion.

use std::fmt::Write as _;

use regex::Regex;

use crate::ports::MarkupConverter;

/// Matches CSI sequences (capturing parameters and final byte), OSC strings
/// and two-byte escapes.
const ESCAPE_PATTERN: &str =
    r"\x1b(?:\[([0-9;:?<=>]*)[ -/]*([@-~])|\][^\x07\x1b]*(?:\x07|\x1b\\)?|[@-Z\\-_])";

/// The standard 16-colour palette (xterm defaults).
const PALETTE: [&str; 16] = [
    "#000000", "#cd0000", "#00cd00", "#cdcd00", "#0000ee", "#cd00cd", "#00cdcd", "#e5e5e5",
    "#7f7f7f", "#ff0000", "#00ff00", "#ffff00", "#5c5cff", "#ff00ff", "#00ffff", "#ffffff",
];

/// Converts terminal colour codes into `<span style="…">` runs.
///
/// Text is HTML-escaped. SGR sequences become inline styles; every other
/// escape sequence (cursor movement, OSC titles, …) is dropped. Each line is
/// converted independently, so styles never leak between lines.
#[derive(Debug, Clone)]
pub struct AnsiHtmlConverter {
    escapes: Regex,
}

impl AnsiHtmlConverter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            escapes: Regex::new(ESCAPE_PATTERN)?,
        })
    }
}

impl MarkupConverter for AnsiHtmlConverter {
    fn to_markup(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut style = Style::default();
        let mut open = false;
        let mut last = 0;

        for caps in self.escapes.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            escape_html(&line[last..whole.start()], &mut out);
            last = whole.end();

            let is_sgr = caps.get(2).is_some_and(|m| m.as_str() == "m");
            let params = caps.get(1).map_or("", |m| m.as_str());
            if !is_sgr || params.starts_with(['?', '<', '=', '>']) {
                continue;
            }

            style.apply(params);
            if open {
                out.push_str("</span>");
                open = false;
            }
            if let Some(css) = style.css() {
                let _ = write!(out, "<span style=\"{css}\">");
                open = true;
            }
        }

        escape_html(&line[last..], &mut out);
        if open {
            out.push_str("</span>");
        }
        out
    }
}

fn escape_html(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c if c.is_control() && c != '\t' => {}
            c => out.push(c),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Style {
    bold: bool,
    dim: bool,
    italic: bool,
    underline: bool,
    fg: Option<String>,
    bg: Option<String>,
}

impl Style {
    fn apply(&mut self, params: &str) {
        let codes: Vec<u16> = if params.is_empty() {
            vec![0]
        } else {
            params
                .split([';', ':'])
                .map(|p| p.parse().unwrap_or(0))
                .collect()
        };

        let mut iter = codes.into_iter();
        while let Some(code) = iter.next() {
            match code {
                0 => *self = Self::default(),
                1 => self.bold = true,
                2 => self.dim = true,
                3 => self.italic = true,
                4 => self.underline = true,
                22 => {
                    self.bold = false;
                    self.dim = false;
                }
                23 => self.italic = false,
                24 => self.underline = false,
                30..=37 => self.fg = Some(PALETTE[usize::from(code - 30)].to_string()),
                90..=97 => self.fg = Some(PALETTE[usize::from(code - 90 + 8)].to_string()),
                40..=47 => self.bg = Some(PALETTE[usize::from(code - 40)].to_string()),
                100..=107 => self.bg = Some(PALETTE[usize::from(code - 100 + 8)].to_string()),
                38 => self.fg = extended_colour(&mut iter),
                48 => self.bg = extended_colour(&mut iter),
                39 => self.fg = None,
                49 => self.bg = None,
                _ => {}
            }
        }
    }

    fn css(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(fg) = &self.fg {
            parts.push(format!("color:{fg}"));
        }
        if let Some(bg) = &self.bg {
            parts.push(format!("background-color:{bg}"));
        }
        if self.bold {
            parts.push("font-weight:bold".to_string());
        }
        if self.dim {
            parts.push("opacity:0.7".to_string());
        }
        if self.italic {
            parts.push("font-style:italic".to_string());
        }
        if self.underline {
            parts.push("text-decoration:underline".to_string());
        }
        (!parts.is_empty()).then(|| parts.join(";"))
    }
}

/// Parse the tail of a `38`/`48` sequence: `5;n` or `2;r;g;b`.
fn extended_colour(iter: &mut impl Iterator<Item = u16>) -> Option<String> {
    match iter.next()? {
        5 => iter.next().map(colour_256),
        2 => {
            let r = clamp_channel(iter.next()?);
            let g = clamp_channel(iter.next()?);
            let b = clamp_channel(iter.next()?);
            Some(format!("#{r:02x}{g:02x}{b:02x}"))
        }
        _ => None,
    }
}

fn clamp_channel(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn colour_256(index: u16) -> String {
    match index {
        0..=15 => PALETTE[usize::from(index)].to_string(),
        16..=231 => {
            let i = index - 16;
            let level = |v: u16| if v == 0 { 0 } else { 55 + v * 40 };
            format!(
                "#{:02x}{:02x}{:02x}",
                level(i / 36),
                level((i / 6) % 6),
                level(i % 6)
            )
        }
        232..=255 => {
            let grey = 8 + (index - 232) * 10;
            format!("#{grey:02x}{grey:02x}{grey:02x}")
        }
        _ => PALETTE[7].to_string(),
    }
}
