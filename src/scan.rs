//! Quote-aware scanning primitives.
//!
//! Every repair and rewrite pass walks SQL text through the same
//! [`Cursor`], which tracks single-quote and double-quote context
//! (with doubled-quote escaping) and parenthesis depth. Passes that
//! edit text therefore never fire inside string literals or quoted
//! identifiers, and never split an argument list on a nested comma.

use std::sync::LazyLock;

use regex::Regex;

use crate::util::is_keyword_at;

static ANSI_ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").unwrap());

static CONTROL_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap());

/// Remove ANSI escape sequences (CSI color codes and similar).
pub fn strip_ansi_escapes(text: &str) -> String {
    ANSI_ESCAPE_RE.replace_all(text, "").into_owned()
}

/// Remove non-printing control characters, keeping tab, newline and
/// carriage return.
pub fn strip_control_chars(text: &str) -> String {
    CONTROL_CHAR_RE.replace_all(text, "").into_owned()
}

/// Quote context at a scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteState {
    /// Outside any quoted run
    Normal,
    /// Inside a single-quoted string literal
    InSingle,
    /// Inside a double-quoted identifier
    InDouble,
}

/// Byte-wise scanner over SQL text.
///
/// Quotes escape themselves by doubling (`''` inside a single-quoted
/// literal, `""` inside a double-quoted identifier). Parenthesis depth
/// is only counted in [`QuoteState::Normal`]. All delimiters are ASCII,
/// so byte positions always land on UTF-8 character boundaries.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: QuoteState,
    depth: usize,
}

impl<'a> Cursor<'a> {
    /// Start a scan at the beginning of `text`.
    pub fn new(text: &'a str) -> Self {
        Self::at(text, 0)
    }

    /// Start a scan at `pos`, which the caller asserts is outside any
    /// quoted run.
    pub fn at(text: &'a str, pos: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: pos.min(text.len()),
            state: QuoteState::Normal,
            depth: 0,
        }
    }

    /// Current byte position.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Quote context of the byte at the current position.
    #[inline]
    pub fn state(&self) -> QuoteState {
        self.state
    }

    /// Parenthesis depth relative to the scan start.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Byte at the current position, if any.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consume the byte at the current position, updating quote state
    /// and parenthesis depth. An escaped quote pair is consumed whole.
    pub fn advance(&mut self) {
        let Some(b) = self.peek() else {
            return;
        };
        match self.state {
            QuoteState::Normal => {
                match b {
                    b'\'' => self.state = QuoteState::InSingle,
                    b'"' => self.state = QuoteState::InDouble,
                    b'(' => self.depth += 1,
                    b')' => self.depth = self.depth.saturating_sub(1),
                    _ => {}
                }
                self.pos += 1;
            }
            QuoteState::InSingle => self.advance_in_quote(b, b'\''),
            QuoteState::InDouble => self.advance_in_quote(b, b'"'),
        }
    }

    fn advance_in_quote(&mut self, b: u8, quote: u8) {
        if b == quote {
            if self.bytes.get(self.pos + 1) == Some(&quote) {
                self.pos += 2;
            } else {
                self.state = QuoteState::Normal;
                self.pos += 1;
            }
        } else {
            self.pos += 1;
        }
    }
}

/// Read the quoted run starting at `start` (which must hold the opening
/// quote byte) and return its unescaped content plus the index just past
/// the closing quote. Returns `None` when `start` does not hold the
/// quote or the run never closes.
pub fn scan_quoted(text: &str, start: usize, quote: u8) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    if start >= bytes.len() || bytes[start] != quote {
        return None;
    }
    let mut content = String::new();
    let mut segment_start = start + 1;
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                // escaped pair: keep one quote character
                content.push_str(&text[segment_start..=i]);
                segment_start = i + 2;
                i += 2;
            } else {
                content.push_str(&text[segment_start..i]);
                return Some((content, i + 1));
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Index just past the closing quote of the run starting at `start`,
/// or `text.len()` when the run never closes.
pub fn quoted_run_end(text: &str, start: usize, quote: u8) -> usize {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
            } else {
                return i + 1;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Index of the parenthesis closing the group whose interior starts at
/// `after_open`, skipping quoted runs and nested groups. `None` when
/// the group never closes.
pub fn matching_paren(text: &str, after_open: usize) -> Option<usize> {
    let mut cursor = Cursor::at(text, after_open);
    while let Some(b) = cursor.peek() {
        if b == b')' && cursor.state() == QuoteState::Normal && cursor.depth() == 0 {
            return Some(cursor.pos());
        }
        cursor.advance();
    }
    None
}

/// First whole-word, case-insensitive occurrence of `keyword` at or
/// after `from`, outside quoted runs.
pub fn find_keyword_ci(text: &str, keyword: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut cursor = Cursor::new(text);
    while cursor.peek().is_some() {
        let pos = cursor.pos();
        if pos >= from
            && cursor.state() == QuoteState::Normal
            && is_keyword_at(bytes, pos, keyword.as_bytes())
        {
            return Some(pos);
        }
        cursor.advance();
    }
    None
}

/// Like [`find_keyword_ci`], but also requires parenthesis depth zero
/// relative to the start of `text`.
pub fn find_keyword_top_level(text: &str, keyword: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut cursor = Cursor::new(text);
    while cursor.peek().is_some() {
        let pos = cursor.pos();
        if pos >= from
            && cursor.state() == QuoteState::Normal
            && cursor.depth() == 0
            && is_keyword_at(bytes, pos, keyword.as_bytes())
        {
            return Some(pos);
        }
        cursor.advance();
    }
    None
}

/// First occurrence of `delimiter` at or after `from` that sits outside
/// quoted runs and outside parentheses.
pub fn find_top_level(text: &str, delimiter: u8, from: usize) -> Option<usize> {
    let mut cursor = Cursor::new(text);
    while let Some(b) = cursor.peek() {
        if cursor.pos() >= from
            && b == delimiter
            && cursor.state() == QuoteState::Normal
            && cursor.depth() == 0
        {
            return Some(cursor.pos());
        }
        cursor.advance();
    }
    None
}

/// Split on `delimiter` at positions outside quoted runs and outside
/// parentheses. Delimiters are dropped; parts are not trimmed.
pub fn split_top_level(text: &str, delimiter: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut cursor = Cursor::new(text);
    let mut start = 0;
    while let Some(b) = cursor.peek() {
        if b == delimiter && cursor.state() == QuoteState::Normal && cursor.depth() == 0 {
            parts.push(&text[start..cursor.pos()]);
            start = cursor.pos() + 1;
        }
        cursor.advance();
    }
    parts.push(&text[start..]);
    parts
}

/// Split an argument list on top-level commas. Each part is trimmed;
/// empty parts between commas are preserved. An all-whitespace input
/// yields no arguments.
pub fn split_args(args: &str) -> Vec<String> {
    if args.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(args, b',')
        .iter()
        .map(|part| part.trim().to_string())
        .collect()
}

/// First regex match that starts outside any quoted run.
pub fn find_outside_strings<'t>(text: &'t str, pattern: &Regex) -> Option<regex::Match<'t>> {
    let mut cursor = Cursor::new(text);
    for m in pattern.find_iter(text) {
        while cursor.pos() < m.start() {
            cursor.advance();
        }
        if cursor.pos() == m.start() && cursor.state() == QuoteState::Normal {
            return Some(m);
        }
    }
    None
}

/// Apply a regex replacement to every match that starts outside a
/// quoted run. `replacement` uses `$1`/`${1}` group syntax.
pub fn replace_outside_strings(text: &str, pattern: &Regex, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = Cursor::new(text);
    let mut copied = 0;
    for caps in pattern.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        while cursor.pos() < m.start() {
            cursor.advance();
        }
        if cursor.pos() != m.start() || cursor.state() != QuoteState::Normal {
            continue;
        }
        out.push_str(&text[copied..m.start()]);
        caps.expand(replacement, &mut out);
        copied = m.end();
    }
    out.push_str(&text[copied..]);
    out
}
