//! TRIM keyword-syntax conversion.
//!
//! Presto's `TRIM([LEADING|TRAILING|BOTH] <chars> FROM <expr>)` keyword
//! form becomes a plain two-argument LTRIM/RTRIM/TRIM call. The call is
//! parenthesis-matched and the FROM keyword is located at top level, so
//! an expression holding nested calls (`substring(y FROM 2)`) converts
//! intact. Bare `TRIM(expr)` calls are not touched.

use crate::scan::{self, Cursor, QuoteState};
use crate::util::is_keyword_at;

use super::RepairConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrimMode {
    Leading,
    Trailing,
    Both,
}

impl TrimMode {
    fn function(self) -> &'static str {
        match self {
            TrimMode::Leading => "LTRIM",
            TrimMode::Trailing => "RTRIM",
            TrimMode::Both => "TRIM",
        }
    }
}

pub(super) fn convert_trim_syntax(_config: &RepairConfig, text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut cursor = Cursor::new(text);
    let mut copied = 0;
    while cursor.peek().is_some() {
        let pos = cursor.pos();
        if cursor.state() == QuoteState::Normal && is_keyword_at(bytes, pos, b"TRIM") {
            if let Some((replacement, end)) = rewrite_trim(text, pos) {
                out.push_str(&text[copied..pos]);
                out.push_str(&replacement);
                copied = end;
                while cursor.pos() < end {
                    cursor.advance();
                }
                continue;
            }
        }
        cursor.advance();
    }
    out.push_str(&text[copied..]);
    out
}

fn rewrite_trim(text: &str, trim_pos: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let mut i = trim_pos + 4;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b'(' {
        return None;
    }
    let close = scan::matching_paren(text, i + 1)?;
    let interior = &text[i + 1..close];
    let from_pos = scan::find_keyword_top_level(interior, "FROM", 0)?;
    let chars_part = interior[..from_pos].trim();
    let expr = interior[from_pos + 4..].trim();
    if expr.is_empty() {
        return None;
    }
    let (mode, char_spec) = split_mode(chars_part);
    let (quote, trim_chars) = parse_char_spec(char_spec)?;
    Some((
        format!("{}({}, {}{}{})", mode.function(), expr, quote, trim_chars, quote),
        close + 1,
    ))
}

/// Strip a leading LEADING/TRAILING/BOTH keyword off the part before
/// FROM, leaving the character specification.
fn split_mode(chars_part: &str) -> (TrimMode, &str) {
    let bytes = chars_part.as_bytes();
    for (keyword, mode) in [
        ("LEADING", TrimMode::Leading),
        ("TRAILING", TrimMode::Trailing),
        ("BOTH", TrimMode::Both),
    ] {
        if is_keyword_at(bytes, 0, keyword.as_bytes()) {
            return (mode, chars_part[keyword.len()..].trim_start());
        }
    }
    (TrimMode::Both, chars_part)
}

/// Resolve the character specification into its quote character and
/// content. A quoted spec must be one whole literal; a bare spec is
/// wrapped in single quotes. An empty spec trims nothing explicitly.
fn parse_char_spec(spec: &str) -> Option<(char, String)> {
    if spec.is_empty() {
        return Some(('\'', String::new()));
    }
    let first = spec.as_bytes()[0];
    if first == b'\'' || first == b'"' {
        let (content, end) = scan::scan_quoted(spec, 0, first)?;
        if !spec[end..].trim().is_empty() {
            return None;
        }
        let escaped = match first {
            b'\'' => content.replace('\'', "''"),
            _ => content.replace('"', "\"\""),
        };
        return Some((first as char, escaped));
    }
    if spec.contains('\'') || spec.contains('"') {
        return None;
    }
    Some(('\'', spec.to_string()))
}
