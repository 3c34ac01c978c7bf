//! Literal and identifier normalization passes.

use crate::scan;

use super::RepairConfig;

/// Rewrite every single-quoted literal as a plain wrap of its unescaped
/// content: `'it''s'` becomes `'it's'`. An unterminated literal takes
/// everything to the end of the text as its content and gains a closing
/// quote. Double-quoted identifiers pass through untouched.
pub(super) fn unescape_literals(_config: &RepairConfig, text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => {
                out.push_str(&text[copied..i]);
                let (content, end) = match scan::scan_quoted(text, i, b'\'') {
                    Some((content, end)) => (content, end),
                    None => (text[i + 1..].replace("''", "'"), bytes.len()),
                };
                out.push('\'');
                out.push_str(&content);
                out.push('\'');
                copied = end;
                i = end;
            }
            b'"' => {
                // skip the identifier so its interior cannot open a literal
                i = scan::quoted_run_end(text, i, b'"');
            }
            _ => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Collapse doubled double-quotes, strip ANSI escapes and control
/// characters, and apply the configured identifier cleanups.
pub fn normalize_identifiers(config: &RepairConfig, text: &str) -> String {
    let mut sql = text.replace("\"\"", "\"");
    sql = scan::strip_ansi_escapes(&sql);
    sql = scan::strip_control_chars(&sql);
    if config.collapse_qualified_quote {
        sql = scan::replace_outside_strings(&sql, &config.qualified_quote_re, "${1}.\"");
    }
    if config.sanitize_ident_separators {
        sql = sanitize_separators(&sql);
    }
    sql
}

/// Replace path separators inside double-quoted and backtick
/// identifiers with underscores. Single-quoted literals keep theirs.
fn sanitize_separators(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => i = scan::quoted_run_end(text, i, b'\''),
            b'"' | b'`' => {
                let end = scan::quoted_run_end(text, i, bytes[i]);
                out.push_str(&text[copied..i]);
                out.push_str(&text[i..end].replace(['/', '\\'], "_"));
                copied = end;
                i = end;
            }
            _ => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Fix an odd single-quote count: trim trailing whitespace, then drop a
/// trailing quote if one is there, otherwise append one.
pub fn balance_single_quotes(_config: &RepairConfig, text: &str) -> String {
    let quote_count = text.bytes().filter(|&b| b == b'\'').count();
    if quote_count % 2 == 0 {
        return text.to_string();
    }
    let trimmed = text.trim_end();
    match trimmed.strip_suffix('\'') {
        Some(stripped) => stripped.to_string(),
        None => format!("{trimmed}'"),
    }
}
