//! Date format token conversion.
//!
//! Presto's date functions take MySQL-style `%`-token format strings;
//! Databricks wants JVM DateTimeFormatter patterns. String literals in
//! the argument lists of known date functions get their tokens
//! rewritten in table order. Literals outside those argument lists are
//! never touched, so `%` in ordinary data stays intact.

use crate::scan;
use crate::util::is_keyword_at;

use super::RewriteTables;

/// Convert one `%`-token pattern. Patterns without `%` come back as-is.
pub fn convert_date_format_pattern(tokens: &[(&str, &str)], pattern: &str) -> String {
    if !pattern.contains('%') {
        return pattern.to_string();
    }
    let mut converted = pattern.to_string();
    for (from, to) in tokens {
        converted = converted.replace(from, to);
    }
    converted
}

pub(super) fn convert_date_formats(tables: &RewriteTables, text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\'' || b == b'"' {
            // a literal outside a date call is copied verbatim
            i = scan::quoted_run_end(text, i, b);
            continue;
        }
        if let Some((open, close)) = date_call_span(tables, text, i) {
            out.push_str(&text[copied..open + 1]);
            out.push_str(&convert_formats_in_args(tables, &text[open + 1..close]));
            out.push(')');
            copied = close + 1;
            i = close + 1;
            continue;
        }
        i += 1;
    }
    out.push_str(&text[copied..]);
    out
}

/// Span of a date-function call starting at `pos`: the opening and
/// closing parenthesis indices.
fn date_call_span(tables: &RewriteTables, text: &str, pos: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let name = tables
        .date_functions
        .iter()
        .find(|name| is_keyword_at(bytes, pos, name.as_bytes()))?;
    let mut i = pos + name.len();
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b'(' {
        return None;
    }
    let close = scan::matching_paren(text, i + 1)?;
    Some((i, close))
}

/// Convert the format tokens of every string literal in an argument
/// list, keeping escaped quote pairs as they are. An unterminated
/// literal converts to the end of the list without gaining a closing
/// quote.
fn convert_formats_in_args(tables: &RewriteTables, args: &str) -> String {
    let bytes = args.as_bytes();
    let mut out = String::with_capacity(args.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\'' || b == b'"' {
            out.push_str(&args[copied..i]);
            let quote = b as char;
            match scan::scan_quoted(args, i, b) {
                Some((_, end)) => {
                    let raw = &args[i + 1..end - 1];
                    out.push(quote);
                    out.push_str(&convert_date_format_pattern(&tables.date_tokens, raw));
                    out.push(quote);
                    copied = end;
                    i = end;
                }
                None => {
                    let raw = &args[i + 1..];
                    out.push(quote);
                    out.push_str(&convert_date_format_pattern(&tables.date_tokens, raw));
                    copied = bytes.len();
                    i = bytes.len();
                }
            }
        } else {
            i += 1;
        }
    }
    out.push_str(&args[copied..]);
    out
}
