//! Wrapper unwrapping for PREPARE and EXECUTE scaffolding.
//!
//! Exported query logs often hold the real statement as a quoted
//! literal inside `PREPARE stmt FROM ...` or `EXECUTE stmt USING
//! 'label', 'SELECT ...'` scaffolding. This pass digs the inner
//! statement out so the rest of the pipeline repairs the statement
//! itself, not its wrapper.

use crate::scan;
use crate::util::starts_with_ci;

use super::RepairConfig;

pub(super) fn unwrap_embedded(config: &RepairConfig, text: &str) -> String {
    let cleaned = scan::strip_ansi_escapes(text);
    if let Some(inner) = unwrap_prepare(config, &cleaned) {
        return inner;
    }
    if let Some(inner) = unwrap_execute(&cleaned) {
        return inner;
    }
    cleaned
}

/// Take everything after `PREPARE <name> FROM`, dropping trailing
/// semicolons. A remainder that is exactly one quoted literal is
/// unwrapped to its unescaped content.
fn unwrap_prepare(config: &RepairConfig, text: &str) -> Option<String> {
    let m = scan::find_outside_strings(text, &config.prepare_re)?;
    let remainder = text[m.end()..].trim().trim_end_matches(';').trim();
    Some(unwrap_literal(remainder))
}

fn unwrap_literal(remainder: &str) -> String {
    if remainder.starts_with('\'') {
        if let Some((content, end)) = scan::scan_quoted(remainder, 0, b'\'') {
            if end == remainder.len() {
                return content;
            }
        }
    }
    remainder.to_string()
}

/// Pull the embedded statement out of an `EXECUTE ... USING` form.
///
/// The USING keyword alone is not enough: MERGE and JOIN statements use
/// USING too, so an EXECUTE keyword must appear first. The statement is
/// normally the second quoted literal after USING; failing that, the
/// first literal in the whole text is taken when it reads like a query.
fn unwrap_execute(text: &str) -> Option<String> {
    let execute_pos = scan::find_keyword_ci(text, "EXECUTE", 0)?;
    let using_pos = scan::find_keyword_ci(text, "USING", execute_pos + "EXECUTE".len())?;

    if let Some((_, first_end)) = next_quoted(text, using_pos + "USING".len()) {
        if let Some(comma) = scan::find_top_level(text, b',', first_end) {
            if let Some((second, _)) = next_quoted(text, comma + 1) {
                return Some(second);
            }
        }
    }

    let (first_any, _) = next_quoted(text, 0)?;
    if starts_with_ci(first_any.trim(), "SELECT") {
        return Some(first_any);
    }
    None
}

/// Next single-quoted literal at or after `from`: unescaped content
/// plus the index past its closing quote.
fn next_quoted(text: &str, from: usize) -> Option<(String, usize)> {
    let offset = text.get(from..)?.find('\'')?;
    scan::scan_quoted(text, from + offset, b'\'')
}
