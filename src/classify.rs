//! Compatible-vs-converted classification.
//!
//! A converted statement counts as Compatible only when it is
//! structurally the same query as the original and no quoted
//! identifier changed its quote character. Quote style is meaningful
//! to the target dialect, so AST equality alone is not trusted.

use std::collections::{BTreeMap, BTreeSet};

use crate::bridge;
use crate::repair::{normalize_identifiers, RepairConfig};
use crate::scan;

/// How quoted identifiers are compared between the original and the
/// converted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteComparison {
    /// Each identifier must keep the quote character it had.
    #[default]
    StyleMap,
    /// Only the set of quoted identifier names must match.
    IdentifierSet,
}

/// Decide whether `converted` is the same query as `original`.
///
/// Both checks must pass: AST equality between the normalized original
/// parsed in the source dialect and the converted text parsed in the
/// target dialect, and an identical quoted-identifier comparison. A
/// parse failure on either side counts as not the same.
pub fn is_compatible(
    config: &RepairConfig,
    comparison: QuoteComparison,
    original: &str,
    converted: &str,
) -> bool {
    structurally_same(config, original, converted) && quotes_match(comparison, original, converted)
}

fn structurally_same(config: &RepairConfig, original: &str, converted: &str) -> bool {
    let normalized = normalize_identifiers(config, original);
    let original_sql = normalized.trim().trim_end_matches(';');
    let converted_sql = converted.trim().trim_end_matches(';');
    match (
        bridge::parse_source(original_sql),
        bridge::parse_target(converted_sql),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn quotes_match(comparison: QuoteComparison, original: &str, converted: &str) -> bool {
    match comparison {
        QuoteComparison::StyleMap => {
            quoted_identifier_map(original) == quoted_identifier_map(converted)
        }
        QuoteComparison::IdentifierSet => {
            quoted_identifier_set(original) == quoted_identifier_set(converted)
        }
    }
}

/// Collect `identifier -> quote character` for every double-quoted or
/// backtick-quoted run. Single-quoted string literals are skipped, as
/// are empty quoted runs.
pub fn quoted_identifier_map(text: &str) -> BTreeMap<String, char> {
    let bytes = text.as_bytes();
    let mut map = BTreeMap::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => i = scan::quoted_run_end(text, i, b'\''),
            quote @ (b'"' | b'`') => match scan::scan_quoted(text, i, quote) {
                Some((ident, end)) => {
                    if !ident.is_empty() {
                        map.insert(ident, quote as char);
                    }
                    i = end;
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }
    map
}

/// Collect the quoted identifier names, ignoring quote style.
pub fn quoted_identifier_set(text: &str) -> BTreeSet<String> {
    quoted_identifier_map(text).into_keys().collect()
}
