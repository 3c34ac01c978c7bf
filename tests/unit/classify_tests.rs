//! Tests for compatible-vs-converted classification

use presto2dbsql::classify::{
    is_compatible, quoted_identifier_map, quoted_identifier_set, QuoteComparison,
};
use presto2dbsql::repair::RepairConfig;

// ============================================================================
// Structural Comparison Tests
// ============================================================================

#[test]
fn test_unchanged_statement_is_compatible() {
    let config = RepairConfig::new();
    let sql = "SELECT id, name FROM users WHERE active = 1";
    assert!(is_compatible(&config, QuoteComparison::StyleMap, sql, sql));
}

#[test]
fn test_renamed_function_is_not_compatible() {
    let config = RepairConfig::new();
    assert!(!is_compatible(
        &config,
        QuoteComparison::StyleMap,
        "SELECT CARDINALITY(a) FROM t",
        "SELECT SIZE(a) FROM t"
    ));
}

#[test]
fn test_unparseable_original_is_not_compatible() {
    // Fail-safe: a parse failure can never classify as compatible
    let config = RepairConfig::new();
    assert!(!is_compatible(
        &config,
        QuoteComparison::StyleMap,
        "SELECT WHERE FROM",
        "SELECT 1"
    ));
}

#[test]
fn test_backtick_identifiers_can_be_compatible() {
    // Both dialects parse backtick identifiers, so a statement already
    // written with them round-trips unchanged
    let config = RepairConfig::new();
    assert!(is_compatible(
        &config,
        QuoteComparison::StyleMap,
        "SELECT `col` FROM t;",
        "SELECT `col` FROM t"
    ));
}

// ============================================================================
// Quote Comparison Tests
// ============================================================================

#[test]
fn test_alias_quote_style_change_blocks_compatibility() {
    let config = RepairConfig::new();
    assert!(!is_compatible(
        &config,
        QuoteComparison::StyleMap,
        r#"SELECT a AS "Alias" FROM t"#,
        "SELECT a AS `Alias` FROM t"
    ));
}

#[test]
fn test_quote_map_tracks_style_per_identifier() {
    let map = quoted_identifier_map(r#"SELECT "A", `B`, 'not an ident' FROM t"#);
    assert_eq!(map.get("A"), Some(&'"'));
    assert_eq!(map.get("B"), Some(&'`'));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_identifier_set_ignores_style() {
    let original = r#"SELECT "A", "B" FROM t"#;
    let converted = "SELECT `A`, `B` FROM t";
    assert_eq!(
        quoted_identifier_set(original),
        quoted_identifier_set(converted)
    );
    assert_ne!(
        quoted_identifier_map(original),
        quoted_identifier_map(converted)
    );
}

#[test]
fn test_dropped_identifier_changes_the_set() {
    let original = r#"SELECT "A", "B" FROM t"#;
    let converted = r#"SELECT "A" FROM t"#;
    assert_ne!(
        quoted_identifier_set(original),
        quoted_identifier_set(converted)
    );
}
