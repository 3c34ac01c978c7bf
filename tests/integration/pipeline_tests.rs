//! End-to-end tests for single-statement conversion
//!
//! These tests drive `convert_blob` through the full repair, rewrite,
//! parse and classify pipeline and check the final outcome.

use presto2dbsql::{convert_blob, Conversion, ConverterOptions};

fn convert(sql: &str) -> Conversion {
    convert_blob(&ConverterOptions::default(), sql)
}

// ============================================================================
// Classification Outcomes
// ============================================================================

#[test]
fn test_renamed_function_is_converted() {
    assert_eq!(
        convert("SELECT CARDINALITY(items) FROM t"),
        Conversion::Converted("SELECT SIZE(items) FROM t".to_string())
    );
}

#[test]
fn test_clean_statement_is_compatible() {
    assert_eq!(
        convert("SELECT id FROM users"),
        Conversion::Compatible("SELECT id FROM users".to_string())
    );
}

#[test]
fn test_trailing_semicolon_preserved_in_compatible() {
    // The semicolon is ignored for comparison but kept in the output
    assert_eq!(
        convert("SELECT id FROM users;"),
        Conversion::Compatible("SELECT id FROM users;".to_string())
    );
}

#[test]
fn test_converted_output_is_stable() {
    let first = convert("SELECT CARDINALITY(items) FROM t");
    let converted = match first {
        Conversion::Converted(sql) => sql,
        other => panic!("Expected a converted statement, got {:?}", other),
    };

    // Feeding converted output back in must classify as compatible
    assert_eq!(convert(&converted), Conversion::Compatible(converted));
}

// ============================================================================
// Wrapper Unwrapping
// ============================================================================

#[test]
fn test_prepare_wrapper_unwrapped() {
    assert_eq!(
        convert("PREPARE q FROM 'SELECT CARDINALITY(x) FROM t';"),
        Conversion::Converted("SELECT SIZE(x) FROM t".to_string())
    );
}

#[test]
fn test_execute_wrapper_extracts_query() {
    assert_eq!(
        convert("EXECUTE stmt USING 'daily', 'SELECT CARDINALITY(c) FROM t'"),
        Conversion::Converted("SELECT SIZE(c) FROM t".to_string())
    );
}

// ============================================================================
// Repair Passes Through the Pipeline
// ============================================================================

#[test]
fn test_quoted_alias_becomes_backtick() {
    assert_eq!(
        convert(r#"SELECT sum(a) AS "Total Sales" FROM t"#),
        Conversion::Converted("SELECT sum(a) AS `Total Sales` FROM t".to_string())
    );
}

#[test]
fn test_trim_keyword_form_rewritten() {
    assert_eq!(
        convert("SELECT TRIM(LEADING 'x' FROM col) FROM t"),
        Conversion::Converted("SELECT LTRIM(col, 'x') FROM t".to_string())
    );
}

#[test]
fn test_unterminated_literal_closed() {
    assert_eq!(
        convert("SELECT 'abc FROM t"),
        Conversion::Converted("SELECT 'abc FROM t'".to_string())
    );
}

#[test]
fn test_date_format_pattern_translated() {
    assert_eq!(
        convert("SELECT DATE_PARSE(d, '%Y-%m-%d') FROM t"),
        Conversion::Converted("SELECT TO_TIMESTAMP(d, 'yyyy-MM-dd') FROM t".to_string())
    );
}

// ============================================================================
// Tree-Level Fix-Up
// ============================================================================

#[test]
fn test_two_argument_regexp_patched_in_tree() {
    // The nested call defeats the lexical arity repair, so the missing
    // replacement argument is added on the parsed tree instead
    let expected = "SELECT REGEXP_REPLACE(UPPER(col), 'x', UPPER(col)) FROM t";
    assert_eq!(
        convert("SELECT REGEXP_REPLACE(UPPER(col), 'x') FROM t"),
        Conversion::Converted(expected.to_string())
    );
}

// ============================================================================
// Identifier Quoting
// ============================================================================

#[test]
fn test_double_quoted_identifier_never_compatible() {
    // Databricks quotes identifiers with backticks, so any statement
    // using double quotes must come out rewritten
    assert_eq!(
        convert(r#"SELECT "col" FROM t"#),
        Conversion::Converted("SELECT `col` FROM t".to_string())
    );
}

// ============================================================================
// Failure Reporting
// ============================================================================

#[test]
fn test_parse_failure_reports_candidate() {
    match convert("SELECT ((broken FROM t") {
        Conversion::Error { message, candidate } => {
            assert!(!message.is_empty(), "Error message should not be empty");
            assert!(
                candidate.contains("broken"),
                "Candidate should carry the cleaned text, got: {}",
                candidate
            );
        }
        other => panic!("Expected an error outcome, got {:?}", other),
    }
}
