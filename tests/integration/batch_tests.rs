//! Integration tests for batch conversion
//!
//! These tests cover statement splitting, parallel processing and the
//! assembly of the three output buffers.

use presto2dbsql::{convert_statements, convert_text, Conversion, ConverterOptions};

fn mixed_corpus() -> Vec<String> {
    [
        "SELECT 1",
        "SELECT CARDINALITY(a) FROM t",
        "SELECT 'open",
        "SELECT NOW()",
        "SELECT ((bad",
        "SELECT 2",
        "SELECT ARBITRARY(x) FROM g",
        "SELECT 3",
        "SELECT TRIM(BOTH 'x' FROM col) FROM t",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ============================================================================
// Ordering and Indexing
// ============================================================================

#[test]
fn test_large_batch_preserves_order() {
    // Ten statements is enough to take the parallel path
    let statements: Vec<String> = (1..=10).map(|i| format!("SELECT {}", i)).collect();
    let results = convert_statements(&ConverterOptions::default(), &statements);

    assert_eq!(results.len(), 10);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.index, i + 1, "Indices should be 1-based input order");
        assert_eq!(
            result.conversion,
            Conversion::Compatible(format!("SELECT {}", i + 1))
        );
    }
}

#[test]
fn test_indices_are_one_based_input_order() {
    let results = convert_statements(&ConverterOptions::default(), &mixed_corpus());
    let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
    assert_eq!(indices, (1..=9).collect::<Vec<usize>>());
}

#[test]
fn test_parallel_and_sequential_agree() {
    let statements = mixed_corpus();
    let parallel = convert_statements(&ConverterOptions::default(), &statements);

    let options = ConverterOptions {
        sequential: true,
        ..Default::default()
    };
    let sequential = convert_statements(&options, &statements);

    assert_eq!(parallel, sequential, "Processing mode must not change results");
}

// ============================================================================
// Bucket Assembly
// ============================================================================

#[test]
fn test_mixed_batch_buckets() {
    let text = "SELECT 1; SELECT CARDINALITY(a) FROM t; SELECT ((bad; SELECT NOW(); SELECT 2";
    let report = convert_text(&ConverterOptions::default(), text);

    assert_eq!(report.compatible_count, 2);
    assert_eq!(report.converted_count, 2);
    assert_eq!(report.error_count, 1);
    assert_eq!(report.total(), 5);

    assert!(report.compatible.contains("-- QUERY 1"));
    assert!(report.compatible.contains("-- QUERY 5"));
    assert!(report.converted.contains("-- QUERY 2"));
    assert!(report.converted.contains("SIZE(a)"));
    assert!(report.converted.contains("-- QUERY 4"));
    assert!(report.converted.contains("CURRENT_TIMESTAMP()"));
    assert!(report.errors.contains("-- QUERY 3"));
}

#[test]
fn test_error_entries_carry_candidate() {
    let report = convert_text(&ConverterOptions::default(), "SELECT ((bad");
    assert_eq!(report.error_count, 1);
    assert!(report.errors.contains("-- ERROR:"));
    assert!(report.errors.contains("-- CLEANED_CANDIDATE:"));
    assert!(report.errors.contains("SELECT ((bad"));
}

#[test]
fn test_empty_text_produces_empty_report() {
    let report = convert_text(&ConverterOptions::default(), "");
    assert_eq!(report.total(), 0);
    assert!(report.converted.is_empty());
    assert!(report.compatible.is_empty());
    assert!(report.errors.is_empty());
}

#[test]
fn test_threshold_batch_converts_all() {
    // Exactly eight statements, the parallel threshold
    let statements: Vec<String> = (0..8)
        .map(|i| format!("SELECT CARDINALITY(c{}) FROM t", i))
        .collect();
    let results = convert_statements(&ConverterOptions::default(), &statements);

    assert_eq!(results.len(), 8);
    for (i, result) in results.iter().enumerate() {
        let expected = format!("SELECT SIZE(c{}) FROM t", i);
        assert_eq!(result.conversion, Conversion::Converted(expected));
    }
}
