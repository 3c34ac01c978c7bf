//! Tests for the lexical repair pipeline

use pretty_assertions::assert_eq;
use presto2dbsql::repair::{
    balance_single_quotes, repair_trailing_mistakes, AliasPolicy, RepairConfig, RepairPipeline,
};

fn run(sql: &str) -> String {
    RepairPipeline::default().run(sql)
}

// ============================================================================
// Idempotence Tests
// ============================================================================

#[test]
fn test_pipeline_is_idempotent() {
    // Re-running the full pipeline on its own output changes nothing
    let corpus = [
        "SELECT a, b FROM t WHERE c = 'x'",
        "PREPARE q1 FROM 'SELECT ''x'' FROM t';",
        "SELECT 'it''s' AS x FROM t",
        "SELECT TRIM(LEADING 'x' FROM col) FROM t",
        "SELECT x AS 'My Alias' FROM t",
        "SELECT REGEXP_REPLACE(col, '[0-9]+') FROM t",
        "SELECT f(a, ) FROM t",
        "SELECT a FROM t WHERE x = 'broken",
    ];
    let pipeline = RepairPipeline::default();
    for sql in corpus {
        let once = pipeline.run(sql);
        let twice = pipeline.run(&once);
        assert_eq!(once, twice, "pipeline not idempotent on {:?}", sql);
    }
}

// ============================================================================
// Wrapper Unwrap Tests
// ============================================================================

#[test]
fn test_prepare_wrapper_is_unwrapped() {
    let sql = "PREPARE q1 FROM 'SELECT a FROM t';";
    assert_eq!(run(sql), "SELECT a FROM t");
}

#[test]
fn test_prepare_wrapper_unescapes_inner_quotes() {
    let sql = "PREPARE q1 FROM 'SELECT ''x'' FROM t';";
    assert_eq!(run(sql), "SELECT 'x' FROM t");
}

#[test]
fn test_execute_using_takes_second_literal() {
    let sql = "EXECUTE stmt USING 'day', 'SELECT b FROM t2'";
    assert_eq!(run(sql), "SELECT b FROM t2");
}

#[test]
fn test_merge_using_is_not_a_wrapper() {
    let sql = "MERGE INTO t USING s ON t.id = s.id WHEN MATCHED THEN DELETE";
    assert_eq!(run(sql), sql);
}

// ============================================================================
// Alias Forcing Tests
// ============================================================================

#[test]
fn test_double_quoted_alias_becomes_backtick() {
    let sql = r#"SELECT revenue AS "Total Sales" FROM t"#;
    assert_eq!(run(sql), "SELECT revenue AS `Total Sales` FROM t");
}

#[test]
fn test_double_quoted_alias_force_bare_policy() {
    let mut config = RepairConfig::new();
    config.alias_policy = AliasPolicy::ForceBare;
    let pipeline = RepairPipeline::new(config);
    let sql = r#"SELECT revenue AS "Total Sales" FROM t"#;
    assert_eq!(pipeline.run(sql), "SELECT revenue AS Total_Sales FROM t");
}

#[test]
fn test_single_quoted_alias_always_collapses() {
    let sql = "SELECT x AS 'My Alias' FROM t";
    assert_eq!(run(sql), "SELECT x AS My_Alias FROM t");
}

#[test]
fn test_bare_multiword_alias_collapses() {
    let sql = "SELECT x AS Some Alias FROM t";
    assert_eq!(run(sql), "SELECT x AS Some_Alias FROM t");
}

#[test]
fn test_single_word_alias_untouched() {
    let sql = "SELECT x AS total FROM t";
    assert_eq!(run(sql), sql);
}

#[test]
fn test_alias_special_characters_become_underscores() {
    let sql = "SELECT r AS 'Rate (%)' FROM t";
    assert_eq!(run(sql), "SELECT r AS Rate____ FROM t");
}

// ============================================================================
// Arity and Trailing Repair Tests
// ============================================================================

#[test]
fn test_two_argument_call_gains_empty_replacement() {
    let sql = "SELECT REGEXP_REPLACE(col, '[0-9]+') FROM t";
    assert_eq!(run(sql), "SELECT REGEXP_REPLACE(col, '[0-9]+', '') FROM t");
}

#[test]
fn test_three_argument_call_unchanged() {
    let sql = "SELECT REGEXP_REPLACE(col, '[0-9]+', 'X') FROM t";
    assert_eq!(run(sql), sql);
}

#[test]
fn test_configured_function_name_is_honored() {
    let pipeline = RepairPipeline::new(RepairConfig::with_regexp_function("REGEX_SUB"));
    let sql = "SELECT REGEX_SUB(col, 'a') FROM t";
    assert_eq!(pipeline.run(sql), "SELECT REGEX_SUB(col, 'a', '') FROM t");
}

#[test]
fn test_truncated_argument_list_is_closed() {
    let sql = "SELECT f(a, ) FROM t";
    assert_eq!(run(sql), "SELECT f(a, '') FROM t");
}

#[test]
fn test_doubled_empty_argument_collapses() {
    let config = RepairConfig::new();
    assert_eq!(
        repair_trailing_mistakes(&config, "f(a, '') )"),
        "f(a, '')"
    );
}

// ============================================================================
// TRIM Conversion Tests
// ============================================================================

#[test]
fn test_trim_leading() {
    let sql = "SELECT TRIM(LEADING 'x' FROM col) FROM t";
    assert_eq!(run(sql), "SELECT LTRIM(col, 'x') FROM t");
}

#[test]
fn test_trim_trailing_with_nested_call() {
    let sql = "SELECT TRIM(TRAILING 'x' FROM f(a,b)) FROM t";
    assert_eq!(run(sql), "SELECT RTRIM(f(a,b), 'x') FROM t");
}

#[test]
fn test_trim_both_and_default() {
    assert_eq!(
        run("SELECT TRIM(BOTH 'x' FROM col) FROM t"),
        "SELECT TRIM(col, 'x') FROM t"
    );
    assert_eq!(
        run("SELECT TRIM('x' FROM col) FROM t"),
        "SELECT TRIM(col, 'x') FROM t"
    );
}

#[test]
fn test_bare_trim_call_untouched() {
    let sql = "SELECT TRIM(col) FROM t";
    assert_eq!(run(sql), sql);
}

// ============================================================================
// Quote Balancing Tests
// ============================================================================

#[test]
fn test_unterminated_literal_gets_closed() {
    let sql = "SELECT a FROM t WHERE x = 'broken";
    assert_eq!(run(sql), "SELECT a FROM t WHERE x = 'broken'");
}

#[test]
fn test_balance_drops_or_appends() {
    let config = RepairConfig::new();
    assert_eq!(
        balance_single_quotes(&config, "SELECT a FROM t' "),
        "SELECT a FROM t"
    );
    assert_eq!(
        balance_single_quotes(&config, "SELECT 'a FROM t"),
        "SELECT 'a FROM t'"
    );
    let even = "SELECT 'a' FROM t";
    assert_eq!(balance_single_quotes(&config, even), even);
}
