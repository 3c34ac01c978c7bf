//! presto2dbsql: Convert Presto/Trino SQL into Databricks SQL
//!
//! This library repairs and rewrites statement text that the target
//! parser cannot yet accept (unbalanced quotes, wrapper constructs,
//! source-only syntax forms), then round-trips it through sqlparser-rs
//! to emit Databricks SQL, classifying each statement as converted,
//! already compatible, or failed.

pub mod bridge;
pub mod classify;
pub mod error;
pub mod output;
pub mod repair;
pub mod rewrite;
pub mod scan;
pub mod split;
pub mod util;

use std::path::Path;

use encoding_rs::WINDOWS_1252;
use rayon::prelude::*;

pub use classify::QuoteComparison;
pub use error::ConvertError;
pub use output::{BatchReport, Conversion, StatementResult};
pub use repair::{AliasPolicy, RepairConfig, RepairPipeline};
pub use rewrite::RewriteTables;

/// Minimum number of statements to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
const PARALLEL_THRESHOLD: usize = 8;

/// Options for a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConverterOptions {
    /// Repair pipeline configuration
    pub repair: RepairConfig,
    /// Function rewrite tables
    pub tables: RewriteTables,
    /// How quoted identifiers are compared during classification
    pub quote_comparison: QuoteComparison,
    /// Force sequential processing even for large batches
    pub sequential: bool,
    /// Enable verbose output
    pub verbose: bool,
}

/// Per-bucket statement counts from one conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: usize,
    pub compatible: usize,
    pub errors: usize,
}

/// Convert a single statement blob through the full pipeline.
pub fn convert_blob(options: &ConverterOptions, blob: &str) -> Conversion {
    let pipeline = RepairPipeline::new(options.repair.clone());
    convert_with_pipeline(options, &pipeline, blob)
}

fn convert_with_pipeline(
    options: &ConverterOptions,
    pipeline: &RepairPipeline,
    blob: &str,
) -> Conversion {
    // Step 1: Lexical repair, then function-level rewriting
    let repaired = pipeline.run(blob);
    let rewritten = rewrite::rewrite_functions(&options.tables, &repaired);

    // Step 2: Parse in the source dialect
    let mut statements = match bridge::parse_source(&rewritten) {
        Ok(statements) => statements,
        Err(err) => {
            return Conversion::Error {
                message: scan::strip_ansi_escapes(&err.to_string()),
                candidate: cleaned_candidate(&options.repair, &rewritten),
            }
        }
    };
    if statements.is_empty() {
        return Conversion::Error {
            message: "Statement is empty after repair".to_string(),
            candidate: cleaned_candidate(&options.repair, &rewritten),
        };
    }

    // Step 3: Tree-level fix-up, then print for the target dialect
    bridge::fix_regexp_nodes(&mut statements, &options.repair.regexp_function);
    let converted = bridge::print_statements(&statements);

    // Step 4: Classify against the original text
    if classify::is_compatible(&options.repair, options.quote_comparison, blob, &converted) {
        Conversion::Compatible(blob.trim().to_string())
    } else {
        Conversion::Converted(converted)
    }
}

/// Re-apply the cheap cleanup passes to text the parser rejected, so
/// the error report shows the best candidate reached before failure.
fn cleaned_candidate(config: &RepairConfig, attempted: &str) -> String {
    let stripped = scan::strip_ansi_escapes(attempted);
    let repaired = repair::repair_trailing_mistakes(config, &stripped);
    repair::balance_single_quotes(config, &repaired)
}

/// Convert a batch of statement blobs, using parallel processing for
/// larger batches. Result order matches input order.
pub fn convert_statements(
    options: &ConverterOptions,
    statements: &[String],
) -> Vec<StatementResult> {
    let pipeline = RepairPipeline::new(options.repair.clone());
    let convert_one = |(index, blob): (usize, &String)| StatementResult {
        index: index + 1,
        conversion: convert_with_pipeline(options, &pipeline, blob),
    };

    if options.sequential || statements.len() < PARALLEL_THRESHOLD {
        // Sequential processing for small batches (avoids rayon overhead)
        statements.iter().enumerate().map(convert_one).collect()
    } else {
        statements.par_iter().enumerate().map(convert_one).collect()
    }
}

/// Split a text blob into statements and convert them all.
pub fn convert_text(options: &ConverterOptions, text: &str) -> BatchReport {
    let statements = split::split_statements(text);

    if options.verbose {
        println!("Found {} statements", statements.len());
    }

    let results = convert_statements(options, &statements);
    BatchReport::from_results(&results)
}

/// Convert a SQL file and write the three output buffers into
/// `output_dir` as `converted.sql`, `compatible.sql` and `errors.sql`.
/// All three files are always written, empty buffers included.
pub fn convert_file(
    options: &ConverterOptions,
    input: &Path,
    output_dir: &Path,
) -> Result<ConversionSummary, ConvertError> {
    let raw = read_sql_with_encoding_fallback(input).map_err(|e| ConvertError::InputReadError {
        path: input.to_path_buf(),
        source: e,
    })?;
    let content = scan::strip_control_chars(&scan::strip_ansi_escapes(&raw));

    if options.verbose {
        println!("Converting: {}", input.display());
    }

    let report = convert_text(options, &content);

    std::fs::create_dir_all(output_dir).map_err(|e| ConvertError::OutputDirError {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    write_buffer(&output_dir.join("converted.sql"), &report.converted)?;
    write_buffer(&output_dir.join("compatible.sql"), &report.compatible)?;
    write_buffer(&output_dir.join("errors.sql"), &report.errors)?;

    Ok(ConversionSummary {
        converted: report.converted_count,
        compatible: report.compatible_count,
        errors: report.error_count,
    })
}

fn write_buffer(path: &Path, content: &str) -> Result<(), ConvertError> {
    std::fs::write(path, content).map_err(|e| ConvertError::OutputWriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a SQL file as a string, trying UTF-8 first, then Windows-1252
/// as fallback. A leading BOM is stripped.
pub fn read_sql_with_encoding_fallback(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;

    match String::from_utf8(bytes.clone()) {
        Ok(s) => Ok(strip_bom(&s)),
        Err(_) => {
            // Fall back to Windows-1252 (common for SQL exported on Windows)
            let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
            if had_errors {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "File contains invalid characters",
                ))
            } else {
                Ok(strip_bom(&decoded))
            }
        }
    }
}

fn strip_bom(content: &str) -> String {
    content.strip_prefix('\u{FEFF}').unwrap_or(content).to_string()
}
