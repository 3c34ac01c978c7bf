//! Conversion outcomes and batch report assembly.
//!
//! Every statement in a batch lands in exactly one of three buffers:
//! converted (rewriting was needed), compatible (already valid for the
//! target) or errors (conversion failed). Buffer entries carry the
//! statement's 1-based position so results can be traced back to the
//! input file.

/// Outcome of converting a single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Rewriting was needed; holds the converted SQL
    Converted(String),
    /// Already valid in the target dialect; holds the original text
    Compatible(String),
    /// Conversion failed; holds the parser message and a best-effort
    /// cleaned candidate for manual review
    Error { message: String, candidate: String },
}

/// A conversion outcome tagged with the statement's 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementResult {
    pub index: usize,
    pub conversion: Conversion,
}

/// The three output buffers for one batch, plus per-bucket counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: String,
    pub compatible: String,
    pub errors: String,
    pub converted_count: usize,
    pub compatible_count: usize,
    pub error_count: usize,
}

impl BatchReport {
    /// Assemble the three buffers from per-statement results, keeping
    /// input order within each buffer.
    pub fn from_results(results: &[StatementResult]) -> Self {
        let mut converted_entries = Vec::new();
        let mut compatible_entries = Vec::new();
        let mut error_entries = Vec::new();

        for result in results {
            match &result.conversion {
                Conversion::Converted(sql) => {
                    converted_entries.push(format!("-- QUERY {}\n{};\n", result.index, sql.trim()));
                }
                Conversion::Compatible(sql) => {
                    compatible_entries
                        .push(format!("-- QUERY {}\n{};\n", result.index, sql.trim()));
                }
                Conversion::Error { message, candidate } => {
                    error_entries.push(format!(
                        "-- QUERY {}\n-- ERROR:\n{}\n-- CLEANED_CANDIDATE:\n{}\n",
                        result.index, message, candidate
                    ));
                }
            }
        }

        Self {
            converted: converted_entries.join("\n"),
            compatible: compatible_entries.join("\n"),
            errors: error_entries.join("\n"),
            converted_count: converted_entries.len(),
            compatible_count: compatible_entries.len(),
            error_count: error_entries.len(),
        }
    }

    /// Total number of statements across all three buckets.
    pub fn total(&self) -> usize {
        self.converted_count + self.compatible_count + self.error_count
    }
}
