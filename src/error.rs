//! Error types for presto2dbsql

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading input or writing conversion output.
///
/// Per-statement conversion failures are not errors at this level; they
/// land in the errors buffer of the batch report instead.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read SQL file: {path}")]
    InputReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory: {path}")]
    OutputDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
