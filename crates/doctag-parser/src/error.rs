//! Error types for source extraction

use doctag_model::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Error type for extraction operations
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A source file or directory could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust; aborts the whole extraction
    #[error("failed to parse {}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A filename pattern is not a valid regular expression
    #[error("invalid filename pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An unresolved declaration while strict mode is on
    #[error("strict mode: {0}")]
    Strict(Diagnostic),
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, err: &syn::Error) -> Self {
        let start = err.span().start();
        ExtractError::Parse {
            path: path.into(),
            line: start.line,
            // proc-macro2 columns are 0-based
            column: start.column + 1,
            message: err.to_string(),
        }
    }
}
