//! Error types for code generation

use doctag_annotation::AnnotationError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for generation
#[derive(Error, Debug)]
pub enum GenerateError {
    /// An annotation on `declaration` broke its kind's contract
    #[error("invalid annotation on `{declaration}`: {source}")]
    Annotation {
        declaration: String,
        #[source]
        source: AnnotationError,
    },

    /// Documentation on `declaration` names a registered kind but does not parse
    #[error("invalid annotation on `{declaration}` ({filename}): {message}")]
    InvalidAnnotation {
        declaration: String,
        filename: String,
        message: String,
    },

    /// Two event records share a name
    #[error("event `{name}` is declared twice ({first} and {second})")]
    DuplicateEvent {
        name: String,
        first: String,
        second: String,
    },

    /// Two aggregate names map onto the same generated identifiers
    #[error("aggregates `{first}` and `{second}` both generate `{generated}`")]
    AggregateNameCollision {
        first: String,
        second: String,
        generated: String,
    },

    /// Generated text does not parse as Rust
    #[error("generated {file_name} is not valid Rust: {message}")]
    InvalidOutput { file_name: String, message: String },

    /// Serializing a JSON artifact failed
    #[error("failed to serialize {file_name}: {source}")]
    Json {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing an artifact failed
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn annotation(declaration: impl Into<String>, source: AnnotationError) -> Self {
        GenerateError::Annotation {
            declaration: declaration.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}
