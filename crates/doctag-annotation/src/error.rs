//! Error types for annotation parsing and validation

use thiserror::Error;

/// Result type alias for annotation operations
pub type AnnotationResult<T> = Result<T, AnnotationError>;

/// Error type for annotation parsing and validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// The line starts like an annotation of a registered kind but does not follow the grammar
    #[error("syntax error at column {column}: {message}")]
    Syntax { column: usize, message: String },

    /// The same attribute appears twice in one annotation
    #[error("@{kind}: attribute `{attribute}` given more than once")]
    DuplicateAttribute { kind: String, attribute: String },

    /// Two annotations of one kind on the same declaration
    #[error("@{kind} appears more than once on the same declaration")]
    DuplicateAnnotation { kind: String },

    /// A mandatory attribute is absent
    #[error("@{kind}: missing required attribute `{attribute}`")]
    MissingRequiredAttribute { kind: String, attribute: String },

    /// An attribute the kind does not declare
    #[error("@{kind}: unknown attribute `{attribute}`")]
    UnknownAttribute { kind: String, attribute: String },

    /// An attribute whose value is not acceptable for the kind
    #[error("@{kind}: invalid value {value:?} for attribute `{attribute}`: {reason}")]
    InvalidAttribute {
        kind: String,
        attribute: String,
        value: String,
        reason: String,
    },

    /// Validation was asked for a kind the registry does not know
    #[error("@{kind} is not a registered annotation kind")]
    UnregisteredKind { kind: String },

    /// Any of the above, located on a declaration
    #[error("in `{declaration}`: {source}")]
    InDeclaration {
        declaration: String,
        #[source]
        source: Box<AnnotationError>,
    },
}

impl AnnotationError {
    pub(crate) fn syntax(column: usize, message: impl Into<String>) -> Self {
        AnnotationError::Syntax {
            column,
            message: message.into(),
        }
    }

    /// Create an [`AnnotationError::InvalidAttribute`]
    pub fn invalid_attribute(
        kind: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AnnotationError::InvalidAttribute {
            kind: kind.into(),
            attribute: attribute.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Attach the name of the declaration the error was found on
    pub fn in_declaration(self, declaration: impl Into<String>) -> Self {
        AnnotationError::InDeclaration {
            declaration: declaration.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, without declaration context
    pub fn root(&self) -> &AnnotationError {
        match self {
            AnnotationError::InDeclaration { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
