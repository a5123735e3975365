//! The complete model of one extraction run

use crate::enumeration::{Enumeration, TypeAlias};
use crate::operation::{Interface, Operation};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything extracted from a file or a directory of files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSources {
    #[serde(default)]
    pub records: Vec<Record>,

    /// Every operation, methods included
    #[serde(default)]
    pub operations: Vec<Operation>,

    #[serde(default)]
    pub interfaces: Vec<Interface>,

    #[serde(default)]
    pub type_aliases: Vec<TypeAlias>,

    #[serde(default)]
    pub enumerations: Vec<Enumeration>,

    /// Declarations that could not be fully resolved
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedSources {
    /// Look up a record by name
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Look up an interface by name
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Look up an enumeration by name
    pub fn enumeration(&self, name: &str) -> Option<&Enumeration> {
        self.enumerations.iter().find(|e| e.name == name)
    }

    /// Look up a type alias by name
    pub fn type_alias(&self, name: &str) -> Option<&TypeAlias> {
        self.type_aliases.iter().find(|t| t.name == name)
    }

    /// Free functions only (operations without a receiver)
    pub fn functions(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|o| !o.is_method())
    }

    /// Diagnostics of one kind
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Whether nothing at all was extracted
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
            && self.operations.is_empty()
            && self.interfaces.is_empty()
            && self.type_aliases.is_empty()
            && self.enumerations.is_empty()
    }
}

/// Category of a [`Diagnostic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A field type matched none of the supported shapes
    UnresolvedFieldShape,
    /// A method whose receiver type has no matching record
    OrphanedOperation,
    /// Documentation that names a registered annotation kind but is not a valid annotation
    InvalidAnnotation,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnresolvedFieldShape => write!(f, "unresolved field shape"),
            DiagnosticKind::OrphanedOperation => write!(f, "orphaned operation"),
            DiagnosticKind::InvalidAnnotation => write!(f, "invalid annotation"),
        }
    }
}

/// A declaration the extractor or linker had to leave incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub filename: String,

    /// Name of the affected declaration (`Record.field`, `Type::method`, ...)
    pub declaration: String,

    pub message: String,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        filename: impl Into<String>,
        declaration: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            filename: filename.into(),
            declaration: declaration.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} `{}`: {}",
            self.filename, self.kind, self.declaration, self.message
        )
    }
}
