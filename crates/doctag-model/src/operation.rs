//! Operations (functions and methods) and interfaces (traits)

use crate::annotation::{self, Annotation};
use crate::record::Field;
use serde::{Deserialize, Serialize};

/// A function or method signature.
///
/// `related_record` is the receiver: `Some` for functions declared in an
/// `impl` block, `None` for free functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub package_name: String,
    pub filename: String,

    #[serde(default)]
    pub doc_lines: Vec<String>,

    /// Receiver; its `type_name` names the record the method belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_record: Option<Field>,

    pub name: String,

    #[serde(default)]
    pub input_args: Vec<Field>,

    #[serde(default)]
    pub output_args: Vec<Field>,

    #[serde(default)]
    pub comment_lines: Vec<String>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Operation {
    /// Whether this is a method (has a receiver)
    pub fn is_method(&self) -> bool {
        self.related_record.is_some()
    }

    /// Name of the receiver's type, if any
    pub fn receiver_type(&self) -> Option<&str> {
        self.related_record.as_ref().map(|r| r.type_name.as_str())
    }

    /// Look up the annotation of the given kind
    pub fn annotation(&self, kind: &str) -> Option<&Annotation> {
        annotation::find(&self.annotations, kind)
    }
}

/// A trait declaration and its method set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub package_name: String,
    pub filename: String,

    #[serde(default)]
    pub doc_lines: Vec<String>,

    pub name: String,

    /// Trait methods in declaration order
    #[serde(default)]
    pub methods: Vec<Operation>,

    #[serde(default)]
    pub comment_lines: Vec<String>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Interface {
    /// Look up the annotation of the given kind
    pub fn annotation(&self, kind: &str) -> Option<&Annotation> {
        annotation::find(&self.annotations, kind)
    }
}
