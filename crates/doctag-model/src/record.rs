//! Records (structs) and their fields

use crate::annotation::{self, Annotation};
use crate::operation::Operation;
use serde::{Deserialize, Serialize};

/// Container types resolved as maps
const MAP_TYPES: &[&str] = &["HashMap", "BTreeMap"];

/// A struct declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier of the declaring package (directory name)
    pub package_name: String,

    /// Source file the record was extracted from
    pub filename: String,

    /// Documentation lines, unparsed
    #[serde(default)]
    pub doc_lines: Vec<String>,

    /// Struct name
    pub name: String,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Methods attached by the linker
    #[serde(default)]
    pub operations: Vec<Operation>,

    /// Plain comment trailing the declaration
    #[serde(default)]
    pub comment_lines: Vec<String>,

    /// Annotations resolved from `doc_lines`
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Record {
    /// Look up the annotation of the given kind
    pub fn annotation(&self, kind: &str) -> Option<&Annotation> {
        annotation::find(&self.annotations, kind)
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up an attached operation by name
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|o| o.name == name)
    }
}

/// A struct field, function argument or function result.
///
/// The shape flags compose: `is_slice && is_pointer` is a slice of pointers.
/// An empty `type_name` means the type expression had no supported shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Fully qualified path of the owning package, empty unless imported
    #[serde(default)]
    pub package_name: String,

    /// Documentation lines, unparsed
    #[serde(default)]
    pub doc_lines: Vec<String>,

    /// Field or argument name, empty for results
    pub name: String,

    /// Resolved element type name, possibly qualified (`money::Amount`)
    pub type_name: String,

    /// `Vec<T>`
    #[serde(default)]
    pub is_slice: bool,

    /// `Box<T>`, `Option<T>` or a reference
    #[serde(default)]
    pub is_pointer: bool,

    /// Raw `#[serde(...)]` attribute content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Plain comment trailing the field
    #[serde(default)]
    pub comment_lines: Vec<String>,

    /// Annotations resolved from `doc_lines`
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Field {
    /// Create a scalar field
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Mark the field as a slice
    pub fn slice(mut self) -> Self {
        self.is_slice = true;
        self
    }

    /// Mark the field as a pointer
    pub fn pointer(mut self) -> Self {
        self.is_pointer = true;
        self
    }

    /// Whether the type expression resolved to a supported shape
    pub fn is_resolved(&self) -> bool {
        !self.type_name.is_empty()
    }

    /// Neither a slice nor a pointer
    pub fn is_scalar(&self) -> bool {
        !self.is_slice && !self.is_pointer
    }

    /// A `HashMap<K, V>` or `BTreeMap<K, V>` (maps carry no shape flags)
    pub fn is_map(&self) -> bool {
        self.is_scalar()
            && MAP_TYPES
                .iter()
                .any(|map| self.type_name.strip_prefix(map).is_some_and(|rest| rest.starts_with('<')))
    }

    /// Look up the annotation of the given kind
    pub fn annotation(&self, kind: &str) -> Option<&Annotation> {
        annotation::find(&self.annotations, kind)
    }
}
