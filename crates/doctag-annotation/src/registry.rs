//! Registered annotation kinds and their attribute contracts

use crate::error::{AnnotationError, AnnotationResult};
use crate::kinds;
use doctag_model::Annotation;
use std::collections::BTreeMap;

/// Declares one annotation kind: which attributes it must and may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDescriptor {
    pub kind: String,
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

impl AnnotationDescriptor {
    /// Create a descriptor without attributes
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            required: Vec::new(),
            optional: Vec::new(),
        }
    }

    /// Add a mandatory attribute
    pub fn required(mut self, attribute: impl Into<String>) -> Self {
        self.required.push(attribute.into());
        self
    }

    /// Add an optional attribute
    pub fn optional(mut self, attribute: impl Into<String>) -> Self {
        self.optional.push(attribute.into());
        self
    }

    /// Whether `attribute` is declared, required or optional
    pub fn accepts(&self, attribute: &str) -> bool {
        self.required
            .iter()
            .chain(self.optional.iter())
            .any(|a| a == attribute)
    }
}

/// The set of annotation kinds recognized in documentation lines.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRegistry {
    descriptors: BTreeMap<String, AnnotationDescriptor>,
}

impl AnnotationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the event and REST kinds
    pub fn standard() -> Self {
        Self::new()
            .with(
                AnnotationDescriptor::new(kinds::EVENT)
                    .required("aggregate")
                    .optional("uid"),
            )
            .with(AnnotationDescriptor::new(kinds::REST_SERVICE).required("path"))
            .with(
                AnnotationDescriptor::new(kinds::REST_OPERATION)
                    .required("method")
                    .required("path")
                    .optional("format")
                    .optional("filename")
                    .optional("optionalargs"),
            )
    }

    /// Add a kind, replacing an earlier descriptor of the same kind
    pub fn with(mut self, descriptor: AnnotationDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Add a kind, replacing an earlier descriptor of the same kind
    pub fn register(&mut self, descriptor: AnnotationDescriptor) {
        self.descriptors.insert(descriptor.kind.clone(), descriptor);
    }

    /// Whether `kind` is registered
    pub fn contains(&self, kind: &str) -> bool {
        self.descriptors.contains_key(kind)
    }

    /// Look up the descriptor of `kind`
    pub fn get(&self, kind: &str) -> Option<&AnnotationDescriptor> {
        self.descriptors.get(kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.descriptors.keys().map(String::as_str)
    }

    /// Check an annotation against its kind's contract.
    ///
    /// Reports the first missing required attribute (in declaration order),
    /// then the first unknown attribute (in key order).
    pub fn validate(&self, annotation: &Annotation) -> AnnotationResult<()> {
        let descriptor =
            self.get(&annotation.kind)
                .ok_or_else(|| AnnotationError::UnregisteredKind {
                    kind: annotation.kind.clone(),
                })?;

        if let Some(missing) = descriptor
            .required
            .iter()
            .find(|attribute| !annotation.has_attribute(attribute))
        {
            return Err(AnnotationError::MissingRequiredAttribute {
                kind: annotation.kind.clone(),
                attribute: missing.clone(),
            });
        }

        if let Some(unknown) = annotation
            .attributes
            .keys()
            .find(|attribute| !descriptor.accepts(attribute))
        {
            return Err(AnnotationError::UnknownAttribute {
                kind: annotation.kind.clone(),
                attribute: unknown.clone(),
            });
        }

        Ok(())
    }
}
