//! doctag-model - Declaration model shared by the extractor and the generators
//!
//! This crate holds the intermediate representation (IR) built from Rust source:
//! - [`Record`] and [`Field`] for structs and their fields
//! - [`Operation`] for free functions and methods, [`Interface`] for traits
//! - [`Enumeration`] and [`TypeAlias`] for typed constant groups and `type` items
//! - [`Annotation`] for the `@Kind(key = "value")` directives parsed from doc lines
//! - [`ParsedSources`] bundling all of the above plus extraction [`Diagnostic`]s
//!
//! The model is data-only. It is built once per generation run, enriched once by
//! the linker and then only read.

mod annotation;
mod enumeration;
mod operation;
mod record;
mod sources;

pub use annotation::Annotation;
pub use enumeration::{EnumLiteral, Enumeration, TypeAlias};
pub use operation::{Interface, Operation};
pub use record::{Field, Record};
pub use sources::{Diagnostic, DiagnosticKind, ParsedSources};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Annotation, Diagnostic, DiagnosticKind, EnumLiteral, Enumeration, Field, Interface,
        Operation, ParsedSources, Record, TypeAlias,
    };
}
