//! # doctag
//!
//! Generate event-sourcing scaffolding from annotations in Rust doc comments.
//!
//! Mark event records with an `@Event` line in their documentation:
//!
//! ```ignore
//! /// Money was paid into an account
//! /// @Event(aggregate = "Account", uid = "account_uid")
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! pub struct FundsDeposited {
//!     pub account_uid: String,
//!     pub amount: u64,
//! }
//! ```
//!
//! and run the pipeline, typically from a build script:
//!
//! ```no_run
//! use doctag::{Pipeline, PipelineOptions};
//! use std::path::Path;
//!
//! let pipeline = Pipeline::new(PipelineOptions::default());
//! pipeline.write(Path::new("src/events.rs"), Path::new("target/generated"))?;
//! # Ok::<(), doctag::Error>(())
//! ```
//!
//! Each event gets an `Event` impl plus `wrap`, `is_*`, `get_if_is_*` and
//! `unwrap_*`; each aggregate gets an apply contract, a sum type and
//! `apply_*_event(s)` dispatch. The generated units use `doctag-runtime`.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`doctag_model`] - The declaration model
//! - [`doctag_annotation`] - Annotation grammar and registry
//! - [`doctag_parser`] - Source extractor and linker
//! - [`doctag_codegen`] - Generators and artifact writer

mod error;
mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineOptions};

// Re-export stage types
pub use doctag_annotation::{Annotation, AnnotationDescriptor, AnnotationError, AnnotationRegistry};
pub use doctag_codegen::{
    Artifact, ArtifactKind, EventGenerator, GenerateError, GenerateOptions, Generator,
    InvalidAnnotationPolicy, write_artifacts,
};
pub use doctag_model::{Diagnostic, DiagnosticKind, ParsedSources};
pub use doctag_parser::{ExtractError, ExtractOptions};

// Re-export the stage crates
pub use doctag_annotation as annotation;
pub use doctag_codegen as codegen;
pub use doctag_model as model;
pub use doctag_parser as parser;
