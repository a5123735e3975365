//! doctag-codegen - Generators over the annotated declaration model
//!
//! A [`Generator`] reads a linked, annotated [`ParsedSources`] and returns
//! [`Artifact`]s; [`write_artifacts`] puts them on disk. The crate ships the
//! event-sourcing generator ([`EventGenerator`]); other consumers of the model,
//! such as a REST scaffold generator, implement the same trait.
//!
//! # Example
//!
//! ```
//! use doctag_codegen::{GenerateOptions, generate_events};
//! use doctag_model::{Annotation, Field, ParsedSources, Record};
//!
//! let sources = ParsedSources {
//!     records: vec![Record {
//!         name: "AccountOpened".into(),
//!         fields: vec![Field::new("owner", "String")],
//!         annotations: vec![Annotation::new("Event").with_attribute("aggregate", "Account")],
//!         ..Record::default()
//!     }],
//!     ..ParsedSources::default()
//! };
//!
//! let artifacts = generate_events(&sources, &GenerateOptions::default()).unwrap();
//! let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
//! assert_eq!(
//!     names,
//!     vec![
//!         "gen_aggregates.rs",
//!         "gen_aggregates.json",
//!         "gen_account_aggregate.rs",
//!         "gen_account_opened_wrappers.rs",
//!         "gen_handler.rs",
//!     ]
//! );
//! ```

mod artifact;
mod error;
mod event;
mod filegen;
pub mod naming;

pub use artifact::{
    Artifact, ArtifactKind, DEFAULT_FILE_PREFIX, DEFAULT_RUNTIME_PATH, GENERATED_HEADER,
    GenerateOptions, InvalidAnnotationPolicy,
};
pub use error::{GenerateError, GenerateResult};
pub use event::{
    AGGREGATE_ATTRIBUTE, AggregateModel, EventGenerator, EventModel, UID_ATTRIBUTE,
    aggregate_name, collect_aggregates, generate_events, is_event,
};
pub use filegen::write_artifacts;

use doctag_model::ParsedSources;

/// A consumer of the annotated declaration model that emits source artifacts.
///
/// Generators only read the model, so several may run over the same one.
pub trait Generator {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Produce every artifact for `sources`
    fn generate(
        &self,
        sources: &ParsedSources,
        options: &GenerateOptions,
    ) -> GenerateResult<Vec<Artifact>>;
}
