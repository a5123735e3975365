//! Event-sourcing generator.
//!
//! Every record documented with `@Event(aggregate = "Name")` becomes an event
//! type of that aggregate. The generator emits:
//!
//! | File | Contents |
//! |------|----------|
//! | `gen_aggregates.rs` | `AGGREGATE_EVENTS` registry and `aggregate_events(name)` |
//! | `gen_aggregates.json` | the same registry for non-Rust tooling |
//! | `gen_<agg>_aggregate.rs` | apply contract, sum type, `unwrap_*`/`apply_*` dispatch |
//! | `gen_<event>_wrappers.rs` | `Event` impl, `wrap`, `is_*`, `get_if_is_*`, `unwrap_*` |
//! | `gen_handler.rs` | `EventHandler` trait over every event and `handle_event` routing |
//! | `gen_<event>_wrappers_tests.rs` | wrapper round-trip tests, with [`GenerateOptions::wrapper_tests`] |
//!
//! The handler unit is only emitted when there is at least one event.
//!
//! Rust units reference event types by bare name and the runtime crate by an
//! absolute path, so they are meant to be `include!`d into the module that
//! declares the events.

mod aggregates;
mod handler;
mod model;
mod registry;
mod wrappers;

pub use model::{
    AGGREGATE_ATTRIBUTE, AggregateModel, EventModel, UID_ATTRIBUTE, collect_aggregates,
};

use crate::Generator;
use crate::artifact::{Artifact, GenerateOptions};
use crate::error::GenerateResult;
use doctag_annotation::AnnotationRegistry;
use doctag_model::{ParsedSources, Record};

/// Whether `record` carries an event annotation
pub fn is_event(record: &Record) -> bool {
    model::event_annotation(record).is_some()
}

/// The aggregate named by the event annotation of `record`
pub fn aggregate_name(record: &Record) -> Option<&str> {
    model::event_annotation(record).and_then(|a| a.attribute(AGGREGATE_ATTRIBUTE))
}

/// Generator for event wrappers, aggregate dispatch and the aggregate registry
#[derive(Debug, Clone)]
pub struct EventGenerator {
    registry: AnnotationRegistry,
}

impl Default for EventGenerator {
    fn default() -> Self {
        Self {
            registry: AnnotationRegistry::standard(),
        }
    }
}

impl EventGenerator {
    /// Generator validating against the standard annotation kinds
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate annotations against `registry` instead
    pub fn with_registry(mut self, registry: AnnotationRegistry) -> Self {
        self.registry = registry;
        self
    }
}

impl Generator for EventGenerator {
    fn name(&self) -> &'static str {
        "events"
    }

    fn generate(
        &self,
        sources: &ParsedSources,
        options: &GenerateOptions,
    ) -> GenerateResult<Vec<Artifact>> {
        let aggregates = collect_aggregates(sources, &self.registry, options.policy)?;
        let runtime = options.runtime_path.as_str();
        let mut artifacts = Vec::new();

        artifacts.push(Artifact::rust(
            options.file_name("aggregates", "rs"),
            registry::render_registry(&aggregates),
        )?);
        let json_name = options.file_name("aggregates", "json");
        let json = registry::render_registry_json(&aggregates, &json_name)?;
        artifacts.push(Artifact::json(json_name, json));

        for aggregate in &aggregates {
            artifacts.push(Artifact::rust(
                options.file_name(&format!("{}_aggregate", aggregate.snake_name()), "rs"),
                aggregates::render_aggregate(aggregate, runtime),
            )?);
        }

        for event in aggregates.iter().flat_map(|a| &a.events) {
            artifacts.push(Artifact::rust(
                options.file_name(&format!("{}_wrappers", event.snake_name()), "rs"),
                wrappers::render_wrappers(event, runtime),
            )?);
        }

        if aggregates.iter().any(|a| !a.events.is_empty()) {
            artifacts.push(Artifact::rust(
                options.file_name("handler", "rs"),
                handler::render_handler(&aggregates, runtime),
            )?);
        }

        if options.wrapper_tests {
            for event in aggregates.iter().flat_map(|a| &a.events) {
                artifacts.push(Artifact::rust(
                    options.file_name(&format!("{}_wrappers_tests", event.snake_name()), "rs"),
                    wrapper_tests::render_wrapper_tests(event, runtime),
                )?);
            }
        }

        for artifact in &artifacts {
            tracing::info!("Generated {}", artifact.file_name);
        }
        Ok(artifacts)
    }
}

/// Run the [`EventGenerator`] with the standard annotation kinds
pub fn generate_events(
    sources: &ParsedSources,
    options: &GenerateOptions,
) -> GenerateResult<Vec<Artifact>> {
    EventGenerator::new().generate(sources, options)
}

#[cfg(test)]
#[path = "event/event_tests.rs"]
mod event_tests;
