//! Grouping of annotated event records into aggregates

use super::handler::HANDLER_TRAIT;
use crate::artifact::InvalidAnnotationPolicy;
use crate::error::{GenerateError, GenerateResult};
use crate::naming::{is_identifier_like, to_pascal_case, to_snake_case, to_upper_snake_case};
use doctag_annotation::{AnnotationError, AnnotationRegistry, kinds};
use doctag_model::{Annotation, DiagnosticKind, ParsedSources, Record};
use serde::Serialize;
use std::collections::HashMap;

/// Attribute naming the aggregate an event belongs to
pub const AGGREGATE_ATTRIBUTE: &str = "aggregate";

/// Attribute naming the field that identifies the aggregate instance
pub const UID_ATTRIBUTE: &str = "uid";

/// One validated event record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventModel {
    /// Record name; also the event type name stamped into envelopes
    pub name: String,
    pub aggregate: String,
    /// Field whose `Display` value becomes the aggregate instance identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip)]
    pub filename: String,
}

impl EventModel {
    pub fn snake_name(&self) -> String {
        to_snake_case(&self.name)
    }

    /// `<EVENT>_EVENT_NAME`
    pub fn const_name(&self) -> String {
        format!("{}_EVENT_NAME", to_upper_snake_case(&self.name))
    }
}

/// An aggregate and its events, in first-encounter order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateModel {
    pub name: String,
    pub events: Vec<EventModel>,
}

impl AggregateModel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            events: Vec::new(),
        }
    }

    pub fn snake_name(&self) -> String {
        to_snake_case(&self.name)
    }

    /// Stem of the trait and sum type names
    pub fn pascal_name(&self) -> String {
        to_pascal_case(&self.name)
    }

    /// `<AGG>_AGGREGATE`, the stem of the aggregate constants
    pub fn const_stem(&self) -> String {
        format!("{}_AGGREGATE", to_upper_snake_case(&self.name))
    }

    /// Event type names, in order
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.name.as_str())
    }
}

/// The event annotation of `record`, if any
pub fn event_annotation(record: &Record) -> Option<&Annotation> {
    record.annotation(kinds::EVENT)
}

/// Validate the event annotation of `record` and build its model.
pub fn event_model(
    record: &Record,
    annotation: &Annotation,
    registry: &AnnotationRegistry,
) -> Result<EventModel, AnnotationError> {
    registry.validate(annotation)?;

    let aggregate = annotation.attribute(AGGREGATE_ATTRIBUTE).ok_or_else(|| {
        AnnotationError::MissingRequiredAttribute {
            kind: annotation.kind.clone(),
            attribute: AGGREGATE_ATTRIBUTE.to_string(),
        }
    })?;
    if !is_identifier_like(aggregate) {
        return Err(AnnotationError::invalid_attribute(
            &annotation.kind,
            AGGREGATE_ATTRIBUTE,
            aggregate,
            "expected an identifier-like name",
        ));
    }

    let uid = match annotation.attribute(UID_ATTRIBUTE) {
        None => None,
        Some(uid) => {
            let invalid = |reason: &str| {
                AnnotationError::invalid_attribute(&annotation.kind, UID_ATTRIBUTE, uid, reason)
            };
            let field = record
                .field(uid)
                .ok_or_else(|| invalid("no field of that name"))?;
            if !field.is_resolved() || !field.is_scalar() || field.is_map() {
                return Err(invalid("the field must have a plain scalar type"));
            }
            Some(uid.to_string())
        }
    };

    Ok(EventModel {
        name: record.name.clone(),
        aggregate: aggregate.to_string(),
        uid,
        filename: record.filename.clone(),
    })
}

/// Collect every event record of the model, grouped by aggregate.
///
/// Aggregates and the events within them keep the order in which the
/// records appear in the model. Declarations whose annotations did not
/// resolve, and events that fail validation, abort the run or are skipped
/// according to `policy`.
pub fn collect_aggregates(
    sources: &ParsedSources,
    registry: &AnnotationRegistry,
    policy: InvalidAnnotationPolicy,
) -> GenerateResult<Vec<AggregateModel>> {
    // documentation that failed to resolve left its declaration unannotated
    for diagnostic in sources.diagnostics_of(DiagnosticKind::InvalidAnnotation) {
        match policy {
            InvalidAnnotationPolicy::Abort => {
                return Err(GenerateError::InvalidAnnotation {
                    declaration: diagnostic.declaration.clone(),
                    filename: diagnostic.filename.clone(),
                    message: diagnostic.message.clone(),
                });
            }
            InvalidAnnotationPolicy::Skip => {
                tracing::warn!(
                    "Skipping `{}` ({}): {}",
                    diagnostic.declaration,
                    diagnostic.filename,
                    diagnostic.message
                );
            }
        }
    }

    let mut aggregates: Vec<AggregateModel> = Vec::new();
    let mut seen: HashMap<String, &Record> = HashMap::new();

    for record in &sources.records {
        let Some(annotation) = event_annotation(record) else {
            continue;
        };

        let event = match event_model(record, annotation, registry) {
            Ok(event) => event,
            Err(source) => match policy {
                InvalidAnnotationPolicy::Abort => {
                    return Err(GenerateError::annotation(&record.name, source));
                }
                InvalidAnnotationPolicy::Skip => {
                    tracing::warn!("Skipping event `{}` ({}): {}", record.name, record.filename, source);
                    continue;
                }
            },
        };

        if let Some(first) = seen.insert(event.snake_name(), record) {
            return Err(GenerateError::DuplicateEvent {
                name: record.name.clone(),
                first: first.filename.clone(),
                second: record.filename.clone(),
            });
        }

        match aggregates.iter_mut().find(|a| a.name == event.aggregate) {
            Some(aggregate) => aggregate.events.push(event),
            None => {
                let mut aggregate = AggregateModel::new(&event.aggregate);
                if let Some(other) = aggregates.iter().find(|a| {
                    a.snake_name() == aggregate.snake_name()
                        || a.pascal_name() == aggregate.pascal_name()
                }) {
                    return Err(GenerateError::AggregateNameCollision {
                        first: other.name.clone(),
                        second: aggregate.name,
                        generated: format!("{}Aggregate", other.pascal_name()),
                    });
                }
                aggregate.events.push(event);
                aggregates.push(aggregate);
            }
        }
    }

    check_generated_names(&aggregates)?;

    tracing::debug!(
        "Collected {} aggregate(s) with {} event(s)",
        aggregates.len(),
        aggregates.iter().map(|a| a.events.len()).sum::<usize>()
    );
    Ok(aggregates)
}

/// Event names that would shadow an identifier generated for an aggregate
fn check_generated_names(aggregates: &[AggregateModel]) -> GenerateResult<()> {
    if let Some(event) = aggregates
        .iter()
        .flat_map(|a| &a.events)
        .find(|e| e.name == HANDLER_TRAIT)
    {
        return Err(GenerateError::AggregateNameCollision {
            first: event.aggregate.clone(),
            second: event.name.clone(),
            generated: HANDLER_TRAIT.to_string(),
        });
    }

    for aggregate in aggregates {
        let snake = aggregate.snake_name();
        let pascal = aggregate.pascal_name();
        let reserved_fns = [format!("{snake}_event"), format!("{snake}_events")];
        let reserved_types = [format!("{pascal}Aggregate"), format!("{pascal}AggregateEvent")];

        for event in aggregates.iter().flat_map(|a| &a.events) {
            let clash = if reserved_fns.contains(&event.snake_name()) {
                Some(format!("unwrap_{}", event.snake_name()))
            } else if reserved_types.contains(&event.name) {
                Some(event.name.clone())
            } else {
                None
            };
            if let Some(generated) = clash {
                return Err(GenerateError::AggregateNameCollision {
                    first: aggregate.name.clone(),
                    second: event.name.clone(),
                    generated,
                });
            }
        }
    }
    Ok(())
}
