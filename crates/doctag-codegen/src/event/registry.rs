//! Static aggregate registry, as Rust and as JSON

use super::model::AggregateModel;
use crate::artifact::GENERATED_HEADER;
use crate::error::{GenerateError, GenerateResult};
use serde::Serialize;

#[derive(Serialize)]
struct RegistryDocument<'a> {
    aggregates: Vec<RegistryEntry<'a>>,
}

#[derive(Serialize)]
struct RegistryEntry<'a> {
    name: &'a str,
    events: Vec<&'a str>,
}

/// Render `gen_aggregates.rs`.
pub(crate) fn render_registry(aggregates: &[AggregateModel]) -> String {
    let mut code = String::new();

    code.push_str(GENERATED_HEADER);
    code.push_str("\n\n");

    code.push_str("/// Event type names per aggregate, in first-encounter order\n");
    code.push_str("pub const AGGREGATE_EVENTS: &[(&str, &[&str])] = &[\n");
    for aggregate in aggregates {
        let events: Vec<String> = aggregate.event_names().map(|e| format!("{e:?}")).collect();
        code.push_str(&format!(
            "    ({:?}, &[{}]),\n",
            aggregate.name,
            events.join(", ")
        ));
    }
    code.push_str("];\n\n");

    code.push_str("/// Event type names of the aggregate called `aggregate_name`\n");
    code.push_str("pub fn aggregate_events(\n");
    code.push_str("    aggregate_name: &str,\n");
    code.push_str(") -> ::core::option::Option<&'static [&'static str]> {\n");
    code.push_str("    AGGREGATE_EVENTS\n");
    code.push_str("        .iter()\n");
    code.push_str("        .find(|(name, _)| *name == aggregate_name)\n");
    code.push_str("        .map(|(_, events)| *events)\n");
    code.push_str("}\n");

    code
}

/// Render `gen_aggregates.json`.
pub(crate) fn render_registry_json(
    aggregates: &[AggregateModel],
    file_name: &str,
) -> GenerateResult<String> {
    let document = RegistryDocument {
        aggregates: aggregates
            .iter()
            .map(|a| RegistryEntry {
                name: &a.name,
                events: a.event_names().collect(),
            })
            .collect(),
    };

    let mut json = serde_json::to_string_pretty(&document).map_err(|source| GenerateError::Json {
        file_name: file_name.to_string(),
        source,
    })?;
    json.push('\n');
    Ok(json)
}
