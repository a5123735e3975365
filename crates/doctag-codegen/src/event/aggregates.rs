//! Per-aggregate unit: apply contract, sum type and dispatch functions

use super::model::AggregateModel;
use crate::artifact::GENERATED_HEADER;

/// Render `gen_<aggregate>_aggregate.rs`.
pub(crate) fn render_aggregate(aggregate: &AggregateModel, runtime: &str) -> String {
    let name = &aggregate.name;
    let snake = aggregate.snake_name();
    let pascal = aggregate.pascal_name();
    let stem = aggregate.const_stem();
    let contract = format!("{pascal}Aggregate");
    let sum_type = format!("{pascal}AggregateEvent");
    let envelope = format!("{runtime}::Envelope");
    let error = format!("{runtime}::EventError");
    let mut code = String::new();

    code.push_str(GENERATED_HEADER);
    code.push_str("\n\n");

    // Registry constants
    code.push_str(&format!("/// Name of the `{name}` aggregate\n"));
    code.push_str(&format!("pub const {stem}_NAME: &str = {name:?};\n\n"));
    code.push_str(&format!(
        "/// Event type names of the `{name}` aggregate, in declaration order\n"
    ));
    code.push_str(&format!("pub const {stem}_EVENTS: &[&str] = &[\n"));
    for event in aggregate.event_names() {
        code.push_str(&format!("    {event:?},\n"));
    }
    code.push_str("];\n\n");

    // Apply contract
    code.push_str(&format!(
        "/// Apply contract of the `{name}` aggregate: one method per event type\n"
    ));
    code.push_str(&format!("pub trait {contract} {{\n"));
    for event in &aggregate.events {
        code.push_str(&format!(
            "    fn apply_{}(&mut self, event: {});\n",
            event.snake_name(),
            event.name
        ));
    }
    code.push_str("}\n\n");

    // Sum type
    code.push_str(&format!("/// A decoded event of the `{name}` aggregate\n"));
    code.push_str(&format!("pub enum {sum_type} {{\n"));
    for event in aggregate.event_names() {
        code.push_str(&format!("    {event}({event}),\n"));
    }
    code.push_str("}\n\n");

    // Unwrap one
    code.push_str(&format!("/// Decode one envelope of the `{name}` aggregate.\n"));
    code.push_str("///\n");
    code.push_str(&format!(
        "/// Fails with `UnexpectedEventType` when the tag names no `{name}` event.\n"
    ));
    code.push_str(&format!("pub fn unwrap_{snake}_event(\n"));
    code.push_str(&format!("    envelope: &{envelope},\n"));
    code.push_str(&format!(
        ") -> ::core::result::Result<{sum_type}, {error}> {{\n"
    ));
    code.push_str("    match envelope.event_type_name.as_str() {\n");
    for event in aggregate.event_names() {
        code.push_str(&format!("        {event:?} => envelope\n"));
        code.push_str(&format!("            .unwrap_event::<{event}>()\n"));
        code.push_str(&format!("            .map({sum_type}::{event}),\n"));
    }
    code.push_str(&format!(
        "        other => ::core::result::Result::Err({error}::unexpected_event_type(\n"
    ));
    code.push_str(&format!("            {stem}_NAME,\n"));
    code.push_str("            other,\n");
    code.push_str("        )),\n");
    code.push_str("    }\n");
    code.push_str("}\n\n");

    // Unwrap many
    code.push_str(&format!(
        "/// Decode a sequence of `{name}` envelopes, stopping at the first failure\n"
    ));
    code.push_str(&format!("pub fn unwrap_{snake}_events(\n"));
    code.push_str(&format!("    envelopes: &[{envelope}],\n"));
    code.push_str(&format!(
        ") -> ::core::result::Result<::std::vec::Vec<{sum_type}>, {error}> {{\n"
    ));
    code.push_str(&format!(
        "    envelopes.iter().map(unwrap_{snake}_event).collect()\n"
    ));
    code.push_str("}\n\n");

    // Apply one
    code.push_str(
        "/// Apply one envelope to `aggregate_root`; nothing is applied when it does not decode\n",
    );
    code.push_str(&format!(
        "pub fn apply_{snake}_event<A: {contract} + ?Sized>(\n"
    ));
    code.push_str(&format!("    envelope: &{envelope},\n"));
    code.push_str("    aggregate_root: &mut A,\n");
    code.push_str(&format!(") -> ::core::result::Result<(), {error}> {{\n"));
    code.push_str(&format!("    match unwrap_{snake}_event(envelope)? {{\n"));
    for event in &aggregate.events {
        code.push_str(&format!(
            "        {sum_type}::{}(event) => aggregate_root.apply_{}(event),\n",
            event.name,
            event.snake_name()
        ));
    }
    code.push_str("    }\n");
    code.push_str("    ::core::result::Result::Ok(())\n");
    code.push_str("}\n\n");

    // Apply many
    code.push_str("/// Apply envelopes in order, stopping at the first failure.\n");
    code.push_str("///\n");
    code.push_str(
        "/// Returns how many were applied; applies before a failure are kept.\n",
    );
    code.push_str(&format!(
        "pub fn apply_{snake}_events<A: {contract} + ?Sized>(\n"
    ));
    code.push_str(&format!("    envelopes: &[{envelope}],\n"));
    code.push_str("    aggregate_root: &mut A,\n");
    code.push_str(&format!(") -> ::core::result::Result<usize, {error}> {{\n"));
    code.push_str(&format!("    {runtime}::replay(envelopes, |envelope| {{\n"));
    code.push_str(&format!(
        "        apply_{snake}_event(envelope, &mut *aggregate_root)\n"
    ));
    code.push_str("    })\n");
    code.push_str("    .into_result()\n");
    code.push_str("}\n");

    code
}
