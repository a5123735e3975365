//! Envelope handler unit: one default-ignoring method per event, any aggregate

use super::model::AggregateModel;
use crate::artifact::GENERATED_HEADER;

/// Name of the generated handler trait
pub(crate) const HANDLER_TRAIT: &str = "EventHandler";

/// Render `gen_handler.rs`.
pub(crate) fn render_handler(aggregates: &[AggregateModel], runtime: &str) -> String {
    let envelope = format!("{runtime}::Envelope");
    let mut code = String::new();

    code.push_str(GENERATED_HEADER);
    code.push_str("\n\n");

    // Handler contract
    code.push_str("/// Consumer of envelopes from every aggregate.\n");
    code.push_str("///\n");
    code.push_str("/// Each method ignores its event unless overridden.\n");
    code.push_str(&format!("pub trait {HANDLER_TRAIT} {{\n"));
    for (index, event) in aggregates.iter().flat_map(|a| &a.events).enumerate() {
        if index > 0 {
            code.push('\n');
        }
        code.push_str(&format!(
            "    /// A [`{}`] of the `{}` aggregate\n",
            event.name, event.aggregate
        ));
        code.push_str(&format!(
            "    fn on_{}(&mut self, _envelope: &{envelope}, _event: {}) {{}}\n",
            event.snake_name(),
            event.name
        ));
    }
    code.push_str("}\n\n");

    // Routing
    code.push_str("/// Decode `envelope` and pass it to the matching method of `handler`.\n");
    code.push_str("///\n");
    code.push_str(
        "/// Returns `Ok(false)` without calling `handler` when no event type has the envelope's tag.\n",
    );
    code.push_str(&format!(
        "pub fn handle_event<H: {HANDLER_TRAIT} + ?Sized>(\n"
    ));
    code.push_str(&format!("    envelope: &{envelope},\n"));
    code.push_str("    handler: &mut H,\n");
    code.push_str(&format!(
        ") -> ::core::result::Result<bool, {runtime}::EventError> {{\n"
    ));
    code.push_str("    match envelope.event_type_name.as_str() {\n");
    for event in aggregates.iter().flat_map(|a| &a.events) {
        code.push_str(&format!("        {:?} => {{\n", event.name));
        code.push_str(&format!(
            "            let event = envelope.unwrap_event::<{}>()?;\n",
            event.name
        ));
        code.push_str(&format!(
            "            handler.on_{}(envelope, event);\n",
            event.snake_name()
        ));
        code.push_str("        }\n");
    }
    code.push_str("        _ => return ::core::result::Result::Ok(false),\n");
    code.push_str("    }\n");
    code.push_str("    ::core::result::Result::Ok(true)\n");
    code.push_str("}\n");

    code
}
