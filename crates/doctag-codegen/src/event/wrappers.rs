//! Per-event wrapper unit: event name constant, `Event` impl and envelope conversions

use super::model::EventModel;
use crate::artifact::GENERATED_HEADER;

/// Render `gen_<event>_wrappers.rs`.
pub(crate) fn render_wrappers(event: &EventModel, runtime: &str) -> String {
    let name = &event.name;
    let snake = event.snake_name();
    let const_name = event.const_name();
    let mut code = String::new();

    code.push_str(GENERATED_HEADER);
    code.push_str("\n\n");

    // Event type name
    code.push_str(&format!("/// Event type name of [`{name}`]\n"));
    code.push_str(&format!("pub const {const_name}: &str = {name:?};\n\n"));

    // Event impl
    code.push_str(&format!("impl {runtime}::Event for {name} {{\n"));
    code.push_str(&format!(
        "    const EVENT_TYPE_NAME: &'static str = {const_name};\n"
    ));
    code.push_str(&format!(
        "    const AGGREGATE_NAME: &'static str = {:?};\n",
        event.aggregate
    ));
    if let Some(uid) = &event.uid {
        code.push_str("\n    fn aggregate_uid(&self) -> ::std::string::String {\n");
        code.push_str(&format!(
            "        ::std::string::ToString::to_string(&self.{uid})\n"
        ));
        code.push_str("    }\n");
    }
    code.push_str("}\n\n");

    // Wrap
    code.push_str(&format!("impl {name} {{\n"));
    code.push_str("    /// Serialize into a new envelope stamped from `ctx`\n");
    code.push_str("    pub fn wrap(\n");
    code.push_str("        &self,\n");
    code.push_str(&format!("        ctx: &{runtime}::RequestContext,\n"));
    code.push_str(&format!(
        "    ) -> ::core::result::Result<{runtime}::Envelope, {runtime}::EventError> {{\n"
    ));
    code.push_str(&format!("        {runtime}::Envelope::wrap(self, ctx)\n"));
    code.push_str("    }\n");
    code.push_str("}\n\n");

    // Is-type predicate
    code.push_str(&format!("/// Whether `envelope` carries a [`{name}`]\n"));
    code.push_str(&format!(
        "pub fn is_{snake}(envelope: &{runtime}::Envelope) -> bool {{\n"
    ));
    code.push_str(&format!("    envelope.is_event::<{name}>()\n"));
    code.push_str("}\n\n");

    // Get-if-is-type accessor
    code.push_str(&format!(
        "/// Decode `envelope` when it carries a [`{name}`] that decodes\n"
    ));
    code.push_str(&format!(
        "pub fn get_if_is_{snake}(envelope: &{runtime}::Envelope) -> ::core::option::Option<{name}> {{\n"
    ));
    code.push_str(&format!("    envelope.get_if_event::<{name}>()\n"));
    code.push_str("}\n\n");

    // Unwrap
    code.push_str(&format!("/// Decode `envelope` as a [`{name}`].\n"));
    code.push_str("///\n");
    code.push_str("/// Fails when the envelope carries another event type or the payload does not decode.\n");
    code.push_str(&format!("pub fn unwrap_{snake}(\n"));
    code.push_str(&format!("    envelope: &{runtime}::Envelope,\n"));
    code.push_str(&format!(
        ") -> ::core::result::Result<{name}, {runtime}::EventError> {{\n"
    ));
    code.push_str(&format!("    envelope.unwrap_event::<{name}>()\n"));
    code.push_str("}\n");

    code
}
