//! Cross-reference linker
//!
//! A single enrichment pass run after extraction (and after annotations are
//! attached): methods are copied onto the record they belong to, and type
//! alias documentation is copied onto the same-named enumeration.

use doctag_model::{Diagnostic, DiagnosticKind, ParsedSources};

/// Link methods to records and alias documentation to enumerations.
///
/// Methods whose receiver type has no record stay in the flat operation list
/// and are reported as [`DiagnosticKind::OrphanedOperation`]. Linking twice
/// gives the same result as linking once.
pub fn link(sources: &mut ParsedSources) {
    for record in &mut sources.records {
        record.operations.clear();
    }
    sources
        .diagnostics
        .retain(|d| d.kind != DiagnosticKind::OrphanedOperation);

    let mut attached = 0usize;
    for operation in &sources.operations {
        let Some(receiver_type) = operation.receiver_type() else {
            continue;
        };

        match sources.records.iter_mut().find(|r| r.name == receiver_type) {
            Some(record) => {
                record.operations.push(operation.clone());
                attached += 1;
            }
            None => {
                let diagnostic = Diagnostic::new(
                    DiagnosticKind::OrphanedOperation,
                    operation.filename.clone(),
                    format!("{receiver_type}::{}", operation.name),
                    format!("no record named `{receiver_type}`"),
                );
                tracing::warn!("{}", diagnostic);
                sources.diagnostics.push(diagnostic);
            }
        }
    }

    let mut documented = 0usize;
    for enumeration in &mut sources.enumerations {
        if let Some(alias) = sources
            .type_aliases
            .iter()
            .find(|alias| alias.name == enumeration.name)
        {
            enumeration.doc_lines = alias.doc_lines.clone();
            enumeration.annotations = alias.annotations.clone();
            documented += 1;
        } else {
            tracing::debug!(
                "Enumeration `{}` has no type alias, it stays undocumented",
                enumeration.name
            );
        }
    }

    tracing::debug!(
        "Linked {} operation(s) to records, documented {} enumeration(s)",
        attached,
        documented
    );
}

#[cfg(test)]
#[path = "link/link_tests.rs"]
mod link_tests;
