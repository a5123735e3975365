//! By-kind annotation lookup and the model-wide attach pass

use crate::error::{AnnotationError, AnnotationResult};
use crate::parser::parse_annotation;
use crate::registry::AnnotationRegistry;
use doctag_model::{Annotation, Diagnostic, DiagnosticKind, Field, Operation, ParsedSources};

/// Parse every annotation in a declaration's documentation lines.
///
/// Annotations come back in line order. Two annotations of the same kind are
/// an error.
pub fn resolve_annotations(
    doc_lines: &[String],
    registry: &AnnotationRegistry,
) -> AnnotationResult<Vec<Annotation>> {
    let mut annotations: Vec<Annotation> = Vec::new();
    for line in doc_lines {
        let Some(annotation) = parse_annotation(line, registry)? else {
            continue;
        };
        if annotations.iter().any(|a| a.kind == annotation.kind) {
            return Err(AnnotationError::DuplicateAnnotation {
                kind: annotation.kind,
            });
        }
        annotations.push(annotation);
    }
    Ok(annotations)
}

/// Find the single annotation of `kind` in a declaration's documentation lines.
pub fn resolve_annotation_by_kind(
    doc_lines: &[String],
    kind: &str,
    registry: &AnnotationRegistry,
) -> AnnotationResult<Option<Annotation>> {
    Ok(resolve_annotations(doc_lines, registry)?
        .into_iter()
        .find(|a| a.kind == kind))
}

/// Parse the documentation of every declaration in the model and store the
/// resulting annotations on it.
///
/// A declaration whose documentation does not resolve keeps no annotations;
/// the failure is recorded as a [`DiagnosticKind::InvalidAnnotation`]
/// diagnostic and returned, located on the declaration. Other declarations
/// are unaffected.
pub fn attach_annotations(
    sources: &mut ParsedSources,
    registry: &AnnotationRegistry,
) -> Vec<AnnotationError> {
    let mut pass = AttachPass::new(registry);

    for record in &mut sources.records {
        pass.annotate(&record.doc_lines, &mut record.annotations, &record.name, &record.filename);
        for field in &mut record.fields {
            let declaration = format!("{}.{}", record.name, field.name);
            pass.annotate_field(field, &declaration, &record.filename);
        }
        for operation in &mut record.operations {
            pass.annotate_operation(operation, None);
        }
    }

    for operation in &mut sources.operations {
        pass.annotate_operation(operation, None);
    }

    for interface in &mut sources.interfaces {
        pass.annotate(
            &interface.doc_lines,
            &mut interface.annotations,
            &interface.name,
            &interface.filename,
        );
        for method in &mut interface.methods {
            pass.annotate_operation(method, Some(&interface.name));
        }
    }

    for alias in &mut sources.type_aliases {
        pass.annotate(&alias.doc_lines, &mut alias.annotations, &alias.name, &alias.filename);
    }

    for enumeration in &mut sources.enumerations {
        pass.annotate(
            &enumeration.doc_lines,
            &mut enumeration.annotations,
            &enumeration.name,
            &enumeration.filename,
        );
    }

    tracing::debug!(
        "Attached {} annotation(s), {} declaration(s) invalid",
        pass.attached,
        pass.errors.len()
    );

    // a rerun replaces the previous pass's findings
    sources
        .diagnostics
        .retain(|d| d.kind != DiagnosticKind::InvalidAnnotation);
    sources.diagnostics.extend(pass.diagnostics);
    pass.errors
}

struct AttachPass<'r> {
    registry: &'r AnnotationRegistry,
    attached: usize,
    diagnostics: Vec<Diagnostic>,
    errors: Vec<AnnotationError>,
}

impl<'r> AttachPass<'r> {
    fn new(registry: &'r AnnotationRegistry) -> Self {
        Self {
            registry,
            attached: 0,
            diagnostics: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn annotate(
        &mut self,
        doc_lines: &[String],
        target: &mut Vec<Annotation>,
        declaration: &str,
        filename: &str,
    ) {
        match resolve_annotations(doc_lines, self.registry) {
            Ok(annotations) => {
                for annotation in &annotations {
                    tracing::trace!("@{} on `{}`", annotation.kind, declaration);
                }
                self.attached += annotations.len();
                *target = annotations;
            }
            Err(err) => {
                let diagnostic = Diagnostic::new(
                    DiagnosticKind::InvalidAnnotation,
                    filename,
                    declaration,
                    err.to_string(),
                );
                tracing::warn!("{}", diagnostic);
                target.clear();
                self.diagnostics.push(diagnostic);
                self.errors.push(err.in_declaration(declaration));
            }
        }
    }

    fn annotate_field(&mut self, field: &mut Field, declaration: &str, filename: &str) {
        self.annotate(&field.doc_lines, &mut field.annotations, declaration, filename);
    }

    fn annotate_operation(&mut self, operation: &mut Operation, owner: Option<&str>) {
        let declaration = match owner.or(operation.receiver_type()) {
            Some(receiver) => format!("{receiver}::{}", operation.name),
            None => operation.name.clone(),
        };

        self.annotate(
            &operation.doc_lines,
            &mut operation.annotations,
            &declaration,
            &operation.filename,
        );
        for arg in operation
            .input_args
            .iter_mut()
            .chain(operation.output_args.iter_mut())
        {
            let arg_declaration = format!("{declaration}.{}", arg.name);
            self.annotate_field(arg, &arg_declaration, &operation.filename);
        }
    }
}

#[cfg(test)]
#[path = "resolve/resolve_tests.rs"]
mod resolve_tests;
