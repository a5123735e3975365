#![allow(non_snake_case)]

use super::*;
use doctag_model::{DiagnosticKind, Interface, Record, TypeAlias};

fn lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

#[test]
fn resolve_annotation_by_kind___mixed_kinds___finds_requested_one() {
    let registry = AnnotationRegistry::standard();
    let doc = lines(&[
        "Opened when a customer signs the contract.",
        r#"@RestService(path = "/accounts")"#,
        r#"@Event(aggregate = "Account")"#,
    ]);

    let event = resolve_annotation_by_kind(&doc, "Event", &registry)
        .unwrap()
        .unwrap();
    let rest = resolve_annotation_by_kind(&doc, "RestService", &registry)
        .unwrap()
        .unwrap();

    assert_eq!(event.attribute("aggregate"), Some("Account"));
    assert_eq!(rest.attribute("path"), Some("/accounts"));
}

#[test]
fn resolve_annotation_by_kind___kind_absent___returns_none() {
    let registry = AnnotationRegistry::standard();
    let doc = lines(&["Just prose."]);

    assert_eq!(
        resolve_annotation_by_kind(&doc, "Event", &registry).unwrap(),
        None
    );
}

#[test]
fn resolve_annotations___same_kind_twice___is_error() {
    let registry = AnnotationRegistry::standard();
    let doc = lines(&[
        r#"@Event(aggregate = "A")"#,
        r#"@Event(aggregate = "B")"#,
    ]);

    let err = resolve_annotations(&doc, &registry).unwrap_err();

    assert_eq!(
        err,
        AnnotationError::DuplicateAnnotation {
            kind: "Event".into()
        }
    );
}

#[test]
fn resolve_annotations___keeps_line_order() {
    let registry = AnnotationRegistry::standard();
    let doc = lines(&[
        r#"@RestService(path = "/x")"#,
        r#"@Event(aggregate = "X")"#,
    ]);

    let kinds: Vec<String> = resolve_annotations(&doc, &registry)
        .unwrap()
        .into_iter()
        .map(|a| a.kind)
        .collect();

    assert_eq!(kinds, vec!["RestService", "Event"]);
}

fn sample_sources() -> ParsedSources {
    let mut field = Field::new("amount", "u64");
    field.doc_lines = lines(&[r#"@RestService(path = "/field")"#]);

    let mut argument = Field::new("request", "Request");
    argument.doc_lines = lines(&[r#"@RestService(path = "/argument")"#]);

    ParsedSources {
        records: vec![Record {
            name: "FundsDeposited".into(),
            doc_lines: lines(&[r#"@Event(aggregate = "Account")"#]),
            fields: vec![field],
            ..Record::default()
        }],
        operations: vec![Operation {
            name: "deposit".into(),
            doc_lines: lines(&[r#"@RestOperation(method = "POST", path = "/deposit")"#]),
            input_args: vec![argument],
            ..Operation::default()
        }],
        interfaces: vec![Interface {
            name: "Ledger".into(),
            methods: vec![Operation {
                name: "balance".into(),
                doc_lines: lines(&[r#"@RestOperation(method = "GET", path = "/balance")"#]),
                ..Operation::default()
            }],
            ..Interface::default()
        }],
        type_aliases: vec![TypeAlias {
            name: "Currency".into(),
            doc_lines: lines(&[r#"@RestService(path = "/currencies")"#]),
            ..TypeAlias::default()
        }],
        ..ParsedSources::default()
    }
}

#[test]
fn attach_annotations___every_declaration_kind___gets_its_annotations() {
    let mut sources = sample_sources();

    let errors = attach_annotations(&mut sources, &AnnotationRegistry::standard());

    assert!(errors.is_empty(), "{errors:?}");
    assert!(sources.diagnostics.is_empty());
    let record = &sources.records[0];
    assert_eq!(record.annotation("Event").unwrap().attribute("aggregate"), Some("Account"));
    assert!(record.fields[0].annotation("RestService").is_some());
    assert!(sources.operations[0].annotation("RestOperation").is_some());
    assert!(sources.operations[0].input_args[0].annotation("RestService").is_some());
    assert!(sources.interfaces[0].methods[0].annotation("RestOperation").is_some());
    assert!(sources.type_aliases[0].annotation("RestService").is_some());
}

#[test]
fn attach_annotations___run_twice___does_not_duplicate() {
    let mut sources = sample_sources();
    let registry = AnnotationRegistry::standard();

    attach_annotations(&mut sources, &registry);
    attach_annotations(&mut sources, &registry);

    assert_eq!(sources.records[0].annotations.len(), 1);
}

#[test]
fn attach_annotations___syntax_error___names_declaration() {
    let mut sources = sample_sources();
    sources.records[0].fields[0].doc_lines = lines(&[r#"@Event(aggregate = Account)"#]);

    let errors = attach_annotations(&mut sources, &AnnotationRegistry::standard());

    assert_eq!(errors.len(), 1);
    match &errors[0] {
        AnnotationError::InDeclaration { declaration, .. } => {
            assert_eq!(declaration, "FundsDeposited.amount")
        }
        other => panic!("expected declaration context, got {other}"),
    }
    assert!(matches!(errors[0].root(), AnnotationError::Syntax { .. }));
}

#[test]
fn attach_annotations___invalid_declaration___leaves_others_annotated() {
    let mut sources = sample_sources();
    sources.records[0].filename = "events/funds.rs".into();
    sources.records[0].doc_lines = lines(&[r#"@Event(aggregate = Account)"#]);

    let errors = attach_annotations(&mut sources, &AnnotationRegistry::standard());

    assert_eq!(errors.len(), 1);
    assert!(sources.records[0].annotations.is_empty());
    assert!(sources.records[0].fields[0].annotation("RestService").is_some());
    assert!(sources.operations[0].annotation("RestOperation").is_some());

    let diagnostics: Vec<_> = sources
        .diagnostics_of(DiagnosticKind::InvalidAnnotation)
        .collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].declaration, "FundsDeposited");
    assert_eq!(diagnostics[0].filename, "events/funds.rs");
    assert!(diagnostics[0].message.contains("column 20"), "{}", diagnostics[0].message);
}

#[test]
fn attach_annotations___prose_naming_a_kind___is_not_an_error() {
    let mut sources = sample_sources();
    sources.records[0]
        .doc_lines
        .insert(0, "@Event is emitted once per deposit.".into());

    let errors = attach_annotations(&mut sources, &AnnotationRegistry::standard());

    assert!(errors.is_empty(), "{errors:?}");
    assert!(sources.records[0].annotation("Event").is_some());
}

#[test]
fn attach_annotations___rerun_after_fix___clears_diagnostic() {
    let mut sources = sample_sources();
    let registry = AnnotationRegistry::standard();
    sources.records[0].doc_lines = lines(&[r#"@Event(aggregate = Account)"#]);
    attach_annotations(&mut sources, &registry);

    sources.records[0].doc_lines = lines(&[r#"@Event(aggregate = "Account")"#]);
    let errors = attach_annotations(&mut sources, &registry);

    assert!(errors.is_empty());
    assert_eq!(sources.diagnostics_of(DiagnosticKind::InvalidAnnotation).count(), 0);
    assert!(sources.records[0].annotation("Event").is_some());
}

#[test]
fn attach_annotations___interface_method_error___names_trait() {
    let mut sources = sample_sources();
    sources.interfaces[0].methods[0]
        .doc_lines
        .push(r#"@RestOperation(method = "GET", path = "/again")"#.into());

    let errors = attach_annotations(&mut sources, &AnnotationRegistry::standard());

    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().starts_with("in `Ledger::balance`"), "{}", errors[0]);
}
