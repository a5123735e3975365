#![allow(non_snake_case)]

use super::*;
use doctag_model::{Annotation, EnumLiteral, Enumeration, Field, Operation, Record, TypeAlias};

fn method(receiver: &str, name: &str) -> Operation {
    Operation {
        name: name.into(),
        filename: "ledger/account.rs".into(),
        related_record: Some(Field::new("self", receiver).pointer()),
        ..Operation::default()
    }
}

fn sample_sources() -> ParsedSources {
    ParsedSources {
        records: vec![
            Record {
                name: "Account".into(),
                ..Record::default()
            },
            Record {
                name: "Ledger".into(),
                ..Record::default()
            },
        ],
        operations: vec![
            method("Account", "deposit"),
            Operation {
                name: "open_account".into(),
                ..Operation::default()
            },
            method("Account", "withdraw"),
            method("Ghost", "haunt"),
        ],
        type_aliases: vec![TypeAlias {
            name: "Currency".into(),
            type_name: "&'static str".into(),
            doc_lines: vec!["Supported currencies".into()],
            annotations: vec![Annotation::new("RestService").with_attribute("path", "/currencies")],
            ..TypeAlias::default()
        }],
        enumerations: vec![
            Enumeration {
                name: "Currency".into(),
                literals: vec![EnumLiteral {
                    name: "EUR".into(),
                    value: Some("EUR".into()),
                }],
                ..Enumeration::default()
            },
            Enumeration {
                name: "Undocumented".into(),
                ..Enumeration::default()
            },
        ],
        ..ParsedSources::default()
    }
}

#[test]
fn link___methods___attach_to_matching_record_in_order() {
    let mut sources = sample_sources();

    link(&mut sources);

    let names: Vec<&str> = sources.records[0]
        .operations
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(names, vec!["deposit", "withdraw"]);
    assert!(sources.records[1].operations.is_empty());
}

#[test]
fn link___free_functions___are_not_attached() {
    let mut sources = sample_sources();

    link(&mut sources);

    assert!(sources.records.iter().all(|r| r.operation("open_account").is_none()));
    assert_eq!(sources.functions().count(), 1);
}

#[test]
fn link___orphaned_method___stays_in_flat_list_with_diagnostic() {
    let mut sources = sample_sources();

    link(&mut sources);

    assert!(sources.operations.iter().any(|o| o.name == "haunt"));
    let orphans: Vec<&Diagnostic> = sources
        .diagnostics_of(DiagnosticKind::OrphanedOperation)
        .collect();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].declaration, "Ghost::haunt");
    assert_eq!(orphans[0].filename, "ledger/account.rs");
}

#[test]
fn link___enumeration___gets_alias_docs_and_annotations() {
    let mut sources = sample_sources();

    link(&mut sources);

    let currency = sources.enumeration("Currency").unwrap();
    assert_eq!(currency.doc_lines, vec!["Supported currencies"]);
    assert!(currency.annotation("RestService").is_some());
    assert_eq!(currency.literals[0].value.as_deref(), Some("EUR"));
}

#[test]
fn link___enumeration_without_alias___keeps_empty_docs() {
    let mut sources = sample_sources();

    link(&mut sources);

    assert!(sources.enumeration("Undocumented").unwrap().doc_lines.is_empty());
}

#[test]
fn link___run_twice___is_idempotent() {
    let mut once = sample_sources();
    link(&mut once);

    let mut twice = sample_sources();
    link(&mut twice);
    link(&mut twice);

    assert_eq!(once, twice);
}
