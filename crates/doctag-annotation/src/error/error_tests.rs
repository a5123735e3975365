#![allow(non_snake_case)]

use super::*;

#[test]
fn AnnotationError___missing_required___display_names_kind_and_attribute() {
    let err = AnnotationError::MissingRequiredAttribute {
        kind: "Event".into(),
        attribute: "aggregate".into(),
    };

    assert_eq!(
        err.to_string(),
        "@Event: missing required attribute `aggregate`"
    );
}

#[test]
fn AnnotationError___syntax___display_includes_column() {
    let err = AnnotationError::syntax(17, "expected `=`");

    assert_eq!(err.to_string(), "syntax error at column 17: expected `=`");
}

#[test]
fn AnnotationError___in_declaration___prefixes_declaration() {
    let err = AnnotationError::DuplicateAnnotation {
        kind: "Event".into(),
    }
    .in_declaration("AccountOpened");

    assert_eq!(
        err.to_string(),
        "in `AccountOpened`: @Event appears more than once on the same declaration"
    );
}

#[test]
fn AnnotationError___root___unwraps_nested_context() {
    let inner = AnnotationError::syntax(3, "unterminated string");
    let err = inner
        .clone()
        .in_declaration("Order.lines")
        .in_declaration("Order");

    assert_eq!(err.root(), &inner);
}
