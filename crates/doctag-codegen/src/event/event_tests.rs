#![allow(non_snake_case)]

use super::*;
use crate::artifact::{ArtifactKind, InvalidAnnotationPolicy};
use crate::error::GenerateError;
use doctag_annotation::{AnnotationDescriptor, AnnotationError};
use doctag_model::{Annotation, Diagnostic, DiagnosticKind, Field};
use test_case::test_case;

fn event_annotation(aggregate: &str) -> Annotation {
    Annotation::new("Event").with_attribute("aggregate", aggregate)
}

fn event_record(name: &str, annotation: Annotation) -> Record {
    Record {
        package_name: "events".into(),
        filename: format!("events/{}.rs", name.to_lowercase()),
        name: name.into(),
        fields: vec![
            Field::new("account_uid", "String"),
            Field::new("note", "String").pointer(),
            Field::new("balances", "BTreeMap<String, u64>"),
        ],
        annotations: vec![annotation],
        ..Record::default()
    }
}

fn sources(records: Vec<Record>) -> ParsedSources {
    ParsedSources {
        records,
        ..ParsedSources::default()
    }
}

fn artifact<'a>(artifacts: &'a [Artifact], file_name: &str) -> &'a Artifact {
    artifacts
        .iter()
        .find(|a| a.file_name == file_name)
        .unwrap_or_else(|| panic!("no artifact named {file_name}"))
}

fn my_struct_sources() -> ParsedSources {
    sources(vec![Record {
        package_name: "test".into(),
        filename: "test/my_struct.rs".into(),
        doc_lines: vec!["@Event(aggregate = \"Test\")".into()],
        name: "MyStruct".into(),
        fields: vec![
            Field::new("string_field", "String"),
            Field::new("int_field", "i32"),
            Field::new("struct_field", "MyStruct").pointer(),
            Field::new("slice_field", "MyStruct").slice(),
        ],
        annotations: vec![event_annotation("Test")],
        ..Record::default()
    }])
}

// ============================================================================
// Artifact set
// ============================================================================

#[test]
fn generate_events___my_struct___emits_aggregate_and_wrapper_units() {
    let artifacts = generate_events(&my_struct_sources(), &GenerateOptions::default()).unwrap();

    let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "gen_aggregates.rs",
            "gen_aggregates.json",
            "gen_test_aggregate.rs",
            "gen_my_struct_wrappers.rs",
            "gen_handler.rs",
        ]
    );

    let aggregate = &artifact(&artifacts, "gen_test_aggregate.rs").contents;
    assert!(aggregate.contains("pub trait TestAggregate {"));
    assert!(aggregate.contains("fn apply_my_struct(&mut self, event: MyStruct);"));
    assert!(aggregate.contains("pub enum TestAggregateEvent {"));
    assert!(aggregate.contains("pub fn unwrap_test_event("));
    assert!(aggregate.contains("pub fn apply_test_event<A: TestAggregate + ?Sized>("));
    assert!(aggregate.contains("pub fn apply_test_events<A: TestAggregate + ?Sized>("));

    let wrappers = &artifact(&artifacts, "gen_my_struct_wrappers.rs").contents;
    assert!(wrappers.contains("pub const MY_STRUCT_EVENT_NAME: &str = \"MyStruct\";"));
    assert!(wrappers.contains("impl ::doctag_runtime::Event for MyStruct {"));
    assert!(wrappers.contains("const AGGREGATE_NAME: &'static str = \"Test\";"));
    assert!(wrappers.contains("pub fn wrap("));
    assert!(wrappers.contains("pub fn is_my_struct("));
    assert!(wrappers.contains("pub fn get_if_is_my_struct("));
    assert!(wrappers.contains("pub fn unwrap_my_struct("));
}

#[test]
fn generate_events___every_unit___starts_with_header() {
    let artifacts = generate_events(&my_struct_sources(), &GenerateOptions::default()).unwrap();

    for artifact in artifacts.iter().filter(|a| a.kind == ArtifactKind::Rust) {
        assert!(
            artifact.contents.starts_with(crate::GENERATED_HEADER),
            "{} lacks the header",
            artifact.file_name
        );
    }
}

#[test]
fn generate_events___no_events___emits_empty_registry_only() {
    let plain = Record {
        name: "Plain".into(),
        ..Record::default()
    };

    let artifacts = generate_events(&sources(vec![plain]), &GenerateOptions::default()).unwrap();

    assert_eq!(artifacts.len(), 2);
    assert!(
        artifacts[0]
            .contents
            .contains("pub const AGGREGATE_EVENTS: &[(&str, &[&str])] = &[\n];")
    );
    let json: serde_json::Value = serde_json::from_str(&artifacts[1].contents).unwrap();
    assert_eq!(json["aggregates"], serde_json::json!([]));
}

#[test]
fn generate_events___custom_runtime_and_prefix___are_used() {
    let options = GenerateOptions::default()
        .with_runtime_path("crate::es")
        .with_file_prefix("es_");

    let artifacts = generate_events(&my_struct_sources(), &options).unwrap();

    assert_eq!(artifacts[2].file_name, "es_test_aggregate.rs");
    let wrappers = &artifact(&artifacts, "es_my_struct_wrappers.rs").contents;
    assert!(wrappers.contains("impl crate::es::Event for MyStruct {"));
    assert!(!wrappers.contains("doctag_runtime"));
}

// ============================================================================
// Ordering and determinism
// ============================================================================

#[test]
fn generate_events___aggregates___keep_first_encounter_order() {
    let records = vec![
        event_record("TourCreated", event_annotation("Tour")),
        event_record("GamblerCreated", event_annotation("Gambler")),
        event_record("EtappeCreated", event_annotation("Tour")),
        event_record("GamblerTeamCreated", event_annotation("Gambler")),
    ];

    let artifacts = generate_events(&sources(records), &GenerateOptions::default()).unwrap();

    let registry = &artifact(&artifacts, "gen_aggregates.rs").contents;
    let tour = registry
        .find("(\"Tour\", &[\"TourCreated\", \"EtappeCreated\"]),")
        .unwrap();
    let gambler = registry
        .find("(\"Gambler\", &[\"GamblerCreated\", \"GamblerTeamCreated\"]),")
        .unwrap();
    assert!(tour < gambler);

    let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(
        names[2..],
        [
            "gen_tour_aggregate.rs",
            "gen_gambler_aggregate.rs",
            "gen_tour_created_wrappers.rs",
            "gen_etappe_created_wrappers.rs",
            "gen_gambler_created_wrappers.rs",
            "gen_gambler_team_created_wrappers.rs",
        ]
    );
}

#[test]
fn generate_events___dispatch___has_one_arm_per_event_in_order() {
    let records = vec![
        event_record("AccountOpened", event_annotation("Account")),
        event_record("FundsDeposited", event_annotation("Account")),
    ];

    let artifacts = generate_events(&sources(records), &GenerateOptions::default()).unwrap();

    let aggregate = &artifact(&artifacts, "gen_account_aggregate.rs").contents;
    let opened = aggregate
        .find("AccountAggregateEvent::AccountOpened(event) => aggregate_root.apply_account_opened(event),")
        .unwrap();
    let deposited = aggregate
        .find("AccountAggregateEvent::FundsDeposited(event) => aggregate_root.apply_funds_deposited(event),")
        .unwrap();
    assert!(opened < deposited);
    assert_eq!(aggregate.matches(".unwrap_event::<").count(), 2);
    assert!(aggregate.contains("pub const ACCOUNT_AGGREGATE_EVENTS: &[&str] = &[\n    \"AccountOpened\",\n    \"FundsDeposited\",\n];"));
}

#[test]
fn generate_events___repeated_runs___are_identical() {
    let records = vec![
        event_record("AccountOpened", event_annotation("Account")),
        event_record("TourCreated", event_annotation("Tour")),
        event_record("FundsDeposited", event_annotation("Account")),
    ];
    let model = sources(records);

    let first = generate_events(&model, &GenerateOptions::default()).unwrap();
    let second = generate_events(&model, &GenerateOptions::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn generate_events___json_registry___mirrors_rust_registry() {
    let records = vec![
        event_record("AccountOpened", event_annotation("Account")),
        event_record("FundsDeposited", event_annotation("Account")),
    ];

    let artifacts = generate_events(&sources(records), &GenerateOptions::default()).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&artifact(&artifacts, "gen_aggregates.json").contents).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "aggregates": [
                { "name": "Account", "events": ["AccountOpened", "FundsDeposited"] }
            ]
        })
    );
}

// ============================================================================
// Aggregate instance identifier
// ============================================================================

#[test]
fn generate_events___uid___renders_aggregate_uid_from_field() {
    let annotation = event_annotation("Account").with_attribute("uid", "account_uid");

    let artifacts = generate_events(
        &sources(vec![event_record("AccountOpened", annotation)]),
        &GenerateOptions::default(),
    )
    .unwrap();

    let wrappers = &artifact(&artifacts, "gen_account_opened_wrappers.rs").contents;
    assert!(wrappers.contains("fn aggregate_uid(&self) -> ::std::string::String {"));
    assert!(wrappers.contains("::std::string::ToString::to_string(&self.account_uid)"));
}

#[test]
fn generate_events___no_uid___keeps_default_aggregate_uid() {
    let artifacts = generate_events(
        &sources(vec![event_record("AccountOpened", event_annotation("Account"))]),
        &GenerateOptions::default(),
    )
    .unwrap();

    let wrappers = &artifact(&artifacts, "gen_account_opened_wrappers.rs").contents;
    assert!(!wrappers.contains("fn aggregate_uid"));
}

// ============================================================================
// Invalid annotations
// ============================================================================

fn annotation_error(annotation: Annotation) -> (String, AnnotationError) {
    let err = generate_events(
        &sources(vec![event_record("AccountOpened", annotation)]),
        &GenerateOptions::default(),
    )
    .unwrap_err();
    match err {
        GenerateError::Annotation {
            declaration,
            source,
        } => (declaration, source),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn generate_events___missing_aggregate___aborts_naming_declaration() {
    let (declaration, source) = annotation_error(Annotation::new("Event"));

    assert_eq!(declaration, "AccountOpened");
    assert_eq!(
        source,
        AnnotationError::MissingRequiredAttribute {
            kind: "Event".into(),
            attribute: "aggregate".into()
        }
    );
}

#[test]
fn generate_events___unknown_attribute___aborts() {
    let (_, source) = annotation_error(event_annotation("Account").with_attribute("stream", "x"));

    assert!(matches!(source, AnnotationError::UnknownAttribute { ref attribute, .. } if attribute == "stream"));
}

#[test_case("bank account" ; "space")]
#[test_case("" ; "empty")]
#[test_case("9lives" ; "leading digit")]
fn generate_events___aggregate_not_identifier___is_invalid_attribute(aggregate: &str) {
    let (_, source) = annotation_error(event_annotation(aggregate));

    assert!(matches!(source, AnnotationError::InvalidAttribute { ref attribute, .. } if attribute == "aggregate"));
}

#[test_case("missing" ; "no such field")]
#[test_case("note" ; "pointer field")]
#[test_case("balances" ; "map field")]
#[test_case("" ; "empty")]
fn generate_events___bad_uid___is_invalid_attribute(uid: &str) {
    let (_, source) = annotation_error(event_annotation("Account").with_attribute("uid", uid));

    assert!(matches!(source, AnnotationError::InvalidAttribute { ref attribute, .. } if attribute == "uid"));
}

#[test]
fn generate_events___skip_policy___omits_only_invalid_events() {
    let records = vec![
        event_record("AccountOpened", event_annotation("Account")),
        event_record("Broken", Annotation::new("Event")),
        event_record("FundsDeposited", event_annotation("Account")),
    ];
    let options = GenerateOptions::default().with_policy(InvalidAnnotationPolicy::Skip);

    let artifacts = generate_events(&sources(records), &options).unwrap();

    assert!(artifacts.iter().all(|a| !a.file_name.contains("broken")));
    let registry = &artifact(&artifacts, "gen_aggregates.rs").contents;
    assert!(registry.contains("(\"Account\", &[\"AccountOpened\", \"FundsDeposited\"]),"));
}

fn with_unparsable_annotation(mut sources: ParsedSources) -> ParsedSources {
    sources.records.push(Record {
        name: "Broken".into(),
        filename: "events/broken.rs".into(),
        doc_lines: vec!["@Event(aggregate = Account)".into()],
        ..Record::default()
    });
    sources.diagnostics.push(Diagnostic::new(
        DiagnosticKind::InvalidAnnotation,
        "events/broken.rs",
        "Broken",
        "syntax error at column 20: expected a quoted string value for `aggregate`",
    ));
    sources
}

#[test]
fn generate_events___unparsable_annotation___aborts_by_default() {
    let sources = with_unparsable_annotation(sources(vec![event_record(
        "AccountOpened",
        event_annotation("Account"),
    )]));

    let err = generate_events(&sources, &GenerateOptions::default()).unwrap_err();

    match err {
        GenerateError::InvalidAnnotation {
            declaration,
            filename,
            ..
        } => {
            assert_eq!(declaration, "Broken");
            assert_eq!(filename, "events/broken.rs");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn generate_events___unparsable_annotation_with_skip___keeps_other_events() {
    let sources = with_unparsable_annotation(sources(vec![event_record(
        "AccountOpened",
        event_annotation("Account"),
    )]));
    let options = GenerateOptions::default().with_policy(InvalidAnnotationPolicy::Skip);

    let artifacts = generate_events(&sources, &options).unwrap();

    assert!(artifacts.iter().all(|a| !a.file_name.contains("broken")));
    let registry = &artifact(&artifacts, "gen_aggregates.rs").contents;
    assert!(registry.contains("(\"Account\", &[\"AccountOpened\"]),"));
}

#[test]
fn EventGenerator___custom_registry___validates_against_it() {
    let registry = AnnotationRegistry::new().with(
        AnnotationDescriptor::new("Event")
            .required("aggregate")
            .required("stream"),
    );
    let generator = EventGenerator::new().with_registry(registry);

    let err = generator
        .generate(
            &sources(vec![event_record("AccountOpened", event_annotation("Account"))]),
            &GenerateOptions::default(),
        )
        .unwrap_err();

    assert!(err.to_string().contains("missing required attribute `stream`"));
    assert_eq!(generator.name(), "events");
}

// ============================================================================
// Name clashes
// ============================================================================

#[test]
fn generate_events___duplicate_event_name___is_error() {
    let mut second = event_record("AccountOpened", event_annotation("Account"));
    second.filename = "legacy/account_opened.rs".into();
    let records = vec![event_record("AccountOpened", event_annotation("Account")), second];

    let err = generate_events(&sources(records), &GenerateOptions::default()).unwrap_err();

    match err {
        GenerateError::DuplicateEvent {
            name,
            first,
            second,
        } => {
            assert_eq!(name, "AccountOpened");
            assert_eq!(first, "events/accountopened.rs");
            assert_eq!(second, "legacy/account_opened.rs");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn generate_events___aggregates_equal_after_case_conversion___collide() {
    let records = vec![
        event_record("AccountOpened", event_annotation("BankAccount")),
        event_record("AccountClosed", event_annotation("bank_account")),
    ];

    let err = generate_events(&sources(records), &GenerateOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        GenerateError::AggregateNameCollision { ref first, ref second, .. }
            if first == "BankAccount" && second == "bank_account"
    ));
}

#[test_case("AccountEvent" ; "dispatch fn")]
#[test_case("EventHandler" ; "handler trait")]
#[test_case("AccountAggregate" ; "contract trait")]
#[test_case("AccountAggregateEvent" ; "sum type")]
fn generate_events___event_shadowing_aggregate_item___collides(event: &str) {
    let records = vec![event_record(event, event_annotation("Account"))];

    let err = generate_events(&sources(records), &GenerateOptions::default()).unwrap_err();

    assert!(matches!(err, GenerateError::AggregateNameCollision { .. }));
}

// ============================================================================
// Handler and wrapper tests
// ============================================================================

#[test]
fn generate_events___handler___has_method_and_arm_per_event() {
    let records = vec![
        event_record("AccountOpened", event_annotation("Account")),
        event_record("TourCreated", event_annotation("Tour")),
    ];

    let artifacts = generate_events(&sources(records), &GenerateOptions::default()).unwrap();

    let handler = &artifact(&artifacts, "gen_handler.rs").contents;
    assert!(handler.contains("pub trait EventHandler {"));
    assert!(handler.contains(
        "fn on_account_opened(&mut self, _envelope: &::doctag_runtime::Envelope, _event: AccountOpened) {}"
    ));
    assert!(handler.contains("fn on_tour_created("));
    assert!(handler.contains("pub fn handle_event<H: EventHandler + ?Sized>("));
    let opened = handler.find("\"AccountOpened\" => {").unwrap();
    let created = handler.find("\"TourCreated\" => {").unwrap();
    assert!(opened < created);
    assert!(handler.contains("_ => return ::core::result::Result::Ok(false),"));
}

#[test]
fn generate_events___wrapper_tests_off___emits_no_test_units() {
    let artifacts = generate_events(&my_struct_sources(), &GenerateOptions::default()).unwrap();

    assert!(!artifacts.iter().any(|a| a.file_name.ends_with("_tests.rs")));
}

#[test]
fn generate_events___wrapper_tests_on___emits_test_unit_per_event() {
    let records = vec![
        event_record("AccountOpened", event_annotation("Account")),
        event_record("AccountClosed", event_annotation("Account")),
    ];
    let options = GenerateOptions::default().with_wrapper_tests(true);

    let artifacts = generate_events(&sources(records), &options).unwrap();

    let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(
        &names[names.len() - 2..],
        &["gen_account_opened_wrappers_tests.rs", "gen_account_closed_wrappers_tests.rs"]
    );
    let tests = &artifact(&artifacts, "gen_account_opened_wrappers_tests.rs").contents;
    assert!(tests.starts_with(crate::GENERATED_HEADER));
    assert!(tests.contains("#[cfg(test)]\nmod account_opened_wrapper_tests {"));
    assert!(tests.contains("fn wrap_then_unwrap_round_trips() {"));
    assert!(tests.contains("assert_eq!(envelope.event_type_name, ACCOUNT_OPENED_EVENT_NAME);"));
    assert!(tests.contains("assert_eq!(envelope.aggregate_name, \"Account\");"));
    assert!(tests.contains("fn other_event_type_is_rejected() {"));
    assert!(tests.contains("assert!(unwrap_account_opened(&envelope).is_err());"));
}

// ============================================================================
// Helpers
// ============================================================================

#[test]
fn is_event_and_aggregate_name___read_event_annotation() {
    let event = event_record("AccountOpened", event_annotation("Account"));
    let plain = Record {
        name: "Plain".into(),
        annotations: vec![Annotation::new("RestService").with_attribute("path", "/p")],
        ..Record::default()
    };

    assert!(is_event(&event));
    assert_eq!(aggregate_name(&event), Some("Account"));
    assert!(!is_event(&plain));
    assert_eq!(aggregate_name(&plain), None);
}

#[test]
fn collect_aggregates___groups_events_by_aggregate() {
    let records = vec![
        event_record("AccountOpened", event_annotation("Account")),
        event_record("TourCreated", event_annotation("Tour")),
        event_record("FundsDeposited", event_annotation("Account")),
    ];

    let aggregates = collect_aggregates(
        &sources(records),
        &AnnotationRegistry::standard(),
        InvalidAnnotationPolicy::Abort,
    )
    .unwrap();

    assert_eq!(aggregates.len(), 2);
    assert_eq!(aggregates[0].name, "Account");
    assert_eq!(
        aggregates[0].event_names().collect::<Vec<_>>(),
        vec!["AccountOpened", "FundsDeposited"]
    );
    assert_eq!(aggregates[1].events[0].const_name(), "TOUR_CREATED_EVENT_NAME");
}
