#![allow(non_snake_case)]

use super::*;

#[test]
fn Artifact___rust_valid_source___is_accepted() {
    let artifact = Artifact::rust("gen_a.rs", "pub const A: &str = \"a\";\n".into()).unwrap();

    assert_eq!(artifact.kind, ArtifactKind::Rust);
    assert_eq!(artifact.file_name, "gen_a.rs");
}

#[test]
fn Artifact___rust_invalid_source___is_invalid_output() {
    let err = Artifact::rust("gen_broken.rs", "pub fn broken( {".into()).unwrap_err();

    match err {
        GenerateError::InvalidOutput { file_name, .. } => assert_eq!(file_name, "gen_broken.rs"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn GenerateOptions___default___uses_runtime_crate_and_gen_prefix() {
    let options = GenerateOptions::default();

    assert_eq!(options.runtime_path, "::doctag_runtime");
    assert_eq!(options.policy, InvalidAnnotationPolicy::Abort);
    assert!(!options.wrapper_tests);
    assert_eq!(options.file_name("aggregates", "json"), "gen_aggregates.json");
}

#[test]
fn GenerateOptions___builders___override_defaults() {
    let options = GenerateOptions::default()
        .with_runtime_path("crate::runtime")
        .with_file_prefix("es_")
        .with_policy(InvalidAnnotationPolicy::Skip)
        .with_wrapper_tests(true);

    assert_eq!(options.runtime_path, "crate::runtime");
    assert!(options.wrapper_tests);
    assert_eq!(options.policy, InvalidAnnotationPolicy::Skip);
    assert_eq!(options.file_name("test_aggregate", "rs"), "es_test_aggregate.rs");
}

#[test]
fn InvalidAnnotationPolicy___serde___uses_lowercase_names() {
    let json = serde_json::to_string(&InvalidAnnotationPolicy::Skip).unwrap();

    assert_eq!(json, "\"skip\"");
}
