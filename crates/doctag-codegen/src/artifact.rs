//! Generated artifacts and the options shared by all generators

use crate::error::{GenerateError, GenerateResult};
use serde::{Deserialize, Serialize};

/// Header line written at the top of every generated Rust unit
pub const GENERATED_HEADER: &str = "// Generated automatically by doctag: do not edit manually";

/// Default absolute path of the runtime crate in generated code
pub const DEFAULT_RUNTIME_PATH: &str = "::doctag_runtime";

/// Default prefix of generated file names
pub const DEFAULT_FILE_PREFIX: &str = "gen_";

/// Format of an artifact's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Rust,
    Json,
}

/// One generated file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name relative to the output directory
    pub file_name: String,
    pub kind: ArtifactKind,
    pub contents: String,
}

impl Artifact {
    /// A Rust unit; fails when `contents` does not parse as a Rust file
    pub fn rust(file_name: impl Into<String>, contents: String) -> GenerateResult<Self> {
        let file_name = file_name.into();
        if let Err(e) = syn::parse_file(&contents) {
            return Err(GenerateError::InvalidOutput {
                file_name,
                message: e.to_string(),
            });
        }
        Ok(Self {
            file_name,
            kind: ArtifactKind::Rust,
            contents,
        })
    }

    /// A JSON document
    pub fn json(file_name: impl Into<String>, contents: String) -> Self {
        Self {
            file_name: file_name.into(),
            kind: ArtifactKind::Json,
            contents,
        }
    }
}

/// What to do with a declaration whose annotation breaks its kind's contract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidAnnotationPolicy {
    /// Fail the whole run
    #[default]
    Abort,
    /// Log a warning and leave the declaration out
    Skip,
}

/// Options for generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Absolute path generated code uses to reach the runtime crate
    pub runtime_path: String,
    /// Prefix of every generated file name
    pub file_prefix: String,
    pub policy: InvalidAnnotationPolicy,
    /// Also emit a `#[cfg(test)]` round-trip module per event; events must then
    /// implement `Default`, `PartialEq` and `Debug`
    pub wrapper_tests: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            policy: InvalidAnnotationPolicy::default(),
            wrapper_tests: false,
        }
    }
}

impl GenerateOptions {
    /// Set the runtime crate path
    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Set the file name prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Set the invalid annotation policy
    pub fn with_policy(mut self, policy: InvalidAnnotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Emit the per-event wrapper test units
    pub fn with_wrapper_tests(mut self, enabled: bool) -> Self {
        self.wrapper_tests = enabled;
        self
    }

    /// `<prefix><stem>.<extension>`
    pub fn file_name(&self, stem: &str, extension: &str) -> String {
        format!("{}{}.{}", self.file_prefix, stem, extension)
    }
}

#[cfg(test)]
#[path = "artifact/artifact_tests.rs"]
mod artifact_tests;
