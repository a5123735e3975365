//! doctag.toml parsing and validation

use anyhow::{Context, Result};
use doctag::{ExtractOptions, GenerateOptions, InvalidAnnotationPolicy, PipelineOptions};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "doctag.toml";

/// doctag.toml structure; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub source: SourceSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub events: EventsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    /// File or directory to extract from
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Regular expression selecting file names inside a directory
    #[serde(default)]
    pub pattern: Option<String>,

    /// Regular expression of file names never read
    #[serde(default)]
    pub exclude_pattern: Option<String>,

    /// `#![cfg(...)]` predicates whose files are skipped
    #[serde(default)]
    pub exclude_cfg: Vec<String>,

    /// Fail on the first field type that cannot be modelled
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Directory receiving generated files
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Prefix of generated file names
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsSection {
    /// Path generated code uses to reach the runtime crate
    #[serde(default)]
    pub runtime_path: Option<String>,

    /// `abort` or `skip`
    #[serde(default)]
    pub on_invalid: InvalidAnnotationPolicy,

    /// Emit a round-trip test unit per event
    #[serde(default)]
    pub wrapper_tests: bool,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load `path`, or `doctag.toml` in the working directory when present,
    /// or the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (key, pattern) in [
            ("source.pattern", &self.source.pattern),
            ("source.exclude_pattern", &self.source.exclude_pattern),
        ] {
            if let Some(pattern) = pattern {
                Regex::new(pattern)
                    .with_context(|| format!("Invalid regular expression in {key}: {pattern:?}"))?;
            }
        }

        if self.source.exclude_cfg.iter().any(|p| p.trim().is_empty()) {
            anyhow::bail!("source.exclude_cfg entries cannot be empty");
        }

        if let Some(prefix) = &self.output.prefix {
            if prefix.contains(['/', '\\']) {
                anyhow::bail!("output.prefix must be a file name prefix, got {prefix:?}");
            }
        }

        if let Some(runtime_path) = &self.events.runtime_path {
            if !is_valid_runtime_path(runtime_path) {
                anyhow::bail!("events.runtime_path is not a Rust path: {runtime_path:?}");
            }
        }

        Ok(())
    }

    /// Pipeline options described by this configuration
    pub fn pipeline_options(&self) -> PipelineOptions {
        let mut extract = ExtractOptions::default();
        if let Some(pattern) = &self.source.pattern {
            extract = extract.with_filename_pattern(pattern.clone());
        }
        if self.source.exclude_pattern.is_some() {
            extract = extract.with_exclude_pattern(self.source.exclude_pattern.clone());
        }
        for predicate in &self.source.exclude_cfg {
            extract = extract.exclude_cfg(predicate.clone());
        }
        extract = extract.with_strict(self.source.strict);

        let mut generate = GenerateOptions::default()
            .with_policy(self.events.on_invalid)
            .with_wrapper_tests(self.events.wrapper_tests);
        if let Some(runtime_path) = &self.events.runtime_path {
            generate = generate.with_runtime_path(runtime_path.clone());
        }
        if let Some(prefix) = &self.output.prefix {
            generate = generate.with_file_prefix(prefix.clone());
        }

        PipelineOptions::default()
            .with_extract(extract)
            .with_generate(generate)
    }
}

/// `::a::b`, `crate::a` or `a::b`, made of identifier segments
fn is_valid_runtime_path(path: &str) -> bool {
    let path = path.strip_prefix("::").unwrap_or(path);
    !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Check command implementation
pub fn check(config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    println!("Checking config: {}", path.display());

    let config = Config::from_file(&path)?;
    config.validate()?;

    match &config.source.input {
        Some(input) => println!("✓ Input: {}", input.display()),
        None => println!("✓ Input: (from command line)"),
    }
    println!("✓ Excluded cfgs: {}", config.source.exclude_cfg.len());
    println!(
        "✓ Runtime path: {}",
        config
            .events
            .runtime_path
            .as_deref()
            .unwrap_or(doctag::codegen::DEFAULT_RUNTIME_PATH)
    );
    println!("\nConfig is valid!");

    Ok(())
}
