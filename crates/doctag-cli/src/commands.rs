//! `generate` and `dump-model` command implementations

use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use doctag::{Pipeline, write_artifacts};
use std::path::{Path, PathBuf};

/// Arguments selecting and reading the source files
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Source file or directory (overrides source.input)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Regular expression selecting file names in a directory
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Skip files whose `#![cfg(...)]` equals this predicate (repeatable)
    #[arg(long = "exclude-cfg", value_name = "PREDICATE")]
    pub exclude_cfg: Vec<String>,

    /// Fail on the first field type that cannot be modelled
    #[arg(long)]
    pub strict: bool,

    /// Path to doctag.toml (default: ./doctag.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Load the config file and apply the command-line overrides
    pub fn resolve(&self) -> Result<(Config, PathBuf)> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(input) = &self.input {
            config.source.input = Some(input.clone());
        }
        if let Some(pattern) = &self.pattern {
            config.source.pattern = Some(pattern.clone());
        }
        config
            .source
            .exclude_cfg
            .extend(self.exclude_cfg.iter().cloned());
        config.source.strict |= self.strict;

        config.validate()?;

        let input = config
            .source
            .input
            .clone()
            .context("No input given: pass --input or set source.input in doctag.toml")?;
        if !input.exists() {
            anyhow::bail!("Input does not exist: {}", input.display());
        }
        Ok((config, input))
    }
}

/// Directory next to the input: the input itself, or a file's parent
pub fn default_output_dir(input: &Path) -> PathBuf {
    if input.is_dir() {
        return input.to_path_buf();
    }
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Generate command implementation
pub fn generate(
    source: &SourceArgs,
    output: Option<PathBuf>,
    skip_invalid: bool,
    wrapper_tests: bool,
) -> Result<()> {
    let (config, input) = source.resolve()?;

    let mut options = config.pipeline_options();
    if skip_invalid {
        options = options.skip_invalid();
    }
    if wrapper_tests {
        options.generate.wrapper_tests = true;
    }
    let pipeline = Pipeline::new(options);

    let model = pipeline
        .build_model(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let artifacts = pipeline
        .generate_events(&model)
        .context("Failed to generate event code")?;

    let output_dir = output
        .or(config.output.dir)
        .unwrap_or_else(|| default_output_dir(&input));
    let paths = write_artifacts(&output_dir, &artifacts)
        .with_context(|| format!("Failed to write to {}", output_dir.display()))?;

    println!("✓ Records: {}", model.records.len());
    if !model.diagnostics.is_empty() {
        println!("! Diagnostics: {}", model.diagnostics.len());
    }
    println!("✓ Generated {} file(s) in {}", paths.len(), output_dir.display());

    Ok(())
}

/// Dump-model command implementation
pub fn dump_model(source: &SourceArgs, output: Option<PathBuf>) -> Result<()> {
    let (config, input) = source.resolve()?;
    let pipeline = Pipeline::new(config.pipeline_options());

    let model = pipeline
        .build_model(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let mut json = serde_json::to_string_pretty(&model).context("Failed to serialize model")?;
    json.push('\n');

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote model to {}", path.display());
        }
        None => print!("{json}"),
    }

    Ok(())
}
