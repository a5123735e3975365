//! Extract, annotate, link and generate in one call

use crate::error::Result;
use doctag_annotation::{AnnotationRegistry, attach_annotations};
use doctag_codegen::{
    Artifact, EventGenerator, GenerateOptions, Generator, InvalidAnnotationPolicy, write_artifacts,
};
use doctag_model::ParsedSources;
use doctag_parser::{ExtractOptions, link, parse_source_dir, parse_source_file};
use std::path::{Path, PathBuf};

/// Options for every stage of a [`Pipeline`]
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub extract: ExtractOptions,
    pub generate: GenerateOptions,
    /// Annotation kinds recognized in doc comments
    pub registry: AnnotationRegistry,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            generate: GenerateOptions::default(),
            registry: AnnotationRegistry::standard(),
        }
    }
}

impl PipelineOptions {
    /// Set the extraction options
    pub fn with_extract(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Set the generation options
    pub fn with_generate(mut self, generate: GenerateOptions) -> Self {
        self.generate = generate;
        self
    }

    /// Set the annotation registry
    pub fn with_registry(mut self, registry: AnnotationRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Leave out events with invalid annotations instead of failing
    pub fn skip_invalid(mut self) -> Self {
        self.generate.policy = InvalidAnnotationPolicy::Skip;
        self
    }
}

/// Source-to-artifacts pipeline.
///
/// ```text
/// file | dir ──extract──> model ──attach annotations──> ──link──> model ──generate──> artifacts
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Build the linked, annotated model of a file or a directory
    pub fn build_model(&self, path: &Path) -> Result<ParsedSources> {
        let mut sources = if path.is_dir() {
            parse_source_dir(path, &self.options.extract)?
        } else {
            parse_source_file(path, &self.options.extract)?
        };

        // failures stay on the model as diagnostics; generation applies the policy
        attach_annotations(&mut sources, &self.options.registry);
        link(&mut sources);

        tracing::info!(
            "Model of {}: {} record(s), {} operation(s), {} interface(s), {} enumeration(s), {} diagnostic(s)",
            path.display(),
            sources.records.len(),
            sources.operations.len(),
            sources.interfaces.len(),
            sources.enumerations.len(),
            sources.diagnostics.len()
        );
        Ok(sources)
    }

    /// Run the event-sourcing generator over a model
    pub fn generate_events(&self, model: &ParsedSources) -> Result<Vec<Artifact>> {
        let generator = EventGenerator::new().with_registry(self.options.registry.clone());
        tracing::debug!("Running the {} generator", generator.name());
        Ok(generator.generate(model, &self.options.generate)?)
    }

    /// Build the model of `path` and generate its event artifacts
    pub fn run(&self, path: &Path) -> Result<Vec<Artifact>> {
        let model = self.build_model(path)?;
        self.generate_events(&model)
    }

    /// [`run`](Self::run), then write the artifacts into `output_dir`
    pub fn write(&self, path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let artifacts = self.run(path)?;
        Ok(write_artifacts(output_dir, &artifacts)?)
    }
}
