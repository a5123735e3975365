//! Extraction options and the compiled file filter

use crate::error::{ExtractError, ExtractResult};
use regex::Regex;

/// Default pattern selecting Rust source files
pub const DEFAULT_FILENAME_PATTERN: &str = r"\.rs$";

/// Default pattern skipping previously generated files
pub const DEFAULT_EXCLUDE_PATTERN: &str = r"^gen_.*\.rs$";

/// Options controlling which files are read and how strictly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Regex a file name must match to be read from a directory
    pub filename_pattern: String,

    /// Regex of file names to skip even when they match `filename_pattern`
    pub exclude_pattern: Option<String>,

    /// `#![cfg(...)]` predicates marking files of an alternate build variant
    pub excluded_cfgs: Vec<String>,

    /// Fail on the first unresolved field shape instead of recording a diagnostic
    pub strict: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            filename_pattern: DEFAULT_FILENAME_PATTERN.to_string(),
            exclude_pattern: Some(DEFAULT_EXCLUDE_PATTERN.to_string()),
            excluded_cfgs: Vec::new(),
            strict: false,
        }
    }
}

impl ExtractOptions {
    /// Set the filename pattern
    pub fn with_filename_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.filename_pattern = pattern.into();
        self
    }

    /// Set or clear the exclude pattern
    pub fn with_exclude_pattern(mut self, pattern: Option<String>) -> Self {
        self.exclude_pattern = pattern;
        self
    }

    /// Skip files whose `#![cfg(...)]` equals `predicate`
    pub fn exclude_cfg(mut self, predicate: impl Into<String>) -> Self {
        self.excluded_cfgs.push(predicate.into());
        self
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub(crate) fn file_filter(&self) -> ExtractResult<FileFilter> {
        let include = compile(&self.filename_pattern)?;
        let exclude = self.exclude_pattern.as_deref().map(compile).transpose()?;
        Ok(FileFilter { include, exclude })
    }

    /// Whether a file-level cfg predicate names an excluded build variant
    pub(crate) fn is_excluded_cfg(&self, predicate: &str) -> bool {
        let predicate = strip_whitespace(predicate);
        self.excluded_cfgs
            .iter()
            .any(|excluded| strip_whitespace(excluded) == predicate)
    }
}

fn compile(pattern: &str) -> ExtractResult<Regex> {
    Regex::new(pattern).map_err(|source| ExtractError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Compiled include/exclude file name patterns
#[derive(Debug)]
pub(crate) struct FileFilter {
    include: Regex,
    exclude: Option<Regex>,
}

impl FileFilter {
    pub fn matches(&self, file_name: &str) -> bool {
        self.include.is_match(file_name)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(file_name))
    }
}
