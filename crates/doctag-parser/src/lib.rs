//! doctag-parser - Build the declaration model from Rust source
//!
//! The extractor parses files with [`syn`] and walks their items:
//!
//! | Item | Model |
//! |------|-------|
//! | `struct` | [`Record`](doctag_model::Record) with [`Field`](doctag_model::Field)s |
//! | `type X = Y;` | [`TypeAlias`](doctag_model::TypeAlias) |
//! | consecutive `const`s of one type | [`Enumeration`](doctag_model::Enumeration) |
//! | `trait` | [`Interface`](doctag_model::Interface) |
//! | `fn`, `impl` block `fn`s | [`Operation`](doctag_model::Operation) |
//!
//! Inline `mod` blocks are walked with the same file context. Field types are
//! resolved into scalar, pointer (`Box`, `Option`, references), slice (`Vec`),
//! pointer-slice and map shapes; other shapes are recorded as diagnostics.
//!
//! Directories are read non-recursively, files in lexicographic order, so that
//! repeated runs over unchanged input give identical models.
//!
//! # Example
//!
//! ```rust,no_run
//! use doctag_parser::{ExtractOptions, link, parse_source_dir};
//! use std::path::Path;
//!
//! let mut sources = parse_source_dir(Path::new("src/events"), &ExtractOptions::default())?;
//! link(&mut sources);
//!
//! for record in &sources.records {
//!     println!("{} ({} fields)", record.name, record.fields.len());
//! }
//! # Ok::<(), doctag_parser::ExtractError>(())
//! ```

mod context;
mod docs;
mod error;
mod extract;
mod link;
mod options;
mod shape;

pub use error::{ExtractError, ExtractResult};
pub use link::link;
pub use options::{DEFAULT_EXCLUDE_PATTERN, DEFAULT_FILENAME_PATTERN, ExtractOptions};

use context::FileContext;
use doctag_model::ParsedSources;
use extract::Extractor;
use std::path::{Path, PathBuf};

/// Extract the model of a single file.
///
/// The filename pattern does not apply; excluded build variants do (an
/// excluded file yields an empty model).
pub fn parse_source_file(path: &Path, options: &ExtractOptions) -> ExtractResult<ParsedSources> {
    let mut extractor = Extractor::new(options);
    extract_path(&mut extractor, path, options)?;
    Ok(extractor.finish())
}

/// Extract the model of every matching file directly inside `dir`.
pub fn parse_source_dir(dir: &Path, options: &ExtractOptions) -> ExtractResult<ParsedSources> {
    let filter = options.file_filter()?;

    let mut paths: Vec<PathBuf> = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| ExtractError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ExtractError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if filter.matches(file_name) {
            paths.push(path);
        } else {
            tracing::debug!("Skipping {} (filename filter)", path.display());
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!("Extracting {} file(s) from {}", paths.len(), dir.display());

    let mut extractor = Extractor::new(options);
    for path in &paths {
        extract_path(&mut extractor, path, options)?;
    }
    Ok(extractor.finish())
}

/// Extract the model of in-memory source.
pub fn parse_source_str(
    source: &str,
    filename: &str,
    package: &str,
    options: &ExtractOptions,
) -> ExtractResult<ParsedSources> {
    let mut extractor = Extractor::new(options);
    extract_source(&mut extractor, source, filename, package, options)?;
    Ok(extractor.finish())
}

fn extract_path(
    extractor: &mut Extractor<'_>,
    path: &Path,
    options: &ExtractOptions,
) -> ExtractResult<()> {
    let source = std::fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
    let package = package_name(path);
    extract_source(
        extractor,
        &source,
        &path.display().to_string(),
        &package,
        options,
    )
}

fn extract_source(
    extractor: &mut Extractor<'_>,
    source: &str,
    filename: &str,
    package: &str,
    options: &ExtractOptions,
) -> ExtractResult<()> {
    let file = syn::parse_file(source).map_err(|e| ExtractError::parse(filename, &e))?;

    let predicates = docs::cfg_predicates(&file.attrs);
    if let Some(predicate) = predicates
        .iter()
        .find(|predicate| options.is_excluded_cfg(predicate))
    {
        tracing::debug!("Skipping {} (excluded build variant `{}`)", filename, predicate);
        return Ok(());
    }

    let mut ctx = FileContext::new(package, filename, source);
    ctx.collect_imports(&file.items);
    tracing::debug!("Extracting {} (package `{}`)", filename, package);

    extractor.extract_file(&file, &ctx)
}

/// Name of the directory holding `path`
fn package_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
