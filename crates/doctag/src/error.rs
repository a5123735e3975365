//! Error type of the pipeline

use doctag_codegen::GenerateError;
use doctag_parser::ExtractError;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure of a pipeline stage
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or parsing source failed
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Generation or writing failed
    #[error(transparent)]
    Generate(#[from] GenerateError),
}
