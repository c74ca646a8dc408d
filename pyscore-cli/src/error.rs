//! Error types for the analysis library
//!
//! Quality findings are never errors; they travel inside the report. The
//! variants here cover the faults that stop a file from being analyzed at all.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while analyzing a file
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Python grammar could not be loaded: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("Parser aborted before producing a tree")]
    ParserAborted,

    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
