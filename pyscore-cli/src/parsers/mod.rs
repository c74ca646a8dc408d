//! Source parsing using tree-sitter
//!
//! [`python::parse`] turns Python source text into the [`SyntaxTree`] the
//! analyzers walk, or reports why the source is not valid Python.

pub mod python;
pub mod tree;

pub use tree::{Callee, FunctionInfo, Node, NodeKind, SyntaxTree};

use crate::error::AnalysisError;
use std::path::Path;
use thiserror::Error;

/// File extension of analyzable sources
pub const SOURCE_EXTENSION: &str = "py";

/// Why a syntax tree could not be produced
#[derive(Error, Debug)]
pub enum ParseError {
    /// The source is not valid Python. Reported as an issue, not a failure.
    #[error("{message}")]
    Syntax { line: u32, message: String },

    /// The parser itself could not run.
    #[error(transparent)]
    Parser(#[from] AnalysisError),
}

/// Whether a path names a Python source file
pub fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("pkg/mod.py")));
        assert!(!is_source_file(Path::new("pkg/mod.pyi")));
        assert!(!is_source_file(Path::new("README.md")));
        assert!(!is_source_file(Path::new("Makefile")));
    }
}
