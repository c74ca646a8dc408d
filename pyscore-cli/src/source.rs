//! Source loading
//!
//! A [`SourceUnit`] is the raw text of one analyzed file plus its line list.
//! Lines are produced by splitting on `'\n'` only, so a trailing newline
//! yields a final empty line and an empty file still has one (empty) line.

use crate::error::{AnalysisError, AnalysisResult};
use std::path::{Path, PathBuf};

/// Text and derived lines of one analyzed file
#[derive(Debug, Clone)]
pub struct SourceUnit {
    path: PathBuf,
    name: String,
    text: String,
    lines: Vec<String>,
}

impl SourceUnit {
    /// Read a file as UTF-8.
    pub fn load(path: &Path) -> AnalysisResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.to_path_buf(), text))
    }

    /// Build a unit from in-memory text. `name` doubles as the path.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(PathBuf::from(&name), text.into())
    }

    fn new(path: PathBuf, text: String) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let lines = text.split('\n').map(str::to_owned).collect();
        Self {
            path,
            name,
            text,
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used as the report identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
