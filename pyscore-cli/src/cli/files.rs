//! Source file discovery for directory scans.

use crate::parsers::is_source_file;

use anyhow::{Context, Result};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Collect every Python file under `root`, recursively.
///
/// Hidden files and ignore files are not filtered; only `exclude` globs
/// (relative to `root`) remove paths. Siblings are visited in file-name order
/// so the result is deterministic.
pub(super) fn collect_source_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut overrides = OverrideBuilder::new(root);
    for pattern in exclude {
        overrides
            .add(&format!("!{pattern}"))
            .with_context(|| format!("Invalid exclude pattern '{pattern}'"))?;
    }
    let overrides = overrides.build().context("Failed to build exclude patterns")?;

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .overrides(overrides)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_some_and(|t| t.is_file()) && is_source_file(path) {
            files.push(path.to_path_buf());
        }
    }

    debug!("Found {} source file(s) under {}", files.len(), root.display());
    Ok(files)
}
