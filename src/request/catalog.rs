//! Selectable object catalog loaded from config

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use super::odf::OdfPath;
use crate::config::CatalogConfig;

/// Parse catalog lines, skipping blanks, `#` comments and invalid paths.
///
/// Duplicates keep their first position.
pub fn parse_catalog<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<OdfPath> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<OdfPath>() {
            Ok(path) => {
                if seen.insert(path.clone()) {
                    paths.push(path);
                }
            }
            Err(e) => {
                tracing::warn!(line, error = %e, "Skipping invalid catalog entry");
            }
        }
    }

    paths
}

/// Load the catalog: inline `objects` first, then the catalog file
pub fn load_catalog(config: &CatalogConfig) -> Result<Vec<OdfPath>> {
    let file_contents = match config.file.as_deref() {
        Some(file) => std::fs::read_to_string(Path::new(file))
            .with_context(|| format!("Failed to read catalog file {file}"))?,
        None => String::new(),
    };

    let paths = parse_catalog(
        config
            .objects
            .iter()
            .map(String::as_str)
            .chain(file_contents.lines()),
    );

    tracing::debug!(count = paths.len(), "Loaded object catalog");
    Ok(paths)
}
