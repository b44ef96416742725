//! Merges scattered data-dictionary JSON fragments into one array.

use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Combiner settings, configured under `[combine]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineConfig {
    /// Directory holding the fragments.
    pub dir: PathBuf,
    /// Destination file; stdout when unset.
    pub output: Option<PathBuf>,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data-dictionary-json"),
            output: None,
        }
    }
}

/// Every top-level `*.json` file in `dir`, sorted by file name.
fn fragment_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parse every fragment in `dir` and return them as one list.
///
/// Any unreadable or invalid fragment fails the whole combination.
pub fn combine_fragments(dir: &Path) -> Result<Vec<Value>> {
    let paths = fragment_paths(dir)?;
    let mut combined = Vec::with_capacity(paths.len());

    for path in &paths {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fragment {}", path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in fragment {}", path.display()))?;
        combined.push(value);
    }

    tracing::debug!("Combined {} fragments from {}", combined.len(), dir.display());
    Ok(combined)
}

/// Combine fragments and emit the pretty-printed array to `output` or stdout.
pub fn run(config: &CombineConfig) -> Result<usize> {
    let combined = combine_fragments(&config.dir)?;
    let json = serde_json::to_string_pretty(&combined).context("Failed to serialize combined data")?;

    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} fragments to {}", combined.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(combined.len())
}
