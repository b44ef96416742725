//! Reading and writing the script-embeddable index artifact.
//!
//! The artifact is a classic script defining a global, e.g.
//! `var Search1 = {"_index": {...}};`. Sphinx-style `Search.setIndex({...})`
//! payloads and bare JSON are accepted on load as well.

use super::SearchIndex;
use crate::error::{IndexError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::result::Result as StdResult;

/// Global variable name the page template expects the index under.
pub const DEFAULT_VARIABLE: &str = "Search1";

const SET_INDEX_CALL: &str = "Search.setIndex(";

#[derive(Deserialize)]
struct Wrapped {
    #[serde(rename = "_index")]
    index: SearchIndex,
}

#[derive(Serialize)]
struct WrappedRef<'a> {
    #[serde(rename = "_index")]
    index: &'a SearchIndex,
}

/// Extract the JSON payload from an artifact's source text.
fn payload(source: &str) -> StdResult<&str, IndexError> {
    let body = source.trim().trim_end_matches(';').trim_end();

    if let Some(call) = body.strip_prefix(SET_INDEX_CALL) {
        return call
            .strip_suffix(')')
            .ok_or_else(|| IndexError::InvalidArtifact("unterminated Search.setIndex call".into()));
    }

    if body.starts_with('{') {
        return Ok(body);
    }

    for keyword in ["var ", "let ", "const "] {
        if let Some(declaration) = body.strip_prefix(keyword) {
            let (_, value) = declaration.split_once('=').ok_or_else(|| {
                IndexError::InvalidArtifact(format!("'{}' declaration without a value", keyword.trim()))
            })?;
            return Ok(value.trim());
        }
    }

    let preview: String = body.chars().take(40).collect();
    Err(IndexError::InvalidArtifact(format!(
        "expected a script declaration or JSON object, found '{}'",
        preview
    )))
}

/// Parse and validate an index artifact.
pub fn parse_artifact(source: &str) -> StdResult<SearchIndex, IndexError> {
    let json = payload(source)?;
    let value: serde_json::Value = serde_json::from_str(json)?;

    // Parse from the text again rather than the Value so integer map keys go
    // through serde_json's key parsing.
    let index = if value.get("_index").is_some() {
        serde_json::from_str::<Wrapped>(json)?.index
    } else {
        serde_json::from_str::<SearchIndex>(json)?
    };

    index.validate()?;
    Ok(index)
}

/// Render an index as a script that binds it to the global `variable`.
pub fn render_artifact(index: &SearchIndex, variable: &str) -> StdResult<String, IndexError> {
    let json = serde_json::to_string(&WrappedRef { index })?;
    Ok(format!("var {} = {};", variable, json))
}

/// Load an index artifact from disk.
pub fn load_artifact(path: &Path) -> Result<SearchIndex> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read search index {}", path.display()))?;
    let index = parse_artifact(&source)
        .with_context(|| format!("Failed to parse search index {}", path.display()))?;

    tracing::debug!(
        "Loaded search index {} ({} documents, {} titles, {} terms)",
        path.display(),
        index.document_count(),
        index.all_titles.len(),
        index.terms.len()
    );
    Ok(index)
}

/// Write an index artifact, creating parent directories as needed.
pub fn write_artifact(path: &Path, index: &SearchIndex, variable: &str) -> Result<()> {
    let script = render_artifact(index, variable)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, script)
        .with_context(|| format!("Failed to write search index {}", path.display()))?;
    Ok(())
}
