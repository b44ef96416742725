//! Where page content for on-demand summaries comes from.

use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Fetches the HTML for a content request path.
pub trait ContentSource {
    fn fetch(&self, request_url: &str) -> impl Future<Output = Result<String>>;
}

#[derive(Deserialize)]
struct ContentPayload {
    description: String,
}

/// A fixed-path JSON resource of the form `{ "description": "<html>" }`.
///
/// Every request resolves to the same document.
#[derive(Debug, Clone)]
pub struct JsonContentSource {
    path: PathBuf,
}

impl JsonContentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for JsonContentSource {
    async fn fetch(&self, _request_url: &str) -> Result<String> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read content {}", self.path.display()))?;
        let payload: ContentPayload = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid content payload in {}", self.path.display()))?;
        Ok(payload.description)
    }
}

/// Page files under a root directory, addressed by request path.
#[derive(Debug, Clone)]
pub struct FileContentSource {
    root: PathBuf,
}

impl FileContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentSource for FileContentSource {
    async fn fetch(&self, request_url: &str) -> Result<String> {
        let relative = request_url.trim_start_matches('/');
        let path = self.root.join(relative);
        // dirhtml requests name a directory
        let path = if request_url.ends_with('/') || relative.is_empty() {
            path.join("index.html")
        } else {
            path
        };
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read page {}", path.display()))
    }
}
