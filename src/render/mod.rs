//! Presentation of ranked results.
//!
//! Results are revealed one at a time into a [`ResultSink`]; entries without a
//! precomputed description get a contextual excerpt fetched on demand from a
//! [`ContentSource`]. [`content_search`] is the title-only flow that cuts
//! excerpts from one shared content document.

mod content;
mod excerpts;
mod renderer;
mod sink;
mod summary;

pub use content::{ContentSource, FileContentSource, JsonContentSource};
pub use excerpts::{
    ContentMatch, ContentReport, NO_CONTENT_MATCHES, content_search, excerpts, extract_description,
};
pub use renderer::{NO_RESULTS_MESSAGE, render_results, status_message};
pub use sink::{RenderedItem, ResultList, ResultSink, TextSink};
pub use summary::{fragment_text, highlight, html_to_text, make_search_summary};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How page links are formed from document names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderKind {
    /// One file per document: `guide/intro` + suffix.
    #[default]
    Html,
    /// One directory per document: `guide/intro/`.
    DirHtml,
}

/// Display settings, configured under `[display]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub builder: BuilderKind,
    /// Appended to document names to form links.
    pub link_suffix: String,
    /// Appended to document names to form content requests.
    pub file_suffix: String,
    /// Prefix for content requests.
    pub content_root: String,
    /// Fixed-path JSON content endpoint; page files are read when unset.
    pub content: Option<PathBuf>,
    /// Fetch page content for results without a description.
    pub show_summary: bool,
    /// Mark highlight terms in descriptions and summaries.
    pub highlight: bool,
    /// Pause between revealing consecutive results.
    pub delay_ms: u64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            builder: BuilderKind::Html,
            link_suffix: String::new(),
            file_suffix: String::new(),
            content_root: String::new(),
            content: None,
            show_summary: true,
            highlight: true,
            delay_ms: 5,
        }
    }
}

impl DisplayOptions {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// The content request path and the link target for a document.
    pub fn urls(&self, doc_name: &str) -> (String, String) {
        match self.builder {
            BuilderKind::DirHtml => {
                let mut dirname = format!("{}/", doc_name);
                if dirname == "index/" {
                    dirname.clear();
                } else if dirname.ends_with("/index/") {
                    dirname.truncate(dirname.len() - "index/".len());
                }
                let url = format!("{}{}", self.content_root, dirname);
                (url.clone(), url)
            }
            BuilderKind::Html => (
                format!("{}{}{}", self.content_root, doc_name, self.file_suffix),
                format!("{}{}", doc_name, self.link_suffix),
            ),
        }
    }
}
