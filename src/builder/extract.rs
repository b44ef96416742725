//! Per-page extraction: page key, excerpt, headings and indexable text.

use ahash::AHashSet;
use regex::Regex;
use scraper::{Html, Selector};
use std::path::Path;
use std::sync::LazyLock;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h[1-6][^>]*>(.*?)</h[1-6]>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").unwrap());

/// The file name without its last extension.
pub(crate) fn page_key(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Heading text of a page, tags stripped, truncated to `max_chars` and
/// followed by `...`.
pub(crate) fn extract_excerpt(content: &str, max_chars: usize) -> String {
    let text = HEADER
        .find_iter(content)
        .map(|header| TAG.replace_all(header.as_str(), "").into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let truncated: String = text.trim().chars().take(max_chars).collect();
    format!("{}...", truncated)
}

/// A heading of a page, with its `id` attribute when it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Heading {
    pub(crate) text: String,
    pub(crate) id: Option<String>,
}

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());
static SKIPPED_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script, style").unwrap());

/// Parsed page content ready for indexing.
pub(crate) struct PageText {
    pub(crate) headings: Vec<Heading>,
    pub(crate) body: String,
}

/// Pull headings and body text out of a page according to its file type.
pub(crate) fn page_text(path: &Path, content: &str) -> PageText {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html" | "htm") => html_text(content),
        Some("json") => PageText {
            headings: Vec::new(),
            body: json_text(content),
        },
        _ => PageText {
            headings: Vec::new(),
            body: content.to_string(),
        },
    }
}

fn html_text(content: &str) -> PageText {
    let document = Html::parse_document(content);

    let headings = document
        .select(&HEADING_SELECTOR)
        .map(|element| Heading {
            text: element.text().collect::<String>().trim().to_string(),
            id: element.value().id().map(str::to_string),
        })
        .filter(|heading| !heading.text.is_empty())
        .collect();

    let skipped: AHashSet<_> = document
        .select(&SKIPPED_SELECTOR)
        .flat_map(|element| element.descendants().map(|node| node.id()))
        .collect();
    let body = document
        .root_element()
        .descendants()
        .filter(|node| !skipped.contains(&node.id()))
        .filter_map(|node| node.value().as_text().map(|text| (**text).to_owned()))
        .collect::<Vec<_>>()
        .join(" ");

    PageText { headings, body }
}

/// Every string value of a JSON document, joined by spaces. Invalid JSON is
/// indexed as plain text.
fn json_text(content: &str) -> String {
    fn collect(value: &serde_json::Value, out: &mut Vec<String>) {
        match value {
            serde_json::Value::String(s) => out.push(s.clone()),
            serde_json::Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
            serde_json::Value::Object(map) => map.values().for_each(|v| collect(v, out)),
            _ => {}
        }
    }

    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(value) => {
            let mut out = Vec::new();
            collect(&value, &mut out);
            out.join(" ")
        }
        Err(e) => {
            tracing::debug!("Indexing invalid JSON as text: {}", e);
            content.to_string()
        }
    }
}
