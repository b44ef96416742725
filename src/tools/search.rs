//! Keyword search tool over the loaded documentation index.

use crate::render::DisplayOptions;
use crate::search::{SearchEngine, SearchResult};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query. Prefix a word with '-' to exclude pages containing it
    pub query: String,
    /// Maximum number of results to return (default: 10)
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,
}

fn default_limit() -> Option<usize> {
    Some(10)
}

/// Run a search and format the best results as text.
pub fn handle_search(
    engine: &SearchEngine,
    display: &DisplayOptions,
    request: SearchRequest,
) -> Result<String, String> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err("Query must not be empty".to_string());
    }

    let ranked = engine.ranked(query);
    if ranked.is_empty() {
        let mut msg = format!("No results found for '{}'.\n\n", query);
        msg.push_str("Search tips:\n");
        msg.push_str("• Every word must appear in a page; try fewer words\n");
        msg.push_str("• Search uses stemming: 'installing' matches 'install'\n");
        msg.push_str("• Common words like 'the' or 'and' are ignored\n");
        return Ok(msg);
    }

    let limit = request.limit.unwrap_or(10);
    Ok(format_search_results(&ranked, query, limit, display))
}

fn format_search_results(
    ranked: &[SearchResult],
    query: &str,
    limit: usize,
    display: &DisplayOptions,
) -> String {
    let shown = ranked.len().min(limit);
    let mut output = format!(
        "Search results for '{}' ({} of {}):\n\n",
        query,
        shown,
        ranked.len()
    );

    for (idx, result) in ranked.iter().take(limit).enumerate() {
        let (_, link) = display.urls(&result.doc_name);
        let _ = writeln!(
            output,
            "{}. {} ({}{}) - score: {}",
            idx + 1,
            result.title,
            link,
            result.anchor,
            result.score
        );
        if let Some(description) = &result.description {
            let _ = writeln!(output, "   {}", description);
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{SearchIndex, TitleRef};
    use crate::search::Scorer;
    use assert2::{check, let_assert};

    fn engine() -> SearchEngine {
        let mut index = SearchIndex {
            doc_names: vec!["setup.html".into(), "setup-advanced.html".into()],
            titles: vec!["setup".into(), "setup-advanced".into()],
            ..SearchIndex::default()
        };
        index.all_titles.insert("setup".into(), vec![TitleRef::page(0)]);
        index
            .all_titles
            .insert("Advanced".into(), vec![TitleRef::section(1, "advanced")]);
        SearchEngine::new(index, Scorer::default())
    }

    fn request(query: &str, limit: Option<usize>) -> SearchRequest {
        SearchRequest {
            query: query.into(),
            limit,
        }
    }

    #[test]
    fn test_formats_ranked_results() {
        let_assert!(Ok(text) = handle_search(&engine(), &DisplayOptions::default(), request("setup", None)));
        check!(text.starts_with("Search results for 'setup' (1 of 1):"));
        check!(text.contains("1. setup (setup.html) - score: 16"));
    }

    #[test]
    fn test_limit() {
        let_assert!(Ok(text) = handle_search(&engine(), &DisplayOptions::default(), request("setup", Some(0))));
        check!(text.starts_with("Search results for 'setup' (0 of 1):"));
        check!(!text.contains("1."));
    }

    #[test]
    fn test_no_results() {
        let_assert!(Ok(text) = handle_search(&engine(), &DisplayOptions::default(), request("missing", None)));
        check!(text.starts_with("No results found for 'missing'."));
    }

    #[test]
    fn test_empty_query_is_error() {
        check!(handle_search(&engine(), &DisplayOptions::default(), request("  ", None)).is_err());
    }
}
