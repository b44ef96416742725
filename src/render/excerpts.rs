//! Title search with excerpts cut from a shared content document.
//!
//! Every title containing one of the query words becomes an entry. Its
//! description and excerpts come from the single document behind a
//! [`ContentSource`], windowed around the query words.

use super::content::ContentSource;
use super::summary::{escape_html, fragment_text, highlight, term_pattern};
use crate::error::Result;
use crate::index::SearchIndex;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

/// Characters kept on each side of the first match in a description.
const DESCRIPTION_RADIUS: usize = 100;
/// Characters kept on each side of every match in an excerpt.
const EXCERPT_RADIUS: usize = 30;
/// Description length when no query word occurs in the content.
const DESCRIPTION_FALLBACK: usize = 200;

pub const NO_CONTENT_MATCHES: &str = "No results found.";

/// One title hit with the content cut around the query words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentMatch {
    pub title: String,
    /// Site-absolute link to the top-level section holding the page.
    pub link: String,
    pub description: String,
    pub excerpts: Vec<String>,
}

/// Lowercased, whitespace-separated query words.
pub fn query_words(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

fn char_window(chars: &[char], at: usize, before: usize, after: usize) -> String {
    let start = at.saturating_sub(before);
    let end = at.saturating_add(after).min(chars.len());
    chars[start.min(end)..end].iter().collect()
}

/// The text around the first query word, or the opening of the text when none occurs.
pub fn extract_description(text: &str, words: &[String]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let first = term_pattern(words).and_then(|pattern| pattern.find(text));
    match first {
        Some(found) => {
            let at = text[..found.start()].chars().count();
            char_window(&chars, at, DESCRIPTION_RADIUS, DESCRIPTION_RADIUS)
        }
        None => chars.iter().take(DESCRIPTION_FALLBACK).collect(),
    }
}

/// One short window per query word occurrence, in text order.
pub fn excerpts(text: &str, words: &[String]) -> Vec<String> {
    let Some(pattern) = term_pattern(words) else {
        return Vec::new();
    };
    let chars: Vec<char> = text.chars().collect();

    let mut out = Vec::new();
    let (mut byte, mut at) = (0, 0);
    for found in pattern.find_iter(text) {
        at += text[byte..found.start()].chars().count();
        byte = found.start();
        out.push(char_window(&chars, at, EXCERPT_RADIUS, EXCERPT_RADIUS));
    }
    out
}

/// Titles containing any query word, with the document their first reference points at.
fn matching_titles<'i>(index: &'i SearchIndex, words: &[String]) -> Vec<(&'i str, &'i str)> {
    index
        .all_titles
        .iter()
        .filter(|(title, _)| {
            let title = title.to_lowercase();
            words.iter().any(|word| title.contains(word.as_str()))
        })
        .filter_map(|(title, refs)| {
            refs.first()
                .map(|first| (title.as_str(), index.doc_name(first.doc)))
        })
        .collect()
}

/// Match `query` against the index titles and cut excerpts from `source`.
///
/// The content is fetched once and only when some title matches.
pub async fn content_search<C: ContentSource>(
    index: &SearchIndex,
    query: &str,
    source: &C,
) -> Result<Vec<ContentMatch>> {
    let words = query_words(query);
    let titles = matching_titles(index, &words);
    if titles.is_empty() {
        return Ok(Vec::new());
    }

    let html = source.fetch("").await?;
    let text = fragment_text(&html);
    let description = extract_description(&text, &words);
    let found = excerpts(&description, &words);
    tracing::debug!(
        "Content search for '{}' matched {} titles with {} excerpts",
        query,
        titles.len(),
        found.len()
    );

    Ok(titles
        .into_iter()
        .map(|(title, doc_name)| ContentMatch {
            title: title.to_string(),
            link: format!("/{}", doc_name.split('/').next().unwrap_or_default()),
            description: description.clone(),
            excerpts: found.clone(),
        })
        .collect())
}

/// Content search results with the query words they were cut around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentReport {
    pub words: Vec<String>,
    pub matches: Vec<ContentMatch>,
}

impl ContentReport {
    pub fn new(query: &str, matches: Vec<ContentMatch>) -> Self {
        Self {
            words: query_words(query),
            matches,
        }
    }

    pub fn summary(&self) -> String {
        format!("Found {} result(s)", self.matches.len())
    }

    /// Render the summary line and result list with highlighted excerpts.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        if self.matches.is_empty() {
            let _ = writeln!(html, "<p id=\"search-results-summary\"></p>");
            let _ = writeln!(html, "<ul id=\"search-results\"><p>{}</p></ul>", NO_CONTENT_MATCHES);
            return html;
        }

        let _ = writeln!(html, "<p id=\"search-results-summary\">{}</p>", self.summary());
        html.push_str("<ul id=\"search-results\">\n");
        for found in &self.matches {
            let _ = write!(
                html,
                "<li><a href=\"{}\"><h3>{}</h3></a><p>{}</p>",
                escape_html(&found.link),
                escape_html(&found.title),
                highlight(&found.description, &self.words)
            );
            for excerpt in &found.excerpts {
                let _ = write!(html, "<p>{}</p>", highlight(excerpt, &self.words));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
        html
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.matches.is_empty() {
            writeln!(out, "{}", NO_CONTENT_MATCHES)?;
            return Ok(());
        }
        writeln!(out, "{}", self.summary())?;
        for (n, found) in self.matches.iter().enumerate() {
            writeln!(out, "{}. {} ({})", n + 1, found.title, found.link)?;
            writeln!(out, "   {}", found.description.trim())?;
            for excerpt in &found.excerpts {
                writeln!(out, "   - {}", excerpt.trim())?;
            }
        }
        Ok(())
    }
}
