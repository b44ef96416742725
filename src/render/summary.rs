//! Contextual excerpts from fetched page content.

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

const MAIN_SELECTOR: &str = r#"[role="main"]"#;

/// Characters of context kept before the keyword.
const CONTEXT_BEFORE: usize = 120;
/// Total length of the excerpt window.
const WINDOW: usize = 240;

/// Concatenated text of an element, skipping scripts, styles and permalink markers.
fn text_content(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    collect_text(element, &mut text);
    text
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                if matches!(el.name(), "script" | "style") || el.classes().any(|c| c == "headerlink")
                {
                    continue;
                }
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

/// Readable text of an HTML fragment, without looking for a main block.
pub fn fragment_text(html: &str) -> String {
    text_content(Html::parse_fragment(html).root_element())
}

/// Extract the readable text of a page's main content block.
///
/// With an anchor (`#section-id`) only that block inside the main content is
/// used; if it cannot be found the whole main block is used instead.
pub fn html_to_text(html: &str, anchor: &str) -> String {
    let document = Html::parse_document(html);

    if !anchor.is_empty() {
        let query = format!("{} {}", MAIN_SELECTOR, anchor);
        let found = Selector::parse(&query)
            .ok()
            .and_then(|selector| document.select(&selector).next().map(text_content));
        if let Some(text) = found {
            return text;
        }
        tracing::warn!(
            "Anchored content block not found via '{}'; falling back to the main content",
            query
        );
    }

    let main = Selector::parse(MAIN_SELECTOR)
        .ok()
        .and_then(|selector| document.select(&selector).next().map(text_content));
    match main {
        Some(text) => text,
        None => {
            tracing::warn!("Content block not found via '{}'", MAIN_SELECTOR);
            String::new()
        }
    }
}

/// Build a short excerpt around the last keyword (in keyword order) found in the page.
///
/// Returns `None` when the page has no main text.
pub fn make_search_summary(html: &str, keywords: &[String], anchor: &str) -> Option<String> {
    let text = html_to_text(html, anchor);
    if text.is_empty() {
        return None;
    }

    let text_lower = text.to_lowercase();
    let position = keywords
        .iter()
        .filter_map(|keyword| text_lower.find(&keyword.to_lowercase()))
        .next_back()
        .map(|byte| text_lower[..byte].chars().count());

    let chars: Vec<char> = text.chars().collect();
    let start = position.map_or(0, |p| p.saturating_sub(CONTEXT_BEFORE)).min(chars.len());
    let end = (start + WINDOW).min(chars.len());

    let top = if start == 0 { "" } else { "..." };
    let tail = if start + WINDOW < chars.len() { "..." } else { "" };
    let window: String = chars[start..end].iter().collect();

    Some(format!("{}{}{}", top, window.trim(), tail))
}

/// Escape text for inclusion in HTML attribute values and text nodes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Case-insensitive alternation of the non-empty `terms`, matched literally.
pub(crate) fn term_pattern(terms: &[String]) -> Option<Regex> {
    let alternatives: Vec<String> = terms
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| regex::escape(t))
        .collect();
    if alternatives.is_empty() {
        return None;
    }

    match Regex::new(&format!("(?i)({})", alternatives.join("|"))) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::debug!("Skipping highlight: {}", e);
            None
        }
    }
}

/// Escape plain `text` for HTML, wrapping case-insensitive occurrences of `terms`
/// in highlight spans.
///
/// Matching runs on the raw text, so terms never match inside an entity.
pub fn highlight(text: &str, terms: &[String]) -> String {
    let Some(pattern) = term_pattern(terms) else {
        return escape_html(text);
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in pattern.find_iter(text) {
        out.push_str(&escape_html(&text[last..found.start()]));
        out.push_str(r#"<span class="highlighted">"#);
        out.push_str(&escape_html(found.as_str()));
        out.push_str("</span>");
        last = found.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}
