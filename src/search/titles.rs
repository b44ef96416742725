//! Matching the query against page/section titles and explicit index entries.

use super::SearchResult;
use super::scoring::{Scorer, scaled};
use crate::index::SearchIndex;

/// Weight for explicit index-entry matches, before length scaling.
const INDEX_ENTRY_WEIGHT: i64 = 100;

/// The query must cover at least half of the text to count as a match; this keeps
/// short queries from hitting every long heading that happens to contain them.
fn covers(text_lower: &str, text_len: usize, query_lower: &str, query_len: usize) -> bool {
    text_lower.contains(query_lower) && query_len * 2 >= text_len
}

/// Match against every title in `alltitles`.
///
/// Shorter titles relative to the query score higher, and page titles get a +1
/// boost over section headings with the same text.
pub(crate) fn match_titles(
    index: &SearchIndex,
    scorer: &Scorer,
    query_lower: &str,
) -> Vec<SearchResult> {
    let query_len = query_lower.chars().count();
    let mut results = Vec::new();

    for (title, found) in &index.all_titles {
        let title_len = title.chars().count();
        if !covers(title.to_lowercase().trim(), title_len, query_lower, query_len) {
            continue;
        }

        for title_ref in found {
            let page_title = index.title(title_ref.doc);
            let is_page_title = page_title == title;
            let score = scaled(scorer.title, query_len, title_len) + i64::from(is_page_title);
            let display = if is_page_title {
                title.clone()
            } else {
                format!("{} > {}", page_title, title)
            };
            let anchor = title_ref
                .anchor
                .as_ref()
                .map_or_else(String::new, |id| format!("#{}", id));

            results.push(SearchResult::for_document(
                index,
                title_ref.doc,
                display,
                anchor,
                None,
                score,
            ));
        }
    }

    results
}

/// Results from explicit index entries, split by entry importance.
#[derive(Debug, Default)]
pub(crate) struct IndexEntryMatches {
    /// Entries marked as the main reference; ranked with everything else.
    pub main: Vec<SearchResult>,
    /// Incidental cross-references; shown after all other results.
    pub secondary: Vec<SearchResult>,
}

/// Match against explicit index entries.
pub(crate) fn match_index_entries(index: &SearchIndex, query_lower: &str) -> IndexEntryMatches {
    let query_len = query_lower.chars().count();
    let mut matches = IndexEntryMatches::default();

    for (entry, found) in &index.index_entries {
        let entry_len = entry.chars().count();
        if !covers(&entry.to_lowercase(), entry_len, query_lower, query_len) {
            continue;
        }

        let score = scaled(INDEX_ENTRY_WEIGHT, query_len, entry_len);
        for entry_ref in found {
            let anchor = match entry_ref.anchor.as_deref() {
                Some(id) if !id.is_empty() => format!("#{}", id),
                _ => String::new(),
            };
            let result = SearchResult::for_document(
                index,
                entry_ref.doc,
                index.title(entry_ref.doc),
                anchor,
                None,
                score,
            );

            if entry_ref.is_main {
                matches.main.push(result);
            } else {
                matches.secondary.push(result);
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexEntryRef, TitleRef};
    use assert2::check;

    fn index() -> SearchIndex {
        let mut index = SearchIndex {
            doc_names: vec!["a/b".into(), "c/d".into()],
            titles: vec!["Intro".into(), "Setup".into()],
            filenames: vec!["a/b.html".into(), "c/d.html".into()],
            ..SearchIndex::default()
        };
        index.all_titles.insert("Intro".into(), vec![TitleRef::page(0)]);
        index.all_titles.insert("Setup".into(), vec![TitleRef::page(1)]);
        index
            .all_titles
            .insert("Introduction to setup".into(), vec![TitleRef::section(1, "intro-setup")]);
        index
    }

    #[test]
    fn test_page_title_match() {
        let results = match_titles(&index(), &Scorer::default(), "intro");
        check!(results.len() == 1);
        check!(results[0].doc_name == "a/b");
        check!(results[0].title == "Intro");
        check!(results[0].anchor.is_empty());
        check!(results[0].score == 16);
        check!(results[0].filename == "a/b.html");
    }

    #[test]
    fn test_section_title_match_is_prefixed_and_anchored() {
        let results = match_titles(&index(), &Scorer::default(), "introduction to");
        check!(results.len() == 1);
        check!(results[0].title == "Setup > Introduction to setup");
        check!(results[0].anchor == "#intro-setup");
        // 15 * 15 / 21 = 10.7
        check!(results[0].score == 11);
    }

    #[test]
    fn test_short_query_does_not_match_long_title() {
        let results = match_titles(&index(), &Scorer::default(), "setup");
        // "Setup" matches; "Introduction to setup" is more than twice as long.
        check!(results.len() == 1);
        check!(results[0].title == "Setup");
    }

    #[test]
    fn test_exact_title_outranks_half_length_substring() {
        let mut idx = index();
        idx.all_titles.insert("Setups".into(), vec![TitleRef::section(1, "setups")]);
        let results = match_titles(&idx, &Scorer::default(), "setup");
        let exact = results.iter().find(|r| r.title == "Setup").unwrap();
        let partial = results.iter().find(|r| r.anchor == "#setups").unwrap();
        check!(exact.score > partial.score);
    }

    #[test]
    fn test_index_entries_split_by_main_flag() {
        let mut idx = index();
        idx.index_entries.insert(
            "setup".into(),
            vec![
                IndexEntryRef {
                    doc: 1,
                    anchor: Some("index-0".into()),
                    is_main: true,
                },
                IndexEntryRef {
                    doc: 0,
                    anchor: Some(String::new()),
                    is_main: false,
                },
            ],
        );

        let matches = match_index_entries(&idx, "setup");
        check!(matches.main.len() == 1);
        check!(matches.main[0].anchor == "#index-0");
        check!(matches.main[0].title == "Setup");
        check!(matches.main[0].score == 100);
        check!(matches.secondary.len() == 1);
        check!(matches.secondary[0].anchor.is_empty());
        check!(matches.secondary[0].title == "Intro");
    }
}
