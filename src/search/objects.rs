//! Lookup of query terms as qualified API object names.

use super::SearchResult;
use super::scoring::Scorer;
use super::tokenize::TermSet;
use crate::index::{ObjectEntry, SearchIndex};

/// Find objects whose qualified name contains `term`.
///
/// With several object terms, every other term must also appear in the
/// object's prefix, name, type label or page title.
pub(crate) fn match_objects(
    index: &SearchIndex,
    scorer: &Scorer,
    term: &str,
    object_terms: &TermSet,
) -> Vec<SearchResult> {
    let mut results = Vec::new();

    for (prefix, entries) in &index.objects {
        for entry in entries {
            if let Some(result) = match_object(index, scorer, prefix, entry, term, object_terms) {
                results.push(result);
            }
        }
    }

    results
}

fn match_object(
    index: &SearchIndex,
    scorer: &Scorer,
    prefix: &str,
    entry: &ObjectEntry,
    term: &str,
    object_terms: &TermSet,
) -> Option<SearchResult> {
    let full_name = if prefix.is_empty() {
        entry.name.clone()
    } else {
        format!("{}.{}", prefix, entry.name)
    };
    let full_lower = full_name.to_lowercase();
    if !full_lower.contains(term) {
        return None;
    }

    let last_segment = full_lower.rsplit('.').next().unwrap_or(&full_lower);
    let mut score = if full_lower == term || last_segment == term {
        scorer.obj_name_match
    } else if last_segment.contains(term) {
        scorer.obj_partial_match
    } else {
        0
    };

    let obj_type = index.obj_names.get(&entry.obj_type);
    let long_label = obj_type.map_or("", |t| t.long_label.as_str());
    let title = index.title(entry.doc);

    if object_terms.len() > 1 {
        let haystack = format!("{} {} {} {}", prefix, entry.name, long_label, title).to_lowercase();
        let missing = object_terms
            .iter()
            .filter(|other| *other != term)
            .any(|other| !haystack.contains(other));
        if missing {
            return None;
        }
    }

    let anchor = match entry.anchor.as_str() {
        "" => full_name.clone(),
        "-" => {
            let short_label = obj_type.map_or("", |t| t.short_label.as_str());
            format!("{}-{}", short_label, full_name)
        }
        suffix => suffix.to_string(),
    };

    score += scorer.priority(entry.priority);

    Some(SearchResult::for_document(
        index,
        entry.doc,
        full_name,
        format!("#{}", anchor),
        Some(format!("{}, in {}", long_label, title)),
        score,
    ))
}
