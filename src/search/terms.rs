//! Full-text matching against the stemmed term postings.

use super::SearchResult;
use super::scoring::Scorer;
use super::tokenize::{MIN_INDEXED_LENGTH, TermSet};
use crate::index::{DocId, Postings, SearchIndex};
use ahash::AHashMap;
use std::collections::BTreeMap;

/// Per-document bookkeeping: the best score for each matched word, in match order.
#[derive(Default)]
struct DocMatches<'q> {
    words: Vec<(&'q str, i64)>,
}

impl<'q> DocMatches<'q> {
    fn record(&mut self, word: &'q str, score: i64) {
        match self.words.iter_mut().find(|(w, _)| *w == word) {
            Some(entry) => entry.1 = entry.1.max(score),
            None => self.words.push((word, score)),
        }
    }

    fn best(&self) -> i64 {
        self.words.iter().map(|(_, s)| *s).max().unwrap_or(0)
    }
}

/// Postings that contribute to `word`, with the weight each one carries.
///
/// Exact keys use the full weight. Words of at least three characters that are
/// not an exact key also pull in every key containing them, at the partial
/// weight, to catch stemmed variants that were indexed differently.
fn sources<'i>(
    map: &'i BTreeMap<String, Postings>,
    word: &str,
    exact: i64,
    partial: i64,
    out: &mut Vec<(&'i Postings, i64)>,
) {
    match map.get(word) {
        Some(postings) => out.push((postings, exact)),
        None if word.chars().count() >= MIN_INDEXED_LENGTH => {
            out.extend(
                map.iter()
                    .filter(|(term, _)| term.contains(word))
                    .map(|(_, postings)| (postings, partial)),
            );
        }
        None => {}
    }
}

fn is_excluded(index: &SearchIndex, excluded: &TermSet, doc: DocId) -> bool {
    excluded.iter().any(|term| {
        index.terms.get(term).is_some_and(|p| p.contains(doc))
            || index.title_terms.get(term).is_some_and(|p| p.contains(doc))
    })
}

/// Find documents containing every required term and none of the excluded ones.
///
/// A document's score is its single strongest term hit, not the sum.
pub(crate) fn match_terms(
    index: &SearchIndex,
    scorer: &Scorer,
    search_terms: &TermSet,
    excluded_terms: &TermSet,
) -> Vec<SearchResult> {
    let mut matches: AHashMap<DocId, DocMatches<'_>> = AHashMap::new();
    let mut order: Vec<DocId> = Vec::new();

    for word in search_terms.iter() {
        let mut found = Vec::new();
        sources(&index.terms, word, scorer.term, scorer.partial_term, &mut found);
        sources(
            &index.title_terms,
            word,
            scorer.title,
            scorer.partial_title,
            &mut found,
        );

        for (postings, score) in found {
            for doc in postings.iter() {
                matches
                    .entry(doc)
                    .or_insert_with(|| {
                        order.push(doc);
                        DocMatches::default()
                    })
                    .record(word, score);
            }
        }
    }

    // Short words are never indexed, so a document may legitimately match only
    // the longer ones.
    let required = search_terms.len();
    let required_indexed = search_terms
        .iter()
        .filter(|term| term.chars().count() >= MIN_INDEXED_LENGTH)
        .count();

    let mut results = Vec::new();
    for doc in order {
        let Some(doc_matches) = matches.get(&doc) else {
            continue;
        };
        let matched = doc_matches.words.len();
        if matched != required && matched != required_indexed {
            continue;
        }
        if is_excluded(index, excluded_terms, doc) {
            continue;
        }

        results.push(SearchResult::for_document(
            index,
            doc,
            index.title(doc),
            "",
            None,
            doc_matches.best(),
        ));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn terms(list: &[&str]) -> TermSet {
        list.iter().copied().collect()
    }

    fn index() -> SearchIndex {
        let mut index = SearchIndex {
            doc_names: vec!["one".into(), "two".into(), "three".into()],
            titles: vec!["One".into(), "Two".into(), "Three".into()],
            ..SearchIndex::default()
        };
        index.terms.insert("foo".into(), Postings::new(vec![0, 1]));
        index.terms.insert("bar".into(), Postings::new(vec![0]));
        index.terms.insert("configur".into(), Postings::new(vec![2]));
        index.title_terms.insert("foo".into(), Postings::new(vec![1]));
        index
    }

    #[test]
    fn test_all_terms_required() {
        let results = match_terms(&index(), &Scorer::default(), &terms(&["foo", "bar"]), &terms(&[]));
        check!(results.len() == 1);
        check!(results[0].doc_name == "one");
        check!(results[0].score == 5);
    }

    #[test]
    fn test_title_hit_takes_max_score() {
        let results = match_terms(&index(), &Scorer::default(), &terms(&["foo"]), &terms(&[]));
        let two = results.iter().find(|r| r.doc_name == "two").unwrap();
        check!(two.score == 15);
        let one = results.iter().find(|r| r.doc_name == "one").unwrap();
        check!(one.score == 5);
    }

    #[test]
    fn test_excluded_terms_skip_only_their_documents() {
        // Document 0 is excluded via "bar"; document 1 must still be returned.
        let results = match_terms(&index(), &Scorer::default(), &terms(&["foo"]), &terms(&["bar"]));
        check!(results.len() == 1);
        check!(results[0].doc_name == "two");
    }

    #[test]
    fn test_partial_key_match() {
        let results = match_terms(&index(), &Scorer::default(), &terms(&["config"]), &terms(&[]));
        check!(results.len() == 1);
        check!(results[0].doc_name == "three");
        check!(results[0].score == 2);
    }

    #[test]
    fn test_short_terms_do_not_block_matches() {
        let results = match_terms(&index(), &Scorer::default(), &terms(&["bar", "xy"]), &terms(&[]));
        check!(results.len() == 1);
        check!(results[0].doc_name == "one");
    }

    #[test]
    fn test_body_hit_outranks_weaker_title_hit() {
        let scorer = Scorer {
            term: 20,
            ..Scorer::default()
        };
        let results = match_terms(&index(), &scorer, &terms(&["foo"]), &terms(&[]));
        let two = results.iter().find(|r| r.doc_name == "two").unwrap();
        check!(two.score == 20);
    }

    #[test]
    fn test_unmatched_required_term_yields_nothing() {
        let results = match_terms(&index(), &Scorer::default(), &terms(&["foo", "zzz"]), &terms(&[]));
        check!(results.is_empty());
    }
}
