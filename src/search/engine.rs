//! The search engine: runs every matcher over one index and ranks the union.

use super::objects::match_objects;
use super::query::{ParsedQuery, QueryParser};
use super::scoring::{ScoreOverride, Scorer, pop_order};
use super::terms::match_terms;
use super::titles::{match_index_entries, match_titles};
use super::SearchResult;
use crate::index::SearchIndex;
use ahash::AHashSet;
use std::sync::Arc;

/// Keyword search over a loaded [`SearchIndex`].
///
/// The engine is immutable; share it behind an `Arc` to serve concurrent queries.
pub struct SearchEngine {
    index: Arc<SearchIndex>,
    scorer: Scorer,
    score_override: Option<ScoreOverride>,
    parser: QueryParser,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("documents", &self.index.document_count())
            .field("scorer", &self.scorer)
            .field("has_score_override", &self.score_override.is_some())
            .finish()
    }
}

impl SearchEngine {
    pub fn new(index: impl Into<Arc<SearchIndex>>, scorer: Scorer) -> Self {
        Self {
            index: index.into(),
            scorer,
            score_override: None,
            parser: QueryParser::default(),
        }
    }

    /// Install a hook that replaces the score of every result before sorting.
    pub fn with_score_override(
        mut self,
        score: impl Fn(&SearchResult) -> i64 + Send + Sync + 'static,
    ) -> Self {
        self.score_override = Some(Arc::new(score));
        self
    }

    pub(crate) fn with_shared_override(mut self, score: Option<ScoreOverride>) -> Self {
        self.score_override = score;
        self
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn parse(&self, query: &str) -> ParsedQuery {
        self.parser.parse(query)
    }

    /// Search for `query`, returning results in pop order: the best result is last.
    ///
    /// An empty query returns no results.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.search_parsed(&self.parse(query))
    }

    /// Search for `query`, returning results best-first.
    pub fn ranked(&self, query: &str) -> Vec<SearchResult> {
        let mut results = self.search(query);
        results.reverse();
        results
    }

    /// Run every matcher for an already parsed query, in pop order.
    pub fn search_parsed(&self, parsed: &ParsedQuery) -> Vec<SearchResult> {
        if parsed.is_empty() {
            return Vec::new();
        }

        let start = std::time::Instant::now();
        let index = self.index.as_ref();
        let query_lower = parsed.query.to_lowercase().trim().to_string();

        let mut primary = match_titles(index, &self.scorer, &query_lower);

        let entries = match_index_entries(index, &query_lower);
        primary.extend(entries.main);
        let mut secondary = entries.secondary;

        for term in parsed.object_terms.iter() {
            primary.extend(match_objects(index, &self.scorer, term, &parsed.object_terms));
        }

        primary.extend(match_terms(
            index,
            &self.scorer,
            &parsed.search_terms,
            &parsed.excluded_terms,
        ));

        if let Some(score) = &self.score_override {
            for result in primary.iter_mut().chain(secondary.iter_mut()) {
                result.score = score(result);
            }
        }

        primary.sort_by(pop_order);
        secondary.sort_by(pop_order);

        // Secondary results come first so they are popped last.
        secondary.extend(primary);
        let results = dedup_keep_best(secondary);

        tracing::debug!(
            "Search for '{}' produced {} results in {:?}",
            parsed.query.trim(),
            results.len(),
            start.elapsed()
        );
        results
    }
}

/// Drop duplicate results, keeping the occurrence closest to the end (the one
/// popped first, i.e. the higher ranked one).
fn dedup_keep_best(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.reverse();
    let mut seen = AHashSet::with_capacity(results.len());
    results.retain(|result| seen.insert(result.dedup_key()));
    results.reverse();
    results
}
