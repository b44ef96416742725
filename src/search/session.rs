//! Page-level search state: queries issued before the index arrives are replayed.

use super::query::ParsedQuery;
use super::scoring::{ScoreOverride, Scorer};
use super::{SearchEngine, SearchResult};
use crate::index::SearchIndex;
use std::sync::Arc;

/// Results of one query together with the parsed terms the renderer needs.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub parsed: ParsedQuery,
    /// Pop order: the best result is last.
    pub results: Vec<SearchResult>,
}

/// Holds the engine once an index has been loaded, and at most one pending query.
#[derive(Default)]
pub struct SearchSession {
    engine: Option<Arc<SearchEngine>>,
    queued_query: Option<String>,
    scorer: Scorer,
    score_override: Option<ScoreOverride>,
}

impl SearchSession {
    pub fn new(scorer: Scorer) -> Self {
        Self {
            scorer,
            ..Self::default()
        }
    }

    pub fn with_score_override(
        mut self,
        score: impl Fn(&SearchResult) -> i64 + Send + Sync + 'static,
    ) -> Self {
        self.score_override = Some(Arc::new(score));
        self
    }

    pub fn has_index(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&Arc<SearchEngine>> {
        self.engine.as_ref()
    }

    pub fn queued_query(&self) -> Option<&str> {
        self.queued_query.as_deref()
    }

    /// Entry point for a page load: runs the `q` parameter if one was given.
    pub fn init(&mut self, query_param: Option<&str>) -> Option<SearchOutcome> {
        query_param.and_then(|query| self.perform_search(query))
    }

    /// Run `query` now, or queue it until an index is available.
    ///
    /// Blank queries do nothing. Only the latest queued query is kept.
    pub fn perform_search(&mut self, query: &str) -> Option<SearchOutcome> {
        if query.trim().is_empty() {
            return None;
        }

        match &self.engine {
            Some(engine) => Some(run(engine, query)),
            None => {
                tracing::debug!("Index not loaded yet, deferring query '{}'", query);
                self.queued_query = Some(query.to_string());
                None
            }
        }
    }

    /// Install the index and replay any deferred query against it.
    pub fn set_index(&mut self, index: SearchIndex) -> Option<SearchOutcome> {
        let engine = SearchEngine::new(index, self.scorer.clone())
            .with_shared_override(self.score_override.clone());
        let engine = Arc::new(engine);
        self.engine = Some(Arc::clone(&engine));

        self.queued_query.take().map(|query| {
            tracing::debug!("Replaying deferred query '{}'", query);
            run(&engine, &query)
        })
    }
}

fn run(engine: &SearchEngine, query: &str) -> SearchOutcome {
    let parsed = engine.parse(query);
    let results = engine.search_parsed(&parsed);
    SearchOutcome { parsed, results }
}
