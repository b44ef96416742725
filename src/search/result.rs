use crate::index::{DocId, SearchIndex};
use serde::Serialize;

/// One ranked hit, passed between the matchers, the merge step and the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub doc_name: String,
    pub title: String,
    /// `#anchor` fragment, or empty for the top of the page.
    pub anchor: String,
    pub description: Option<String>,
    pub score: i64,
    pub filename: String,
}

/// Identity of a result for de-duplication: everything except the score.
pub(crate) type DedupKey = (String, String, String, Option<String>, String);

impl SearchResult {
    /// Build a result for `doc`, filling name and filename from the index.
    pub(crate) fn for_document(
        index: &SearchIndex,
        doc: DocId,
        title: impl Into<String>,
        anchor: impl Into<String>,
        description: Option<String>,
        score: i64,
    ) -> Self {
        Self {
            doc_name: index.doc_name(doc).to_string(),
            title: title.into(),
            anchor: anchor.into(),
            description,
            score,
            filename: index.filename(doc).to_string(),
        }
    }

    pub(crate) fn dedup_key(&self) -> DedupKey {
        (
            self.doc_name.clone(),
            self.title.clone(),
            self.anchor.clone(),
            self.description.clone(),
            self.filename.clone(),
        )
    }
}
