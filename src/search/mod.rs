//! Keyword search over a documentation index.
//!
//! Queries are parsed into stemmed terms, matched against titles, explicit index
//! entries, API objects and full-text postings, then merged, de-duplicated and
//! ordered. Everything here is pure: rendering lives in [`crate::render`].

// Module declarations
pub(crate) mod engine;
pub(crate) mod objects;
pub(crate) mod query;
pub(crate) mod result;
pub(crate) mod scoring;
pub(crate) mod session;
pub(crate) mod terms;
pub(crate) mod titles;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use engine::SearchEngine;
pub use query::{ParsedQuery, QueryParser};
pub use result::SearchResult;
pub use scoring::{ScoreOverride, Scorer};
pub use session::{SearchOutcome, SearchSession};
pub use tokenize::{TermSet, split_query};
