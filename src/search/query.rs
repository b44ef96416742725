//! Query parsing: splitting, stop-word filtering, stemming and negation.

use super::tokenize::{TermSet, is_numeric, is_stop_word, split_query};
use rust_stemmers::{Algorithm, Stemmer};

/// A query broken down into the term sets the matchers consume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// The original query string.
    pub query: String,
    /// Stemmed terms every full-text match must contain.
    pub search_terms: TermSet,
    /// Stemmed terms whose documents are removed from full-text matches.
    pub excluded_terms: TermSet,
    /// Lowercased, unstemmed terms used only to mark matches in output.
    pub highlight_terms: TermSet,
    /// Lowercased terms looked up as (possibly qualified) object names.
    pub object_terms: TermSet,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// Parses raw queries. Holds the stemmer so it is created once per engine.
pub struct QueryParser {
    stemmer: Stemmer,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl std::fmt::Debug for QueryParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryParser").finish_non_exhaustive()
    }
}

impl QueryParser {
    /// Stem a lowercased word.
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    /// Break a raw query into required, excluded, highlight and object terms.
    ///
    /// A whitespace-delimited chunk starting with `-` contributes excluded terms.
    pub fn parse(&self, query: &str) -> ParsedQuery {
        let trimmed = query.trim();
        let object_terms: TermSet = split_query(&trimmed.to_lowercase()).collect();

        let mut search_terms = TermSet::default();
        let mut excluded_terms = TermSet::default();
        let mut highlight_terms = TermSet::default();

        for chunk in trimmed.split_whitespace() {
            let (negated, body) = match chunk.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, chunk),
            };

            for raw in split_query(body) {
                let lowercase = raw.to_lowercase();
                if is_stop_word(&lowercase) || is_numeric(raw) {
                    continue;
                }

                let word = self.stem(&lowercase);
                if negated {
                    excluded_terms.insert(word);
                } else {
                    search_terms.insert(word);
                    highlight_terms.insert(lowercase);
                }
            }
        }

        tracing::debug!(
            required = ?search_terms.as_slice(),
            excluded = ?excluded_terms.as_slice(),
            "Parsed query '{}'",
            trimmed
        );

        ParsedQuery {
            query: query.to_string(),
            search_terms,
            excluded_terms,
            highlight_terms,
            object_terms,
        }
    }
}
