//! Text tokenization and stemming shared by the query parser and the index builder.

use regex::Regex;
use rust_stemmers::Stemmer;
use std::sync::LazyLock;

/// Words shorter than this are never written to the term maps.
pub(crate) const MIN_INDEXED_LENGTH: usize = 3;

/// Common English stop words, skipped both when indexing and when querying.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "near", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
    "these", "they", "this", "to", "was", "will", "with",
];

/// Runs of anything other than letters, numbers, underscores and emoji separate terms.
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{Letter}\p{Number}_\p{Emoji_Presentation}]+").unwrap()
});

/// Split text into raw terms on Unicode word boundaries, dropping empty pieces.
pub fn split_query(text: &str) -> impl Iterator<Item = &str> {
    SEPARATOR.split(text).filter(|term| !term.is_empty())
}

pub(crate) fn is_stop_word(lowercase: &str) -> bool {
    STOP_WORDS.contains(&lowercase)
}

pub(crate) fn is_numeric(term: &str) -> bool {
    !term.is_empty() && term.bytes().all(|b| b.is_ascii_digit())
}

/// Tokenize text for indexing: split, lowercase, drop stop words, numbers and
/// short words, then stem.
pub(crate) fn index_words(text: &str, stemmer: &Stemmer) -> Vec<String> {
    split_query(text)
        .filter_map(|raw| {
            let lowercase = raw.to_lowercase();
            if is_stop_word(&lowercase) || is_numeric(&lowercase) {
                return None;
            }
            let stemmed = stemmer.stem(&lowercase).into_owned();
            (stemmed.chars().count() >= MIN_INDEXED_LENGTH).then_some(stemmed)
        })
        .collect()
}

/// Insertion-ordered set of terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet(Vec<String>);

impl TermSet {
    /// Adds `term`, returning `false` if it was already present.
    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.contains(&term) {
            return false;
        }
        self.0.push(term);
        true
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.iter().any(|t| t == term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for TermSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        for term in iter {
            set.insert(term);
        }
        set
    }
}
