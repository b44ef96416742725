//! Build-time index generation from a tree of generated pages.
//!
//! The walk ([`DocumentTree`]) is decoupled from indexing ([`IndexBuilder`]):
//! any sequence of `(name, path, content)` triples can be indexed.

mod extract;
mod walk;

pub use walk::DocumentTree;

use crate::error::Result;
use crate::index::{DEFAULT_VARIABLE, Postings, SearchIndex, TitleRef, write_artifact};
use crate::search::tokenize::index_words;
use extract::{extract_excerpt, page_key, page_text};
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Builder settings, configured under `[builder]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Directory of generated pages.
    pub input: PathBuf,
    /// Artifact path.
    pub output: PathBuf,
    /// File extensions to index, without the dot. Empty indexes every file.
    pub extensions: Vec<String>,
    /// Global variable name in the artifact.
    pub variable: String,
    pub excerpt_chars: usize,
    /// Fill `terms` and `titleterms` from page content.
    pub index_terms: bool,
    /// Add headings with an `id` to `alltitles` as sections.
    pub index_sections: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("app"),
            output: PathBuf::from("assets/_static/searchindex.js"),
            extensions: vec!["html".into(), "json".into()],
            variable: DEFAULT_VARIABLE.to_string(),
            excerpt_chars: 200,
            index_terms: true,
            index_sections: true,
        }
    }
}

/// Accumulates documents into a [`SearchIndex`]. Document ids follow insertion order.
pub struct IndexBuilder {
    config: BuilderConfig,
    stemmer: Stemmer,
    index: SearchIndex,
}

impl IndexBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            config,
            stemmer: Stemmer::create(Algorithm::English),
            index: SearchIndex::default(),
        }
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Index one page. `doc_name` is its root-relative path.
    pub fn add_document(&mut self, doc_name: String, path: &Path, content: &str) {
        let id = self.index.doc_names.len();
        let key = page_key(path);

        self.index.titles.push(key.clone());
        self.index.filenames.push(doc_name.clone());
        self.index.doc_names.push(doc_name);
        self.index
            .all_titles
            .entry(key.clone())
            .or_default()
            .push(TitleRef::page(id));
        self.index
            .excerpts
            .insert(key.clone(), extract_excerpt(content, self.config.excerpt_chars));

        if !self.config.index_terms && !self.config.index_sections {
            return;
        }
        let page = page_text(path, content);

        if self.config.index_terms {
            let title_words = index_words(&key, &self.stemmer).into_iter().chain(
                page.headings
                    .iter()
                    .flat_map(|heading| index_words(&heading.text, &self.stemmer)),
            );
            for word in title_words.collect::<Vec<_>>() {
                record(&mut self.index.title_terms, word, id);
            }
            for word in index_words(&page.body, &self.stemmer) {
                record(&mut self.index.terms, word, id);
            }
        }

        if self.config.index_sections {
            for heading in page.headings {
                if let Some(anchor) = heading.id {
                    self.index
                        .all_titles
                        .entry(heading.text)
                        .or_default()
                        .push(TitleRef::section(id, anchor));
                }
            }
        }
    }

    pub fn finish(self) -> SearchIndex {
        self.index
    }
}

fn record(map: &mut BTreeMap<String, Postings>, word: String, id: usize) {
    map.entry(word).or_default().push_unique(id);
}

/// Walk `config.input` and index every accepted file.
///
/// Unreadable files are logged and skipped.
pub fn build_index(config: &BuilderConfig) -> SearchIndex {
    let tree = DocumentTree::new(&config.input, config.extensions.clone());
    let mut builder = IndexBuilder::new(config.clone());

    for path in tree.files() {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let doc_name = tree.doc_name(&path);
        tracing::trace!("Indexing {}", doc_name);
        builder.add_document(doc_name, &path, &content);
    }

    builder.finish()
}

/// Build the index and write the artifact. Returns the number of documents.
pub fn run(config: &BuilderConfig) -> Result<usize> {
    let start = std::time::Instant::now();
    let index = build_index(config);
    write_artifact(&config.output, &index, &config.variable)?;

    tracing::info!(
        "Search index generated: {} documents from {} written to {} in {:?}",
        index.document_count(),
        config.input.display(),
        config.output.display(),
        start.elapsed()
    );
    Ok(index.document_count())
}
