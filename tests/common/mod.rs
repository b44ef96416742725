//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_site`: A temporary page tree shaped like generated documentation
//! - `sample_index`: A hand-written index covering every matcher
//!
//! [`TempWorkspace`] provides a reusable temp directory abstraction for any test
//! that needs filesystem isolation.

use doc_search::index::{IndexEntryRef, ObjectEntry, ObjectType, Postings, SearchIndex, TitleRef};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace directory for test isolation.
///
/// # Example
///
/// ```ignore
/// let workspace = TempWorkspace::new();
/// workspace.create_file("app/index.html", "<h1>Home</h1>");
/// assert!(workspace.path().join("app/index.html").exists());
/// ```
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a directory (and all parent directories) within this workspace.
    ///
    /// # Panics
    /// Panics if directory creation fails.
    pub fn create_dir(&self, path: &str) {
        let full_path = self.root.join(path);
        std::fs::create_dir_all(&full_path)
            .unwrap_or_else(|e| panic!("Failed to create directory '{}': {}", path, e));
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Reads a file from this workspace.
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.root.join(path))
            .unwrap_or_else(|e| panic!("Failed to read file '{}': {}", path, e))
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps body HTML in a page with a main content block.
#[allow(dead_code)]
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>{title}</title></head><body><nav>Site menu</nav><div role="main"><h1 id="{id}">{title}</h1>{body}</div></body></html>"#,
        title = title,
        id = title.to_lowercase().replace(' ', "-"),
        body = body
    )
}

/// A small generated site under `app/`.
#[allow(dead_code)]
#[fixture]
pub fn sample_site() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    workspace.create_file(
        "app/index.html",
        &page("Welcome", "<p>Start here to install and configure the tool.</p>"),
    );
    workspace.create_file(
        "app/guide/install.html",
        &page(
            "Installation",
            "<p>Download the packages for your platform, then run the installer.</p>",
        ),
    );
    workspace.create_file(
        "app/guide/configure.html",
        &page(
            "Configuration",
            "<p>Settings live in one file. Deprecated options are listed at the end.</p>",
        ),
    );
    workspace.create_file(
        "app/reference/fields.json",
        r#"{"name": "patient_id", "description": "Unique identifier assigned at registration"}"#,
    );
    workspace.create_file("app/notes.txt", "scratch notes, not part of the site");
    workspace
}

/// An index exercising titles, index entries, objects and terms.
#[allow(dead_code)]
#[fixture]
pub fn sample_index() -> SearchIndex {
    let mut index = SearchIndex {
        doc_names: vec![
            "guide/install".into(),
            "guide/usage".into(),
            "api/client".into(),
        ],
        titles: vec!["Installation".into(), "Usage".into(), "Client API".into()],
        filenames: vec![
            "guide/install.rst".into(),
            "guide/usage.rst".into(),
            "api/client.rst".into(),
        ],
        ..SearchIndex::default()
    };

    index.all_titles.insert("Installation".into(), vec![TitleRef::page(0)]);
    index.all_titles.insert("Usage".into(), vec![TitleRef::page(1)]);
    index.all_titles.insert("Client API".into(), vec![TitleRef::page(2)]);
    index
        .all_titles
        .insert("Installing packages".into(), vec![TitleRef::section(0, "installing-packages")]);

    index.index_entries.insert(
        "install".into(),
        vec![
            IndexEntryRef {
                doc: 0,
                anchor: Some("index-0".into()),
                is_main: true,
            },
            IndexEntryRef {
                doc: 1,
                anchor: None,
                is_main: false,
            },
        ],
    );

    index.objects.insert(
        "client".into(),
        vec![ObjectEntry {
            doc: 2,
            obj_type: 0,
            priority: 1,
            anchor: String::new(),
            name: "connect".into(),
        }],
    );
    index.obj_names.insert(
        0,
        ObjectType {
            domain: "py".into(),
            short_label: "function".into(),
            long_label: "Python function".into(),
        },
    );

    index.terms.insert("instal".into(), Postings::new(vec![0, 1]));
    index.terms.insert("packag".into(), Postings::new(vec![0]));
    index.terms.insert("connect".into(), Postings::new(vec![1, 2]));
    index.terms.insert("deprec".into(), Postings::new(vec![1]));
    index.title_terms.insert("usag".into(), Postings::new(vec![1]));
    index
}
