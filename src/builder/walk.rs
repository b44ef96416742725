//! Lazy traversal of a documentation output tree.

use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};

/// A directory of generated pages, filtered by file extension.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    root: PathBuf,
    /// Extensions without the leading dot. Empty means every file.
    extensions: Vec<String>,
}

impl DocumentTree {
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Page files in sorted depth-first order.
    ///
    /// The walk is lazy and can be restarted by calling `files` again. Hidden
    /// files and ignore files are not special here: everything under the root
    /// is a candidate.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkBuilder::new(&self.root)
            .standard_filters(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    None
                }
            })
            .filter(is_file)
            .map(DirEntry::into_path)
            .filter(|path| self.accepts(path))
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted == ext))
    }

    /// Root-relative path with `/` separators.
    pub fn doc_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_file())
}
