//! In-memory search index model.
//!
//! A [`SearchIndex`] is produced once by the builder, serialized into a script
//! artifact, and consumed read-only by the search engine. Field names on the
//! wire follow the artifact format (`docnames`, `alltitles`, `titleterms`, ...).

mod artifact;

pub use artifact::{DEFAULT_VARIABLE, load_artifact, parse_artifact, render_artifact, write_artifact};

use crate::error::IndexError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Position of a document in [`SearchIndex::doc_names`].
pub type DocId = usize;

/// Ordered list of documents containing a term.
///
/// Artifacts encode single-document postings as a bare id and the rest as an
/// array; both forms are normalized into a list here, once, at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Postings(Vec<DocId>);

impl Postings {
    pub fn new(ids: Vec<DocId>) -> Self {
        Self(ids)
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.0.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = DocId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[DocId] {
        &self.0
    }

    /// Append `id` unless it is already the most recent entry.
    pub(crate) fn push_unique(&mut self, id: DocId) {
        if self.0.last() != Some(&id) {
            self.0.push(id);
        }
    }
}

impl<'de> Deserialize<'de> for Postings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(DocId),
            Many(Vec<DocId>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(id) => Self(vec![id]),
            Raw::Many(ids) => Self(ids),
        })
    }
}

impl From<Vec<DocId>> for Postings {
    fn from(ids: Vec<DocId>) -> Self {
        Self(ids)
    }
}

/// A title occurrence: the document and, for section titles, its anchor id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(DocId, Option<String>)", into = "(DocId, Option<String>)")]
pub struct TitleRef {
    pub doc: DocId,
    pub anchor: Option<String>,
}

impl TitleRef {
    pub fn page(doc: DocId) -> Self {
        Self { doc, anchor: None }
    }

    pub fn section(doc: DocId, anchor: impl Into<String>) -> Self {
        Self {
            doc,
            anchor: Some(anchor.into()),
        }
    }
}

impl From<(DocId, Option<String>)> for TitleRef {
    fn from((doc, anchor): (DocId, Option<String>)) -> Self {
        Self { doc, anchor }
    }
}

impl From<TitleRef> for (DocId, Option<String>) {
    fn from(title: TitleRef) -> Self {
        (title.doc, title.anchor)
    }
}

/// An explicit index-entry occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawIndexEntry", into = "RawIndexEntry")]
pub struct IndexEntryRef {
    pub doc: DocId,
    pub anchor: Option<String>,
    /// Primary reference for the entry, as opposed to an incidental cross-reference.
    pub is_main: bool,
}

/// Older artifacts encode the main flag as `0`/`1` instead of a boolean.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MainFlag {
    Bool(bool),
    Int(i64),
}

#[derive(Serialize, Deserialize)]
struct RawIndexEntry(DocId, Option<String>, MainFlag);

impl From<RawIndexEntry> for IndexEntryRef {
    fn from(RawIndexEntry(doc, anchor, flag): RawIndexEntry) -> Self {
        let is_main = match flag {
            MainFlag::Bool(b) => b,
            MainFlag::Int(i) => i != 0,
        };
        Self {
            doc,
            anchor,
            is_main,
        }
    }
}

impl From<IndexEntryRef> for RawIndexEntry {
    fn from(entry: IndexEntryRef) -> Self {
        Self(entry.doc, entry.anchor, MainFlag::Bool(entry.is_main))
    }
}

/// An API object (function, class, ...) documented on some page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(DocId, usize, i64, String, String)",
    into = "(DocId, usize, i64, String, String)"
)]
pub struct ObjectEntry {
    pub doc: DocId,
    /// Key into [`SearchIndex::obj_names`].
    pub obj_type: usize,
    pub priority: i64,
    /// Anchor suffix: `""` means the full name, `"-"` means `{type}-{full name}`.
    pub anchor: String,
    pub name: String,
}

impl From<(DocId, usize, i64, String, String)> for ObjectEntry {
    fn from((doc, obj_type, priority, anchor, name): (DocId, usize, i64, String, String)) -> Self {
        Self {
            doc,
            obj_type,
            priority,
            anchor,
            name,
        }
    }
}

impl From<ObjectEntry> for (DocId, usize, i64, String, String) {
    fn from(o: ObjectEntry) -> Self {
        (o.doc, o.obj_type, o.priority, o.anchor, o.name)
    }
}

/// Labels for an object type, e.g. `("py", "function", "Python function")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct ObjectType {
    pub domain: String,
    pub short_label: String,
    pub long_label: String,
}

impl From<(String, String, String)> for ObjectType {
    fn from((domain, short_label, long_label): (String, String, String)) -> Self {
        Self {
            domain,
            short_label,
            long_label,
        }
    }
}

impl From<ObjectType> for (String, String, String) {
    fn from(t: ObjectType) -> Self {
        (t.domain, t.short_label, t.long_label)
    }
}

/// The complete search index. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchIndex {
    #[serde(rename = "docnames")]
    pub doc_names: Vec<String>,
    #[serde(deserialize_with = "doc_table", skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,
    #[serde(rename = "alltitles")]
    pub all_titles: BTreeMap<String, Vec<TitleRef>>,
    #[serde(deserialize_with = "doc_table", skip_serializing_if = "Vec::is_empty")]
    pub filenames: Vec<String>,
    #[serde(rename = "indexentries", skip_serializing_if = "BTreeMap::is_empty")]
    pub index_entries: BTreeMap<String, Vec<IndexEntryRef>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub terms: BTreeMap<String, Postings>,
    #[serde(rename = "titleterms", skip_serializing_if = "BTreeMap::is_empty")]
    pub title_terms: BTreeMap<String, Postings>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub objects: BTreeMap<String, Vec<ObjectEntry>>,
    #[serde(rename = "objnames", skip_serializing_if = "BTreeMap::is_empty")]
    pub obj_names: BTreeMap<usize, ObjectType>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub excerpts: BTreeMap<String, String>,
}

impl SearchIndex {
    pub fn document_count(&self) -> usize {
        self.doc_names.len()
    }

    pub fn doc_name(&self, id: DocId) -> &str {
        self.doc_names.get(id).map_or("", String::as_str)
    }

    pub fn title(&self, id: DocId) -> &str {
        self.titles.get(id).map_or("", String::as_str)
    }

    pub fn filename(&self, id: DocId) -> &str {
        self.filenames.get(id).map_or("", String::as_str)
    }

    /// Check that every cross-map only references documents listed in `docnames`.
    pub fn validate(&self) -> Result<(), IndexError> {
        let len = self.doc_names.len();
        let check = |field: &'static str, id: DocId| {
            if id < len {
                Ok(())
            } else {
                Err(IndexError::DocumentOutOfRange { field, id, len })
            }
        };

        if self.titles.len() > len {
            check("titles", self.titles.len() - 1)?;
        }
        if self.filenames.len() > len {
            check("filenames", self.filenames.len() - 1)?;
        }
        for title in self.all_titles.values().flatten() {
            check("alltitles", title.doc)?;
        }
        for entry in self.index_entries.values().flatten() {
            check("indexentries", entry.doc)?;
        }
        for id in self.terms.values().flat_map(Postings::iter) {
            check("terms", id)?;
        }
        for id in self.title_terms.values().flat_map(Postings::iter) {
            check("titleterms", id)?;
        }
        for object in self.objects.values().flatten() {
            check("objects", object.doc)?;
        }
        Ok(())
    }
}

/// Accept a per-document table as either an array or an object keyed by decimal id.
fn doc_table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Table {
        List(Vec<String>),
        // String keys: untagged buffering cannot parse integer map keys.
        Map(HashMap<String, String>),
    }

    match Table::deserialize(deserializer)? {
        Table::List(list) => Ok(list),
        Table::Map(map) => {
            // Keys must be dense ids, so the table never outgrows its entry count.
            let len = map.len();
            let mut list = vec![String::new(); len];
            for (key, value) in map {
                let id: DocId = key.parse().map_err(|_| {
                    serde::de::Error::custom(format!("invalid document id key '{}'", key))
                })?;
                let Some(slot) = list.get_mut(id) else {
                    return Err(serde::de::Error::custom(format!(
                        "document id key {} out of range for {} entries",
                        id, len
                    )));
                };
                *slot = value;
            }
            Ok(list)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_postings_accept_scalar_and_list() {
        let terms: BTreeMap<String, Postings> =
            serde_json::from_str(r#"{"foo": [0, 1], "bar": 0}"#).unwrap();
        check!(terms["foo"].as_slice() == [0, 1]);
        check!(terms["bar"].as_slice() == [0]);
    }

    #[test]
    fn test_postings_serialize_as_list() {
        let json = serde_json::to_string(&Postings::new(vec![3])).unwrap();
        check!(json == "[3]");
    }

    #[test]
    fn test_titles_accept_object_keyed_by_id() {
        let index: SearchIndex = serde_json::from_str(
            r#"{"docnames": ["a/b", "c/d"], "titles": {"0": "Intro", "1": "Setup"}}"#,
        )
        .unwrap();
        check!(index.titles == ["Intro", "Setup"]);
        check!(index.title(1) == "Setup");
        check!(index.title(7).is_empty());
    }

    #[test]
    fn test_titles_reject_sparse_or_huge_ids() {
        for json in [
            r#"{"docnames": ["a"], "titles": {"18446744073709551615": "x"}}"#,
            r#"{"docnames": ["a"], "titles": {"4000000000": "x"}}"#,
            r#"{"docnames": ["a", "b"], "filenames": {"0": "a.html", "5": "b.html"}}"#,
        ] {
            check!(serde_json::from_str::<SearchIndex>(json).is_err());
        }
    }

    #[test]
    fn test_index_entry_main_flag_forms() {
        let entries: Vec<IndexEntryRef> =
            serde_json::from_str(r#"[[0, "x", true], [1, null, 0], [2, "", 1]]"#).unwrap();
        check!(entries[0].is_main);
        check!(!entries[1].is_main);
        check!(entries[2].is_main);
        check!(entries[1].anchor.is_none());
    }

    #[test]
    fn test_objects_and_objnames_parse() {
        let index: SearchIndex = serde_json::from_str(
            r#"{
                "docnames": ["api"],
                "objects": {"pkg.mod": [[0, 0, 1, "", "run"]]},
                "objnames": {"0": ["py", "function", "Python function"]}
            }"#,
        )
        .unwrap();
        let object = &index.objects["pkg.mod"][0];
        check!(object.name == "run");
        check!(object.priority == 1);
        check!(index.obj_names[&0].long_label == "Python function");
    }

    #[test]
    fn test_validate_rejects_out_of_range_postings() {
        let mut index = SearchIndex {
            doc_names: vec!["only".into()],
            ..SearchIndex::default()
        };
        index.terms.insert("word".into(), Postings::new(vec![0, 4]));

        let_assert!(Err(IndexError::DocumentOutOfRange { field, id, len }) = index.validate());
        check!(field == "terms");
        check!(id == 4);
        check!(len == 1);
    }

    #[test]
    fn test_validate_accepts_consistent_index() {
        let mut index = SearchIndex {
            doc_names: vec!["a".into(), "b".into()],
            titles: vec!["A".into(), "B".into()],
            ..SearchIndex::default()
        };
        index
            .all_titles
            .insert("A".into(), vec![TitleRef::page(0), TitleRef::section(1, "a")]);
        check!(index.validate().is_ok());
    }
}
