mod common;

use assert2::{check, let_assert};
use common::{TempWorkspace, sample_site};
use doc_search::builder::{self, BuilderConfig, build_index};
use doc_search::index::{TitleRef, load_artifact};
use doc_search::search::{Scorer, SearchEngine};
use rstest::rstest;

fn config(workspace: &TempWorkspace) -> BuilderConfig {
    BuilderConfig {
        input: workspace.path().join("app"),
        output: workspace.path().join("assets/_static/searchindex.js"),
        ..BuilderConfig::default()
    }
}

/// Test: Documents are numbered in sorted walk order, one title entry per stem.
#[rstest]
fn build_lists_pages_in_walk_order(sample_site: TempWorkspace) {
    let index = build_index(&config(&sample_site));

    check!(
        index.doc_names
            == vec![
                "guide/configure.html",
                "guide/install.html",
                "index.html",
                "reference/fields.json",
            ]
    );
    for (id, stem) in ["configure", "install", "index", "fields"].iter().enumerate() {
        check!(index.all_titles[*stem].contains(&TitleRef::page(id)));
        check!(index.excerpts.contains_key(*stem));
    }
    check!(index.excerpts["install"] == "Installation...");
}

/// Test: Every file is indexed when no extensions are configured.
#[rstest]
fn all_files_includes_other_extensions(sample_site: TempWorkspace) {
    let config = BuilderConfig {
        extensions: Vec::new(),
        ..config(&sample_site)
    };
    let index = build_index(&config);
    check!(index.doc_names.len() == 5);
    check!(index.doc_names.contains(&"notes.txt".to_string()));
}

/// Test: The written artifact loads back into an equal index and answers queries.
#[rstest]
fn artifact_round_trip(sample_site: TempWorkspace) {
    let config = config(&sample_site);
    let_assert!(Ok(count) = builder::run(&config));
    check!(count == 4);

    let written = sample_site.read_file("assets/_static/searchindex.js");
    check!(written.starts_with("var Search1 = {\"_index\":"));
    check!(written.trim_end().ends_with(';'));

    let_assert!(Ok(loaded) = load_artifact(&config.output));
    check!(loaded == build_index(&config));

    let engine = SearchEngine::new(loaded, Scorer::default());
    let ranked = engine.ranked("install");
    let_assert!(Some(best) = ranked.first());
    check!(best.doc_name == "guide/install.html");
    check!(best.title == "install");
    check!(best.anchor == "");

    // Position in docnames follows insertion order.
    let ranked = engine.ranked("configure");
    let_assert!(Some(best) = ranked.first());
    check!(best.doc_name == engine.index().doc_name(0));
}

/// Test: Section headings with ids are searchable with their anchors.
#[rstest]
fn sections_and_terms_are_searchable(sample_site: TempWorkspace) {
    let engine = SearchEngine::new(build_index(&config(&sample_site)), Scorer::default());

    let ranked = engine.ranked("installation");
    check!(
        ranked
            .iter()
            .any(|r| r.title == "install > Installation" && r.anchor == "#installation")
    );

    let ranked = engine.ranked("registration");
    let_assert!(Some(best) = ranked.first());
    check!(best.doc_name == "reference/fields.json");

    let ranked = engine.ranked("packages -deprecated");
    check!(ranked.iter().all(|r| r.doc_name != "guide/configure.html"));
    check!(ranked.iter().any(|r| r.doc_name == "guide/install.html"));
}

/// Test: A missing input directory yields an empty index rather than an error.
#[test]
fn missing_input_builds_empty_index() {
    let workspace = TempWorkspace::new();
    let index = build_index(&config(&workspace));
    check!(index.doc_names.is_empty());
}
