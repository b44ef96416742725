pub mod builder;
pub mod cli;
pub mod combine;
pub mod config;
pub mod error;
pub mod index;
pub mod render;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;

pub use builder::{BuilderConfig, DocumentTree, IndexBuilder, build_index};
pub use config::Config;
pub use error::{ConfigError, IndexError, Result};
pub use index::{Postings, SearchIndex, load_artifact, parse_artifact, write_artifact};
pub use render::{DisplayOptions, ResultList, ResultSink, TextSink, render_results};
pub use search::{ParsedQuery, Scorer, SearchEngine, SearchResult, SearchSession};
pub use server::SearchServer;
