use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doc-search")]
#[command(about = "Build and query search indexes for static documentation sites", long_about = None)]
pub struct Cli {
    /// Configuration file (default: doc-search.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk the page tree and write the search index artifact
    Build {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Index every file instead of only .html and .json
        #[arg(long)]
        all_files: bool,
    },
    /// Merge data-dictionary JSON fragments into one array
    Combine {
        #[arg(short, long)]
        dir: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search an index artifact
    Query {
        query: String,
        #[arg(short, long)]
        index: Option<PathBuf>,
        #[arg(short = 'n', long, default_value = "25")]
        limit: usize,
        /// Print the result list as an HTML fragment
        #[arg(long)]
        html: bool,
        /// JSON content endpoint used for summaries
        #[arg(long)]
        content: Option<PathBuf>,
        /// Match titles only and cut excerpts from the content endpoint
        #[arg(long)]
        excerpts: bool,
    },
    /// Serve the search tool over MCP stdio
    Serve {
        #[arg(short, long)]
        index: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_query_arguments() {
        let cli = Cli::parse_from(["doc-search", "query", "install guide", "--index", "si.js", "-n", "5", "--html"]);
        let_assert!(Commands::Query { query, index, limit, html, content, excerpts } = cli.command);
        check!(query == "install guide");
        check!(index == Some(PathBuf::from("si.js")));
        check!(limit == 5);
        check!(html);
        check!(content.is_none());
        check!(!excerpts);
    }

    #[test]
    fn test_excerpt_query_arguments() {
        let cli = Cli::parse_from(["doc-search", "query", "field", "--excerpts", "--content", "dc.json"]);
        let_assert!(Commands::Query { excerpts: true, content: Some(content), .. } = cli.command);
        check!(content == PathBuf::from("dc.json"));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["doc-search", "build", "--all-files", "--config", "custom.toml"]);
        check!(cli.config == Some(PathBuf::from("custom.toml")));
        let_assert!(Commands::Build { input: None, output: None, all_files: true } = cli.command);
    }
}
