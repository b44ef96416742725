use anyhow::Context;
use clap::Parser;
use doc_search::cli::{Cli, Commands};
use doc_search::config::Config;
use doc_search::render::{
    ContentReport, DisplayOptions, FileContentSource, JsonContentSource, ResultList, ResultSink,
    TextSink, content_search,
};
use doc_search::search::{ParsedQuery, SearchResult};
use doc_search::{SearchEngine, SearchServer, builder, combine, load_artifact, render_results};
use rmcp::{ServiceExt, transport::stdio};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    doc_search::tracing::init(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let mut config = Config::discover(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Build {
            input,
            output,
            all_files,
        } => {
            if let Some(input) = input {
                config.builder.input = input;
            }
            if let Some(output) = output {
                config.builder.output = output;
            }
            if all_files {
                config.builder.extensions.clear();
            }
            let builder_config = config.builder;
            let count = tokio::task::spawn_blocking(move || builder::run(&builder_config))
                .await
                .context("Index build task panicked")??;
            println!("Search index generated successfully ({} documents).", count);
        }
        Commands::Combine { dir, output } => {
            if let Some(dir) = dir {
                config.combine.dir = dir;
            }
            if output.is_some() {
                config.combine.output = output;
            }
            combine::run(&config.combine)?;
        }
        Commands::Query {
            query,
            index,
            limit,
            html,
            content,
            excerpts,
        } => {
            if content.is_some() {
                config.display.content = content;
            }
            let index_path = index.unwrap_or_else(|| config.builder.output.clone());
            if excerpts {
                run_excerpt_query(&config, &index_path, &query, html).await?;
            } else {
                run_query(&config, &index_path, &query, limit, html).await?;
            }
        }
        Commands::Serve { index } => {
            let index_path = index.unwrap_or_else(|| config.builder.output.clone());
            let engine = load_engine(&config, &index_path)?;

            tracing::info!("Starting doc-search MCP server for {}", index_path.display());
            let server = SearchServer::new(engine, config.display);
            let service = server.serve(stdio()).await.inspect_err(|e| {
                tracing::error!("Error serving MCP server: {:?}", e);
            })?;
            service.waiting().await?;
        }
    }

    Ok(())
}

fn load_engine(config: &Config, index_path: &Path) -> anyhow::Result<Arc<SearchEngine>> {
    let index = load_artifact(index_path)?;
    tracing::debug!(
        "Loaded {} documents from {}",
        index.document_count(),
        index_path.display()
    );
    Ok(Arc::new(SearchEngine::new(index, config.scorer.clone())))
}

async fn run_query(
    config: &Config,
    index_path: &Path,
    query: &str,
    limit: usize,
    html: bool,
) -> anyhow::Result<()> {
    let engine = load_engine(config, index_path)?;
    let parsed = engine.parse(query);
    let mut results = engine.search_parsed(&parsed);
    // Pop order: the best results are at the end.
    let excess = results.len().saturating_sub(limit);
    results.drain(..excess);

    let display = DisplayOptions {
        highlight: html && config.display.highlight,
        ..config.display.clone()
    };

    if html {
        let mut list = ResultList::default();
        render(results, &parsed, &display, &config.builder.input, &mut list).await?;
        print!("{}", list.to_html());
    } else {
        let mut sink = TextSink::new(std::io::stdout().lock());
        render(results, &parsed, &display, &config.builder.input, &mut sink).await?;
    }
    Ok(())
}

async fn run_excerpt_query(
    config: &Config,
    index_path: &Path,
    query: &str,
    html: bool,
) -> anyhow::Result<()> {
    let Some(content) = &config.display.content else {
        anyhow::bail!("--excerpts needs a content endpoint (--content or [display] content)");
    };
    let index = load_artifact(index_path)?;
    let matches = content_search(&index, query, &JsonContentSource::new(content)).await?;
    let report = ContentReport::new(query, matches);

    if html {
        print!("{}", report.to_html());
    } else {
        report.write_text(&mut std::io::stdout().lock())?;
    }
    Ok(())
}

async fn render<S: ResultSink>(
    results: Vec<SearchResult>,
    parsed: &ParsedQuery,
    display: &DisplayOptions,
    pages: &Path,
    sink: &mut S,
) -> anyhow::Result<usize> {
    match &display.content {
        Some(path) => {
            let source = JsonContentSource::new(path);
            render_results(results, parsed, display, &source, sink).await
        }
        None => {
            let source = FileContentSource::new(pages);
            render_results(results, parsed, display, &source, sink).await
        }
    }
}
