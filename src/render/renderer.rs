use super::content::ContentSource;
use super::sink::{RenderedItem, ResultSink};
use super::summary::{escape_html, highlight, make_search_summary};
use super::DisplayOptions;
use crate::error::Result;
use crate::search::{ParsedQuery, SearchResult};
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const NO_RESULTS_MESSAGE: &str = "Your search did not match any documents. Please make sure that all words are spelled correctly and that you've selected enough categories.";

const PULSE_INTERVAL: Duration = Duration::from_millis(500);

/// Status line shown once every result has been revealed.
pub fn status_message(count: usize) -> String {
    if count == 0 {
        NO_RESULTS_MESSAGE.to_string()
    } else {
        format!("Search finished, found {} page(s) matching the search query.", count)
    }
}

struct SummaryTerms<'a> {
    keywords: Vec<String>,
    highlight: Option<&'a [String]>,
}

impl SummaryTerms<'_> {
    /// Plain text to an HTML fragment, highlighted when enabled.
    fn mark(&self, text: &str) -> String {
        match self.highlight {
            Some(highlight_terms) => highlight(text, highlight_terms),
            None => escape_html(text),
        }
    }
}

async fn fetch_summary<C: ContentSource>(
    source: &C,
    terms: &SummaryTerms<'_>,
    slot: usize,
    request_url: String,
    anchor: String,
) -> (usize, Option<String>) {
    let html = match source.fetch(&request_url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::debug!("Content fetch for '{}' failed: {:#}", request_url, e);
            return (slot, None);
        }
    };
    if html.is_empty() {
        return (slot, None);
    }

    let summary = make_search_summary(&html, &terms.keywords, &anchor).map(|text| terms.mark(&text));
    (slot, summary)
}

fn attach<S: ResultSink>(sink: &mut S, (slot, summary): (usize, Option<String>)) -> Result<()> {
    match summary {
        Some(summary) => sink.attach_summary(slot, summary),
        None => Ok(()),
    }
}

/// Reveal `results` into `sink`, popping from the end so the best result comes first.
///
/// Each item is followed by a short pause during which completed summary
/// fetches are attached and the progress indicator pulses. The status line is
/// set after the last item and any outstanding fetches are drained before
/// returning the result count.
pub async fn render_results<C, S>(
    mut results: Vec<SearchResult>,
    parsed: &ParsedQuery,
    options: &DisplayOptions,
    source: &C,
    sink: &mut S,
) -> Result<usize>
where
    C: ContentSource,
    S: ResultSink,
{
    let count = results.len();
    let highlight_terms: Vec<String> = parsed.highlight_terms.as_slice().to_vec();
    let terms = SummaryTerms {
        keywords: parsed.search_terms.as_slice().to_vec(),
        highlight: options.highlight.then_some(highlight_terms.as_slice()),
    };
    let mut pending = FuturesUnordered::new();

    sink.start(&parsed.query)?;
    let mut pulse = tokio::time::interval(PULSE_INTERVAL);
    pulse.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut dots = 0;

    while let Some(result) = results.pop() {
        let (request_url, link) = options.urls(&result.doc_name);
        let description = result.description.as_deref().map(|description| terms.mark(description));
        let wants_summary = description.is_none() && options.show_summary;

        let slot = sink.append(RenderedItem {
            title: result.title,
            link: format!("{}{}", link, result.anchor),
            score: result.score,
            description,
            summary: None,
        })?;
        if wants_summary {
            pending.push(fetch_summary(source, &terms, slot, request_url, result.anchor));
        }

        if results.is_empty() {
            break;
        }
        let delay = tokio::time::sleep(options.delay());
        tokio::pin!(delay);
        loop {
            tokio::select! {
                () = &mut delay => break,
                _ = pulse.tick() => {
                    sink.pulse(dots)?;
                    dots = (dots + 1) % 4;
                }
                Some(done) = pending.next(), if !pending.is_empty() => attach(sink, done)?,
            }
        }
    }

    sink.finish(&status_message(count))?;
    while let Some(done) = pending.next().await {
        attach(sink, done)?;
    }
    tracing::debug!("Rendered {} results", count);
    Ok(count)
}
