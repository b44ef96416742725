//! Destinations for rendered results.

use super::summary::escape_html as escape;
use crate::error::Result;
use std::fmt::Write as _;
use std::io::Write;

/// A result as presented to the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub title: String,
    /// Link target including the anchor fragment.
    pub link: String,
    pub score: i64,
    pub description: Option<String>,
    /// Excerpt attached once page content has been fetched.
    pub summary: Option<String>,
}

/// Receives results as they are revealed.
pub trait ResultSink {
    /// Append an item, returning a slot used to attach its summary later.
    fn append(&mut self, item: RenderedItem) -> Result<usize>;

    /// Attach a summary to a previously appended item. May arrive in any order.
    fn attach_summary(&mut self, slot: usize, summary: String) -> Result<()>;

    /// Set the final status line.
    fn finish(&mut self, status: &str) -> Result<()>;

    /// Called once before the first item with the query being rendered.
    fn start(&mut self, _query: &str) -> Result<()> {
        Ok(())
    }

    /// Advance the progress indicator to `dots` dots (0 to 3).
    fn pulse(&mut self, _dots: usize) -> Result<()> {
        Ok(())
    }
}

/// In-memory result list mirroring the search page's DOM contract.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultList {
    /// Query echoed back into the search box.
    pub query: Option<String>,
    /// Progress dots while results are still arriving.
    pub progress: Option<String>,
    pub items: Vec<RenderedItem>,
    pub status: Option<String>,
}

impl ResultSink for ResultList {
    fn append(&mut self, item: RenderedItem) -> Result<usize> {
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    fn attach_summary(&mut self, slot: usize, summary: String) -> Result<()> {
        if let Some(item) = self.items.get_mut(slot) {
            item.summary = Some(summary);
        }
        Ok(())
    }

    fn finish(&mut self, status: &str) -> Result<()> {
        self.progress = None;
        self.status = Some(status.to_string());
        Ok(())
    }

    fn start(&mut self, query: &str) -> Result<()> {
        self.query = Some(query.to_string());
        self.progress = Some(String::new());
        Ok(())
    }

    fn pulse(&mut self, dots: usize) -> Result<()> {
        self.progress = Some(".".repeat(dots));
        Ok(())
    }
}

impl ResultList {
    /// Render the page fragment expected by the search template.
    ///
    /// Descriptions and summaries are HTML fragments; everything else is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        if let Some(query) = &self.query {
            let _ = writeln!(html, "<input type=\"text\" name=\"q\" value=\"{}\">", escape(query));
        }
        let _ = writeln!(
            html,
            "<div id=\"search-progress\">{}</div>",
            self.progress.as_deref().unwrap_or("")
        );
        let _ = writeln!(
            html,
            "<p id=\"search-results-summary\">{}</p>",
            escape(self.status.as_deref().unwrap_or(""))
        );
        html.push_str("<ul id=\"search-results\">\n");
        for item in &self.items {
            let _ = write!(
                html,
                "<li><a href=\"{}\" data-score=\"{}\">{}</a>",
                escape(&item.link),
                item.score,
                escape(&item.title)
            );
            if let Some(description) = &item.description {
                let _ = write!(html, "<span> ({})</span>", description);
            }
            if let Some(summary) = &item.summary {
                let _ = write!(html, "<p class=\"context\">{}</p>", summary);
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
        html
    }
}

/// Plain-text output, written as items arrive.
pub struct TextSink<W: Write> {
    out: W,
    count: usize,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, count: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for TextSink<W> {
    fn append(&mut self, item: RenderedItem) -> Result<usize> {
        self.count += 1;
        write!(self.out, "{}. {} ({})", self.count, item.title, item.link)?;
        if let Some(description) = &item.description {
            write!(self.out, " - {}", description)?;
        }
        writeln!(self.out, " [score: {}]", item.score)?;
        Ok(self.count)
    }

    fn attach_summary(&mut self, slot: usize, summary: String) -> Result<()> {
        writeln!(self.out, "   [{}] {}", slot, summary)?;
        Ok(())
    }

    fn finish(&mut self, status: &str) -> Result<()> {
        writeln!(self.out, "\n{}", status)?;
        self.out.flush()?;
        Ok(())
    }
}
