//! MCP server exposing the search engine over stdio.

use crate::render::DisplayOptions;
use crate::search::SearchEngine;
use crate::tools::search::{SearchRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server answering keyword searches against one loaded index.
#[derive(Clone)]
pub struct SearchServer {
    /// Immutable engine shared by concurrent tool calls
    engine: Arc<SearchEngine>,

    /// Link construction for result output
    display: Arc<DisplayOptions>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for SearchServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchServer")
            .field("engine", &self.engine)
            .field("display", &self.display)
            .finish()
    }
}

#[tool_router]
impl SearchServer {
    pub fn new(engine: Arc<SearchEngine>, display: DisplayOptions) -> Self {
        Self {
            engine,
            display: Arc::new(display),
            tool_router: Self::tool_router(),
        }
    }

    pub fn engine(&self) -> &Arc<SearchEngine> {
        &self.engine
    }

    #[tool(
        description = "Search the documentation site by keyword. Matches page and section titles, index entries, API objects and page text; every word must match. Prefix a word with '-' to exclude pages containing it. Returns results ranked by relevance."
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        tracing::debug!("search tool called with '{}'", request.query);
        handle_search(&self.engine, &self.display, request)
    }
}

#[tool_handler]
impl ServerHandler for SearchServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.protocol_version = ProtocolVersion::V_2024_11_05;
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = Implementation::from_build_env();
        info.instructions = Some(format!(
            "doc-search: keyword search over a documentation site with {} pages. Use the search tool with a few words; results are ranked best first.",
            self.engine.index().document_count()
        ));
        info
    }
}
