use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::StructuredExtractor;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one in-memory editing session. Never held across an await on
    /// the extraction service or a document parser.
    pub session: Arc<Mutex<Session>>,
    /// Structured-extraction backend. Default: `LlmClient`.
    pub llm: Arc<dyn StructuredExtractor>,
    pub extractor: TextExtractor,
    pub config: Config,
}

impl AppState {
    pub fn new(llm: Arc<dyn StructuredExtractor>, extractor: TextExtractor, config: Config) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            llm,
            extractor,
            config,
        }
    }
}
