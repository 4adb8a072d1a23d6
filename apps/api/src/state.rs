use std::sync::Arc;

use crate::llm_client::ChatProvider;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document store. `PgStore` when DATABASE_URL is set, otherwise `MemoryStore`.
    pub store: Arc<dyn Store>,
    /// Chat-completion backend. `LlmClient` in production.
    pub llm: Arc<dyn ChatProvider>,
}
