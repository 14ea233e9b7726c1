use std::sync::Arc;

use crate::database::DocumentStore;
use crate::services::LlmClient;

/// Process-wide clients, created once in `main` and shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub llm: Arc<dyn LlmClient>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, llm: Arc<dyn LlmClient>) -> Self {
        Self { store, llm }
    }
}
