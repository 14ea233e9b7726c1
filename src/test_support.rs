use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;

use crate::database::MemoryStore;
use crate::services::{CompletionRequest, LlmClient};
use crate::state::AppState;
use crate::utils::error::AppError;

/// LlmClient that returns a canned reply and records every request.
#[derive(Clone)]
pub struct ScriptedLlm {
    reply: Result<String, String>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedLlm {
    pub fn replying(text: &str) -> Self {
        Self { reply: Ok(text.to_string()), requests: Arc::default() }
    }

    pub fn failing(message: &str) -> Self {
        Self { reply: Err(message.to_string()), requests: Arc::default() }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().map_err(AppError::LlmError)
    }
}

pub fn app_state(store: &MemoryStore, llm: &ScriptedLlm) -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::new(store.clone()), Arc::new(llm.clone())))
}

/// A well-formed model reply with five items per section
pub fn sample_questions_json() -> String {
    let mcq: Vec<_> = (1..=5)
        .map(|i| {
            serde_json::json!({
                "question": format!("What is {} + {}?", i, i),
                "options": [format!("{}", i * 2), "0", "1", "100"],
                "answer": format!("{}", i * 2)
            })
        })
        .collect();
    let true_false: Vec<_> = (1..=5)
        .map(|i| serde_json::json!({ "question": format!("{} is even", i), "answer": i % 2 == 0 }))
        .collect();
    let short: Vec<_> = (1..=5)
        .map(|i| serde_json::json!({ "question": format!("Solve x - {} = 0", i), "answer": format!("x = {}", i) }))
        .collect();

    serde_json::json!({ "mcq": mcq, "trueFalse": true_false, "short": short }).to_string()
}
