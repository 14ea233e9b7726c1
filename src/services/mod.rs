pub mod ai_service;
pub mod budget_service;
pub mod class_service;
pub mod llm_service;
pub mod owned;
pub mod study_task_service;
pub mod user_service;

pub use llm_service::{CompletionRequest, LlmClient, OpenAiClient};
