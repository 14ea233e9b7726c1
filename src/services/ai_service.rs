// ==================== AI FEATURES ====================
// Chatbot do app e gerador de questões, ambos sobre o LlmClient compartilhado

use crate::{
    database::{DocumentStore, QUESTIONS},
    models::{ChatRequest, GenerateQuestionsRequest, GeneratedQuestions, QuestionSet},
    services::{
        class_service,
        llm_service::{CompletionRequest, LlmClient},
        owned,
    },
    utils::{require_field, AppError},
};

const CHAT_TEMPERATURE: f32 = 0.7;
const CHAT_MAX_TOKENS: u32 = 500;
const QUESTIONS_TEMPERATURE: f32 = 0.7;
const QUESTIONS_MAX_TOKENS: u32 = 2000;
const QUESTIONS_PER_SECTION: usize = 5;
const MCQ_OPTIONS: usize = 4;

const CHAT_SYSTEM_PROMPT: &str = "You are the friendly assistant of a student toolkit web app. \
The app offers: a class schedule tracker (add, view and remove weekly classes), \
a budget tracker (record income and expenses and review spending), \
a study planner (create study tasks with subject, priority and due date and mark them completed), \
and an exam question generator (multiple-choice, true/false and short-answer practice questions for any topic). \
Answer questions about these features and give short, practical study advice.";

pub fn chat_system_prompt(class_names: &[String]) -> String {
    if class_names.is_empty() {
        return CHAT_SYSTEM_PROMPT.to_string();
    }
    format!(
        "{} The student is currently enrolled in these classes: {}.",
        CHAT_SYSTEM_PROMPT,
        class_names.join(", ")
    )
}

pub fn questions_system_prompt() -> String {
    format!(
        "You are an exam question generator. Respond with a single JSON object and nothing else, \
using exactly this shape: \
{{\"mcq\": [{{\"question\": string, \"options\": [string, string, string, string], \"answer\": string}}], \
\"trueFalse\": [{{\"question\": string, \"answer\": boolean}}], \
\"short\": [{{\"question\": string, \"answer\": string}}]}}. \
Produce exactly {n} items in each of the three arrays. \
Every mcq item has exactly {o} options and its answer is the text of the correct option.",
        n = QUESTIONS_PER_SECTION,
        o = MCQ_OPTIONS
    )
}

/// Answers a free-text message. Blank messages are rejected before any
/// store or LLM call.
pub async fn chat(
    store: &dyn DocumentStore,
    llm: &dyn LlmClient,
    request: ChatRequest,
) -> Result<String, AppError> {
    let message = require_field(request.message.as_deref(), "message")?;

    let class_names = match request.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => class_service::class_names(store, email).await?,
        None => Vec::new(),
    };

    let reply = llm
        .complete(CompletionRequest {
            system: chat_system_prompt(&class_names),
            user: message,
            temperature: CHAT_TEMPERATURE,
            max_tokens: CHAT_MAX_TOKENS,
            json_output: false,
        })
        .await
        .map_err(|e| {
            log::error!("❌ AI chat failed: {}", e);
            e
        })?;

    Ok(reply)
}

// Strips a surrounding ```json ... ``` fence if the model added one.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parses untrusted model output into the quiz structure.
/// Sections whose size differs from the requested count, with their actual size
fn off_count_sections(questions: &GeneratedQuestions) -> Vec<(&'static str, usize)> {
    [
        ("mcq", questions.mcq.len()),
        ("trueFalse", questions.true_false.len()),
        ("short", questions.short.len()),
    ]
    .into_iter()
    .filter(|(_, len)| *len != QUESTIONS_PER_SECTION)
    .collect()
}

pub fn parse_questions(raw: &str) -> Result<GeneratedQuestions, AppError> {
    let questions: GeneratedQuestions = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| AppError::malformed_output(e.to_string(), raw))?;

    if let Some(bad) = questions.mcq.iter().find(|q| q.options.len() != MCQ_OPTIONS) {
        return Err(AppError::malformed_output(
            format!("mcq '{}' has {} options, expected {}", bad.question, bad.options.len(), MCQ_OPTIONS),
            raw,
        ));
    }

    // Counts are only asked for in the prompt; a short quiz is still returned
    for (section, len) in off_count_sections(&questions) {
        log::warn!("⚠️ Model returned {} {} questions, asked for {}", len, section, QUESTIONS_PER_SECTION);
    }

    Ok(questions)
}

/// Generates a quiz for `topic` and records it in the question history.
/// Nothing is written when the model output cannot be parsed.
pub async fn generate_questions(
    store: &dyn DocumentStore,
    llm: &dyn LlmClient,
    request: GenerateQuestionsRequest,
) -> Result<GeneratedQuestions, AppError> {
    let topic = require_field(request.topic.as_deref(), "topic")?;

    log::info!("🧠 Generating questions for topic '{}'", topic);

    let raw = llm
        .complete(CompletionRequest {
            system: questions_system_prompt(),
            user: format!("Topic: {}", topic),
            temperature: QUESTIONS_TEMPERATURE,
            max_tokens: QUESTIONS_MAX_TOKENS,
            json_output: true,
        })
        .await?;

    let questions = parse_questions(&raw).map_err(|e| {
        log::warn!("⚠️ Unparseable questions for '{}': {}", topic, e);
        e
    })?;

    let record = QuestionSet {
        id: None,
        topic,
        questions,
        created_at: chrono::Utc::now().timestamp(),
    };
    let id = owned::insert(store, QUESTIONS, &record).await?;

    log::info!(
        "✅ Question set {} saved: {} mcq, {} true/false, {} short",
        id,
        record.questions.mcq.len(),
        record.questions.true_false.len(),
        record.questions.short.len()
    );

    Ok(record.questions)
}
