use actix_web::{web, HttpResponse};

use crate::{
    models::{ChatRequest, ChatResponse, GenerateQuestionsRequest},
    services::ai_service,
    state::AppState,
    utils::error::AppError,
};

/// POST /ai-chat - Assistente do app
#[utoipa::path(
    post,
    path = "/ai-chat",
    tag = "AI",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Model reply", body = ChatResponse),
        (status = 400, description = "message missing"),
        (status = 500, description = "LLM failure")
    )
)]
pub async fn chat(
    state: web::Data<AppState>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("💬 POST /ai-chat");
    let reply = ai_service::chat(state.store.as_ref(), state.llm.as_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ChatResponse { success: true, reply }))
}

/// POST /generate-questions - Gera quiz (mcq, trueFalse, short) para um tópico
#[utoipa::path(
    post,
    path = "/generate-questions",
    tag = "AI",
    request_body = GenerateQuestionsRequest,
    responses(
        (status = 200, description = "Generated questions"),
        (status = 400, description = "topic missing"),
        (status = 500, description = "LLM failure or unparseable output")
    )
)]
pub async fn generate_questions(
    state: web::Data<AppState>,
    body: web::Json<GenerateQuestionsRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🧠 POST /generate-questions - {:?}", body.topic);
    let questions =
        ai_service::generate_questions(state.store.as_ref(), state.llm.as_ref(), body.into_inner()).await?;
    Ok(super::ok(questions))
}
