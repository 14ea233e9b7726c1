use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub const LIVENESS_TEXT: &str = "School service is running ✅";

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteInfo {
    pub method: String,
    pub path: String,
    pub description: String,
}

const ROUTES: &[(&str, &str, &str)] = &[
    ("GET", "/", "Liveness text"),
    ("GET", "/health", "Service and document store health"),
    ("GET", "/routes-info", "This list"),
    ("GET", "/users", "List all users"),
    ("POST", "/users", "Create a user, or return the existing one for body.email"),
    ("GET", "/classes", "List classes owned by query.email"),
    ("POST", "/classes", "Create a class owned by body.email"),
    ("DELETE", "/classes/{id}", "Delete a class owned by query.email"),
    ("GET", "/budget", "List transactions owned by query.email"),
    ("POST", "/budget", "Create a transaction owned by body.email"),
    ("PUT", "/budget/{id}", "Update fields of a transaction owned by body.email"),
    ("DELETE", "/budget/{id}", "Delete a transaction owned by query.email"),
    ("GET", "/study-tasks", "List study tasks owned by query.email"),
    ("POST", "/study-tasks", "Create a study task owned by body.email"),
    ("PUT", "/study-tasks/{id}", "Update fields of a study task owned by body.email"),
    ("DELETE", "/study-tasks/{id}", "Delete a study task owned by query.email"),
    ("POST", "/ai-chat", "Ask the assistant; body.message, optional body.email"),
    ("POST", "/generate-questions", "Generate mcq/trueFalse/short questions for body.topic"),
];

pub async fn root() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(LIVENESS_TEXT)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Document store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, mut response) = match state.store.ping().await {
        Ok(()) => ("healthy", HttpResponse::Ok()),
        Err(e) => {
            log::error!("❌ Health check failed: {}", e);
            ("unhealthy", HttpResponse::ServiceUnavailable())
        }
    };

    response.json(HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[utoipa::path(
    get,
    path = "/routes-info",
    tag = "Health",
    responses((status = 200, description = "Available routes"))
)]
pub async fn routes_info() -> impl Responder {
    let routes: Vec<RouteInfo> = ROUTES
        .iter()
        .map(|(method, path, description)| RouteInfo {
            method: method.to_string(),
            path: path.to_string(),
            description: description.to_string(),
        })
        .collect();

    super::ok(routes)
}
