pub mod ai;
pub mod budget;
pub mod classes;
pub mod health;
pub mod study_tasks;
pub mod swagger;
pub mod users;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::utils::error::AppError;

/// JSON body limit for every route
pub const JSON_LIMIT_BYTES: usize = 256 * 1024;

/// `{ success: true, data }` envelope used by every JSON endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse { success: true, data })
}

pub fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse { success: true, data })
}

/// Registers every route plus the body/query extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(health::root))
    .route("/health", web::get().to(health::health_check))
    .route("/routes-info", web::get().to(health::routes_info))
    .service(
        web::resource("/users")
            .route(web::get().to(users::list_users))
            .route(web::post().to(users::create_user)),
    )
    .service(
        web::resource("/classes")
            .route(web::get().to(classes::list_classes))
            .route(web::post().to(classes::create_class)),
    )
    .route("/classes/{id}", web::delete().to(classes::delete_class))
    .service(
        web::resource("/budget")
            .route(web::get().to(budget::list_transactions))
            .route(web::post().to(budget::create_transaction)),
    )
    .service(
        web::resource("/budget/{id}")
            .route(web::put().to(budget::update_transaction))
            .route(web::delete().to(budget::delete_transaction)),
    )
    .service(
        web::resource("/study-tasks")
            .route(web::get().to(study_tasks::list_tasks))
            .route(web::post().to(study_tasks::create_task)),
    )
    .service(
        web::resource("/study-tasks/{id}")
            .route(web::put().to(study_tasks::update_task))
            .route(web::delete().to(study_tasks::delete_task)),
    )
    .route("/ai-chat", web::post().to(ai::chat))
    .route("/generate-questions", web::post().to(ai::generate_questions));
}
