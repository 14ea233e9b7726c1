use actix_web::{web, HttpResponse};

use crate::{
    models::{OwnerQuery, StudyTaskRequest},
    services::study_task_service,
    state::AppState,
    utils::error::AppError,
};

/// GET /study-tasks?email= - Lista tarefas do dono
#[utoipa::path(
    get,
    path = "/study-tasks",
    tag = "Study Tasks",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Study tasks owned by email"),
        (status = 400, description = "email missing")
    )
)]
pub async fn list_tasks(
    state: web::Data<AppState>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /study-tasks - Listing for {:?}", query.email);
    let tasks = study_task_service::list_tasks(state.store.as_ref(), query.email.as_deref()).await?;
    Ok(super::ok(tasks))
}

/// POST /study-tasks - Cria tarefa (sempre com completed = false)
#[utoipa::path(
    post,
    path = "/study-tasks",
    tag = "Study Tasks",
    request_body = StudyTaskRequest,
    responses(
        (status = 201, description = "Study task created"),
        (status = 400, description = "email missing")
    )
)]
pub async fn create_task(
    state: web::Data<AppState>,
    body: web::Json<StudyTaskRequest>,
) -> Result<HttpResponse, AppError> {
    let task = study_task_service::create_task(state.store.as_ref(), body.into_inner()).await?;
    Ok(super::created(task))
}

#[utoipa::path(
    put,
    path = "/study-tasks/{id}",
    tag = "Study Tasks",
    params(("id" = String, Path, description = "Task id")),
    request_body = StudyTaskRequest,
    responses(
        (status = 200, description = "Study task updated"),
        (status = 404, description = "No task with this id for this email")
    )
)]
pub async fn update_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StudyTaskRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🔧 PUT /study-tasks/{} - by {:?}", id, body.email);
    let result = study_task_service::update_task(state.store.as_ref(), &id, body.into_inner()).await?;
    Ok(super::ok(result))
}

#[utoipa::path(
    delete,
    path = "/study-tasks/{id}",
    tag = "Study Tasks",
    params(("id" = String, Path, description = "Task id"), OwnerQuery),
    responses(
        (status = 200, description = "Study task deleted"),
        (status = 404, description = "No task with this id for this email")
    )
)]
pub async fn delete_task(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /study-tasks/{} - by {:?}", id, query.email);
    let result = study_task_service::delete_task(state.store.as_ref(), &id, query.email.as_deref()).await?;
    Ok(super::ok(result))
}

#[cfg(test)]
mod tests {
    use crate::database::MemoryStore;
    use crate::test_support::{app_state, ScriptedLlm};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_new_task_ignores_client_completed_flag() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(&MemoryStore::new(), &ScriptedLlm::replying("")))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/study-tasks")
            .set_json(json!({ "email": "ana@school.edu", "title": "Essay draft", "completed": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["completed"], false);
        assert!(body["data"]["createdAt"].as_i64().unwrap() > 0);
    }

    #[actix_web::test]
    async fn test_task_not_owned_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(&MemoryStore::new(), &ScriptedLlm::replying("")))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/study-tasks")
            .set_json(json!({ "email": "ana@school.edu", "title": "Lab report" }))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/study-tasks/{}", id))
            .set_json(json!({ "email": "bo@school.edu", "completed": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);

        let req = test::TestRequest::put()
            .uri(&format!("/study-tasks/{}", id))
            .set_json(json!({ "email": "ana@school.edu", "completed": true }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/study-tasks?email=ana@school.edu").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"][0]["completed"], true);

        let req = test::TestRequest::delete().uri(&format!("/study-tasks/{}?email=bo@school.edu", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_with_unknown_field_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(&MemoryStore::new(), &ScriptedLlm::replying("")))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/study-tasks")
            .set_json(json!({ "email": "ana@school.edu", "title": "Essay" }))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/study-tasks/{}", id))
            .set_json(json!({ "email": "ana@school.edu", "done": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("done"));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/study-tasks?email=ana@school.edu").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"][0]["completed"], false);
    }
}
