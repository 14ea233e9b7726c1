use actix_web::{web, HttpResponse};

use crate::{
    models::{CreateClassRequest, OwnerQuery},
    services::class_service,
    state::AppState,
    utils::error::AppError,
};

/// GET /classes?email= - Lista as aulas do dono
#[utoipa::path(
    get,
    path = "/classes",
    tag = "Classes",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Classes owned by email"),
        (status = 400, description = "email missing")
    )
)]
pub async fn list_classes(
    state: web::Data<AppState>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /classes - Listing for {:?}", query.email);
    let classes = class_service::list_classes(state.store.as_ref(), query.email.as_deref()).await?;
    Ok(super::ok(classes))
}

/// POST /classes - Cria aula
#[utoipa::path(
    post,
    path = "/classes",
    tag = "Classes",
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Class created"),
        (status = 400, description = "email missing")
    )
)]
pub async fn create_class(
    state: web::Data<AppState>,
    body: web::Json<CreateClassRequest>,
) -> Result<HttpResponse, AppError> {
    let class = class_service::create_class(state.store.as_ref(), body.into_inner()).await?;
    Ok(super::created(class))
}

/// DELETE /classes/{id}?email= - Remove aula do dono
#[utoipa::path(
    delete,
    path = "/classes/{id}",
    tag = "Classes",
    params(("id" = String, Path, description = "Class id"), OwnerQuery),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 403, description = "No class with this id for this email")
    )
)]
pub async fn delete_class(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /classes/{} - by {:?}", id, query.email);
    let result = class_service::delete_class(state.store.as_ref(), &id, query.email.as_deref()).await?;
    Ok(super::ok(result))
}

#[cfg(test)]
mod tests {
    use crate::database::{MemoryStore, CLASSES};
    use crate::test_support::{app_state, ScriptedLlm};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_class_lifecycle_is_owner_scoped() {
        let store = MemoryStore::new();
        let app = test::init_service(
            App::new()
                .app_data(app_state(&store, &ScriptedLlm::replying("")))
                .configure(crate::api::configure),
        )
        .await;

        let mut ids = Vec::new();
        for (email, name) in [("ana@school.edu", "Math"), ("bo@school.edu", "Art")] {
            let req = test::TestRequest::post()
                .uri("/classes")
                .set_json(json!({ "email": email, "name": name, "day": "Tuesday" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(resp).await;
            ids.push(body["data"]["id"].as_str().unwrap().to_string());
        }

        let resp = test::call_service(&app, test::TestRequest::get().uri("/classes?email=ana@school.edu").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        let classes = body["data"].as_array().unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0]["name"], "Math");
        assert!(classes.iter().all(|c| c["email"] == "ana@school.edu"));

        // Bo cannot delete Ana's class
        let req = test::TestRequest::delete().uri(&format!("/classes/{}?email=bo@school.edu", ids[0])).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(store.count(CLASSES).await, 2);

        let req = test::TestRequest::delete().uri(&format!("/classes/{}?email=ana@school.edu", ids[0])).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["affected"], 1);
        assert_eq!(store.count(CLASSES).await, 1);
    }

    #[actix_web::test]
    async fn test_list_without_email_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(&MemoryStore::new(), &ScriptedLlm::replying("")))
                .configure(crate::api::configure),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/classes").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete_with_invalid_id_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(&MemoryStore::new(), &ScriptedLlm::replying("")))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::delete().uri("/classes/xyz?email=ana@school.edu").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_create_with_unknown_fields_is_400_and_stores_nothing() {
        let store = MemoryStore::new();
        let app = test::init_service(
            App::new()
                .app_data(app_state(&store, &ScriptedLlm::replying("")))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/classes")
            .set_json(json!({ "email": "a@x.com", "subject": "Math", "time": "10:00" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("subject"));
        assert_eq!(store.count(CLASSES).await, 0);
    }
}
