use actix_web::{web, HttpResponse};

use crate::{
    models::CreateUserRequest,
    services::user_service::{self, UserUpsert},
    state::AppState,
    utils::error::AppError,
};

/// GET /users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses((status = 200, description = "All users"))
)]
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users");
    let users = user_service::list_users(state.store.as_ref()).await?;
    Ok(super::ok(users))
}

/// POST /users - Cria usuário ou devolve o existente para o mesmo email
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 200, description = "Existing user returned unchanged"),
        (status = 400, description = "email missing")
    )
)]
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users - {:?}", body.email);
    match user_service::create_or_get_user(state.store.as_ref(), body.into_inner()).await? {
        UserUpsert::Created(user) => Ok(super::created(user)),
        UserUpsert::Existing(user) => Ok(super::ok(user)),
    }
}
