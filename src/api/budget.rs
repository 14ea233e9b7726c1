use actix_web::{web, HttpResponse};

use crate::{
    models::{OwnerQuery, TransactionRequest},
    services::budget_service,
    state::AppState,
    utils::error::AppError,
};

/// GET /budget?email= - Lista lançamentos do dono
#[utoipa::path(
    get,
    path = "/budget",
    tag = "Budget",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Transactions owned by email"),
        (status = 400, description = "email missing")
    )
)]
pub async fn list_transactions(
    state: web::Data<AppState>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /budget - Listing for {:?}", query.email);
    let transactions = budget_service::list_transactions(state.store.as_ref(), query.email.as_deref()).await?;
    Ok(super::ok(transactions))
}

#[utoipa::path(
    post,
    path = "/budget",
    tag = "Budget",
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Transaction created"),
        (status = 400, description = "email missing or invalid amount")
    )
)]
pub async fn create_transaction(
    state: web::Data<AppState>,
    body: web::Json<TransactionRequest>,
) -> Result<HttpResponse, AppError> {
    let transaction = budget_service::create_transaction(state.store.as_ref(), body.into_inner()).await?;
    Ok(super::created(transaction))
}

/// PUT /budget/{id} - Atualiza apenas os campos enviados
#[utoipa::path(
    put,
    path = "/budget/{id}",
    tag = "Budget",
    params(("id" = String, Path, description = "Transaction id")),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Transaction updated"),
        (status = 404, description = "No transaction with this id for this email")
    )
)]
pub async fn update_transaction(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<TransactionRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🔧 PUT /budget/{} - by {:?}", id, body.email);
    let result = budget_service::update_transaction(state.store.as_ref(), &id, body.into_inner()).await?;
    Ok(super::ok(result))
}

#[utoipa::path(
    delete,
    path = "/budget/{id}",
    tag = "Budget",
    params(("id" = String, Path, description = "Transaction id"), OwnerQuery),
    responses(
        (status = 200, description = "Transaction deleted"),
        (status = 404, description = "No transaction with this id for this email")
    )
)]
pub async fn delete_transaction(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /budget/{} - by {:?}", id, query.email);
    let result = budget_service::delete_transaction(state.store.as_ref(), &id, query.email.as_deref()).await?;
    Ok(super::ok(result))
}
