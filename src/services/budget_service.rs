use crate::{
    database::{to_document, DocumentStore, BUDGET},
    models::{MutationResult, Transaction, TransactionChanges, TransactionRequest, TransactionResponse},
    services::owned,
    utils::{parse_object_id, require_email, AppError},
};

fn validate_amount(changes: &TransactionChanges) -> Result<(), AppError> {
    match changes.amount {
        Some(amount) if !amount.is_finite() || amount < 0.0 => Err(AppError::InvalidRequest(
            "amount must be a non-negative number".to_string(),
        )),
        _ => Ok(()),
    }
}

pub async fn list_transactions(
    store: &dyn DocumentStore,
    email: Option<&str>,
) -> Result<Vec<TransactionResponse>, AppError> {
    let email = require_email(email)?;
    let transactions: Vec<Transaction> = owned::list(store, BUDGET, &email).await?;
    Ok(transactions.into_iter().map(TransactionResponse::from).collect())
}

pub async fn create_transaction(
    store: &dyn DocumentStore,
    request: TransactionRequest,
) -> Result<TransactionResponse, AppError> {
    let (email, fields) = request.into_changes();
    let email = require_email(email.as_deref())?;
    validate_amount(&fields)?;

    let mut transaction = Transaction {
        id: None,
        email,
        kind: fields.kind,
        amount: fields.amount,
        category: fields.category,
        description: fields.description,
        date: fields.date,
        created_at: chrono::Utc::now().timestamp(),
    };

    let id = owned::insert(store, BUDGET, &transaction).await?;
    transaction.id = Some(id);

    log::info!("💰 Transaction {} created for {}", id, transaction.email);
    Ok(TransactionResponse::from(transaction))
}

pub async fn update_transaction(
    store: &dyn DocumentStore,
    id: &str,
    request: TransactionRequest,
) -> Result<MutationResult, AppError> {
    let (email, changes) = request.into_changes();
    let email = require_email(email.as_deref())?;
    let object_id = parse_object_id(id, "transaction")?;
    validate_amount(&changes)?;

    let changes = to_document(&changes)?;
    let matched = owned::update(store, BUDGET, object_id, &email, changes).await?;
    if matched == 0 {
        return Err(AppError::NotFound("Transaction not found or not authorized".to_string()));
    }

    log::info!("✏️  Transaction {} updated by {}", id, email);
    Ok(MutationResult { id: object_id.to_hex(), affected: matched })
}

pub async fn delete_transaction(
    store: &dyn DocumentStore,
    id: &str,
    email: Option<&str>,
) -> Result<MutationResult, AppError> {
    let email = require_email(email)?;
    let object_id = parse_object_id(id, "transaction")?;

    let deleted = owned::delete(store, BUDGET, object_id, &email).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Transaction not found or not authorized".to_string()));
    }

    log::info!("🗑️  Transaction {} deleted by {}", id, email);
    Ok(MutationResult { id: object_id.to_hex(), affected: deleted })
}
