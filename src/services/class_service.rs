use crate::{
    database::{DocumentStore, CLASSES},
    models::{Class, ClassResponse, CreateClassRequest, MutationResult},
    services::owned,
    utils::{parse_object_id, require_email, AppError},
};

pub async fn list_classes(
    store: &dyn DocumentStore,
    email: Option<&str>,
) -> Result<Vec<ClassResponse>, AppError> {
    let email = require_email(email)?;
    let classes: Vec<Class> = owned::list(store, CLASSES, &email).await?;
    Ok(classes.into_iter().map(ClassResponse::from).collect())
}

/// Names of the owner's classes, skipping unnamed entries
pub async fn class_names(store: &dyn DocumentStore, email: &str) -> Result<Vec<String>, AppError> {
    let classes: Vec<Class> = owned::list(store, CLASSES, email).await?;
    Ok(classes.into_iter().filter_map(|c| c.name).collect())
}

pub async fn create_class(
    store: &dyn DocumentStore,
    request: CreateClassRequest,
) -> Result<ClassResponse, AppError> {
    let email = require_email(request.email.as_deref())?;

    let mut class = Class {
        id: None,
        email,
        name: request.name,
        instructor: request.instructor,
        day: request.day,
        start_time: request.start_time,
        end_time: request.end_time,
        room: request.room,
        color: request.color,
        created_at: chrono::Utc::now().timestamp(),
    };

    let id = owned::insert(store, CLASSES, &class).await?;
    class.id = Some(id);

    log::info!("📚 Class {} created for {}", id, class.email);
    Ok(ClassResponse::from(class))
}

pub async fn delete_class(
    store: &dyn DocumentStore,
    id: &str,
    email: Option<&str>,
) -> Result<MutationResult, AppError> {
    let email = require_email(email)?;
    let object_id = parse_object_id(id, "class")?;

    let deleted = owned::delete(store, CLASSES, object_id, &email).await?;
    if deleted == 0 {
        log::warn!("⚠️ Class {} not deleted: no match for {}", id, email);
        return Err(AppError::Forbidden("Class not found or not owned by this user".to_string()));
    }

    log::info!("🗑️  Class {} deleted by {}", id, email);
    Ok(MutationResult { id: object_id.to_hex(), affected: deleted })
}
