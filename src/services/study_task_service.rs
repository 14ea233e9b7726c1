use crate::{
    database::{to_document, DocumentStore, STUDY_TASKS},
    models::{MutationResult, StudyTask, StudyTaskRequest, StudyTaskResponse},
    services::owned,
    utils::{parse_object_id, require_email, AppError},
};

pub async fn list_tasks(
    store: &dyn DocumentStore,
    email: Option<&str>,
) -> Result<Vec<StudyTaskResponse>, AppError> {
    let email = require_email(email)?;
    let tasks: Vec<StudyTask> = owned::list(store, STUDY_TASKS, &email).await?;
    Ok(tasks.into_iter().map(StudyTaskResponse::from).collect())
}

pub async fn create_task(
    store: &dyn DocumentStore,
    request: StudyTaskRequest,
) -> Result<StudyTaskResponse, AppError> {
    let email = require_email(request.email.as_deref())?;

    if request.completed == Some(true) {
        log::debug!("New study task sent completed=true, storing false");
    }

    let mut task = StudyTask {
        id: None,
        email,
        title: request.title,
        subject: request.subject,
        due_date: request.due_date,
        priority: request.priority,
        completed: false,
        created_at: chrono::Utc::now().timestamp(),
    };

    let id = owned::insert(store, STUDY_TASKS, &task).await?;
    task.id = Some(id);

    log::info!("📝 Study task {} created for {}", id, task.email);
    Ok(StudyTaskResponse::from(task))
}

pub async fn update_task(
    store: &dyn DocumentStore,
    id: &str,
    request: StudyTaskRequest,
) -> Result<MutationResult, AppError> {
    let (email, changes) = request.into_changes();
    let email = require_email(email.as_deref())?;
    let object_id = parse_object_id(id, "task")?;

    let changes = to_document(&changes)?;
    let matched = owned::update(store, STUDY_TASKS, object_id, &email, changes).await?;
    if matched == 0 {
        return Err(AppError::NotFound("Task not found or not authorized".to_string()));
    }

    log::info!("✏️  Study task {} updated by {}", id, email);
    Ok(MutationResult { id: object_id.to_hex(), affected: matched })
}

pub async fn delete_task(
    store: &dyn DocumentStore,
    id: &str,
    email: Option<&str>,
) -> Result<MutationResult, AppError> {
    let email = require_email(email)?;
    let object_id = parse_object_id(id, "task")?;

    let deleted = owned::delete(store, STUDY_TASKS, object_id, &email).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Task not found or not authorized".to_string()));
    }

    log::info!("🗑️  Study task {} deleted by {}", id, email);
    Ok(MutationResult { id: object_id.to_hex(), affected: deleted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn new_task(email: &str, completed: Option<bool>) -> StudyTaskRequest {
        StudyTaskRequest {
            email: Some(email.to_string()),
            title: Some("Read chapter 3".to_string()),
            subject: Some("Biology".to_string()),
            due_date: None,
            priority: Some("high".to_string()),
            completed,
        }
    }

    #[tokio::test]
    async fn test_created_task_is_never_completed() {
        let store = MemoryStore::new();
        let task = create_task(&store, new_task("ana@school.edu", Some(true))).await.unwrap();
        assert!(!task.completed);

        let listed = list_tasks(&store, Some("ana@school.edu")).await.unwrap();
        assert!(!listed[0].completed);
    }

    #[tokio::test]
    async fn test_owner_can_complete_task() {
        let store = MemoryStore::new();
        let task = create_task(&store, new_task("ana@school.edu", None)).await.unwrap();

        let update = StudyTaskRequest {
            email: Some("ana@school.edu".to_string()),
            completed: Some(true),
            ..Default::default()
        };
        let result = update_task(&store, &task.id, update).await.unwrap();
        assert_eq!(result.affected, 1);

        let listed = list_tasks(&store, Some("ana@school.edu")).await.unwrap();
        assert!(listed[0].completed);
        assert_eq!(listed[0].title.as_deref(), Some("Read chapter 3"));
    }

    #[tokio::test]
    async fn test_non_owner_update_and_delete_are_not_found() {
        let store = MemoryStore::new();
        let task = create_task(&store, new_task("ana@school.edu", None)).await.unwrap();

        let update = StudyTaskRequest {
            email: Some("bo@school.edu".to_string()),
            completed: Some(true),
            ..Default::default()
        };
        assert!(matches!(update_task(&store, &task.id, update).await, Err(AppError::NotFound(_))));
        assert!(matches!(delete_task(&store, &task.id, Some("bo@school.edu")).await, Err(AppError::NotFound(_))));

        let listed = list_tasks(&store, Some("ana@school.edu")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].completed);
    }

    #[tokio::test]
    async fn test_bad_id_is_rejected() {
        let store = MemoryStore::new();
        let result = delete_task(&store, "12345", Some("ana@school.edu")).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }
}
