use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Tarefa do planner de estudos (collection "study_tasks")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTask {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub completed: bool,
    pub created_at: i64,
}

/// Body of POST and PUT /study-tasks. Unknown keys are rejected.
///
/// `completed` is accepted on create but always stored as `false`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StudyTaskRequest {
    pub email: Option<String>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
}

impl StudyTaskRequest {
    /// Splits the owner from the fields a PUT may overwrite
    pub fn into_changes(self) -> (Option<String>, StudyTaskChanges) {
        let changes = StudyTaskChanges {
            title: self.title,
            subject: self.subject,
            due_date: self.due_date,
            priority: self.priority,
            completed: self.completed,
        };
        (self.email, changes)
    }
}

/// `$set` payload of a study-task update
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTaskChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudyTaskResponse {
    pub id: String,
    pub email: String,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub completed: bool,
    pub created_at: i64,
}

impl From<StudyTask> for StudyTaskResponse {
    fn from(task: StudyTask) -> Self {
        StudyTaskResponse {
            id: task.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: task.email,
            title: task.title,
            subject: task.subject,
            due_date: task.due_date,
            priority: task.priority,
            completed: task.completed,
            created_at: task.created_at,
        }
    }
}
