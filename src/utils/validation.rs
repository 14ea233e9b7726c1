use crate::utils::error::AppError;
use mongodb::bson::oid::ObjectId;

/// Returns the trimmed value of a required text field, or a 400 naming it.
pub fn require_field(value: Option<&str>, field: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::InvalidRequest(format!("{} is required", field))),
    }
}

/// Owner email used to scope every class, budget and study-task operation.
pub fn require_email(email: Option<&str>) -> Result<String, AppError> {
    require_field(email, "email")
}

/// Parses a path id into an ObjectId; `label` names the resource in the error.
pub fn parse_object_id(id: &str, label: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::InvalidRequest(format!("Invalid {} ID", label)))
}
