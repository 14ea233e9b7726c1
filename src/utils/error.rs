use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

/// Longest slice of raw model output echoed back when parsing fails
pub const RAW_EXCERPT_CHARS: usize = 200;

#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    Forbidden(String),
    NotFound(String),
    DuplicateKey(String),
    DatabaseError(String),
    LlmError(String),
    MalformedLlmOutput { reason: String, raw_excerpt: String },
    Config(String),
}

impl AppError {
    /// Builds a `MalformedLlmOutput` keeping only a prefix of the raw text.
    pub fn malformed_output(reason: impl Into<String>, raw: &str) -> Self {
        AppError::MalformedLlmOutput {
            reason: reason.into(),
            raw_excerpt: raw.chars().take(RAW_EXCERPT_CHARS).collect(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Not authorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::DuplicateKey(msg) => write!(f, "Duplicate key: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::LlmError(msg) => write!(f, "LLM error: {}", msg),
            AppError::MalformedLlmOutput { reason, .. } => {
                write!(f, "Failed to parse LLM output: {}", reason)
            }
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::LlmError(_)
            | AppError::MalformedLlmOutput { .. }
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = serde_json::json!({
            "success": false,
            "error": self.to_string()
        });

        if let AppError::MalformedLlmOutput { raw_excerpt, .. } = self {
            body["raw"] = serde_json::Value::String(raw_excerpt.clone());
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_malformed_output_truncates_raw_text() {
        let raw = "é".repeat(500);
        match AppError::malformed_output("bad json", &raw) {
            AppError::MalformedLlmOutput { raw_excerpt, .. } => {
                assert_eq!(raw_excerpt.chars().count(), RAW_EXCERPT_CHARS);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_short_raw_text_kept_whole() {
        match AppError::malformed_output("bad json", "oops") {
            AppError::MalformedLlmOutput { raw_excerpt, .. } => assert_eq!(raw_excerpt, "oops"),
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
