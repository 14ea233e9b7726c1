use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MultipleChoice {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TrueFalse {
    pub question: String,
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub answer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ShortAnswer {
    pub question: String,
    pub answer: String,
}

/// Quiz produzido pelo modelo: três listas de formato fixo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GeneratedQuestions {
    pub mcq: Vec<MultipleChoice>,
    #[serde(rename = "trueFalse")]
    pub true_false: Vec<TrueFalse>,
    pub short: Vec<ShortAnswer>,
}

/// Histórico append-only (collection "questions")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub topic: String,
    pub questions: GeneratedQuestions,
    pub created_at: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GenerateQuestionsRequest {
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    pub message: Option<String>,
    /// When present, the owner's class names are added to the prompt
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChatResponse {
    pub success: bool,
    pub reply: String,
}

// Models sometimes answer true/false items with "True"/"false" strings.
fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!("Expected true/false, got '{}'", other))),
        },
    }
}
