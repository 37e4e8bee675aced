use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Key-value log of assistant exchanges.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AiMemory {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub context: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One prior turn of the admin chat, in the vendor's role/parts shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: String,
    pub parts: Vec<ChatPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatPart {
    pub text: String,
}

impl ChatTurn {
    pub fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![ChatPart { text: text.into() }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Counts the assistant is grounded on.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudioStats {
    pub students: i64,
    pub approved_students: i64,
    pub scheduled_classes: i64,
    pub pending_payments: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PosterRequest {
    pub poster_type: Option<String>,
    pub style: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PosterResponse {
    pub success: bool,
    pub image_data: String,
    pub mime_type: String,
    pub prompt: String,
}
