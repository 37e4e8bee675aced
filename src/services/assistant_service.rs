use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{AiMemory, ChatTurn, ClassStatus, PaymentStatus, StudioStats, UserRole, UserStatus};
use crate::services::GeminiClient;

const MODEL_ACK: &str = "I understand. I'm ready to help with Samyoga administrative tasks.";

/// Admin chat assistant backed by the generative API, with a keyword
/// fallback when no API key is configured.
#[derive(Debug, Clone)]
pub struct AssistantService {
    db: SqlitePool,
    gemini: Option<GeminiClient>,
    instructor: String,
}

impl AssistantService {
    pub fn new(db: SqlitePool, gemini: Option<GeminiClient>, instructor: impl Into<String>) -> Self {
        Self {
            db,
            gemini,
            instructor: instructor.into(),
        }
    }

    pub async fn chat(&self, admin_id: Uuid, message: &str, history: Vec<ChatTurn>) -> AppResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::validation("Message is required"));
        }

        self.remember(
            &format!("conversation_{}_latest", admin_id),
            message,
            json!({ "timestamp": Utc::now().to_rfc3339() }),
        )
        .await?;

        let stats = self.studio_stats().await?;

        let response = match &self.gemini {
            Some(gemini) => {
                let mut contents = Vec::with_capacity(history.len() + 3);
                contents.push(ChatTurn::text("user", system_context(&self.instructor, &stats)));
                contents.push(ChatTurn::text("model", MODEL_ACK));
                contents.extend(history);
                contents.push(ChatTurn::text("user", message));

                gemini
                    .generate_text(&contents)
                    .await
                    .map_err(|e| AppError::Upstream(e.to_string()))?
            }
            None => fallback_response(message, &stats),
        };

        self.remember(
            &format!(
                "conversation_{}_response_{}",
                admin_id,
                Utc::now().timestamp_millis()
            ),
            &response,
            json!({
                "timestamp": Utc::now().to_rfc3339(),
                "user_message": message,
            }),
        )
        .await?;

        Ok(response)
    }

    pub async fn studio_stats(&self) -> AppResult<StudioStats> {
        let (students, approved_students): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(CASE WHEN status = ?2 THEN 1 ELSE 0 END), 0)
             FROM users WHERE role = ?1",
        )
        .bind(UserRole::Student)
        .bind(UserStatus::Approved)
        .fetch_one(&self.db)
        .await?;

        let (scheduled_classes,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM classes WHERE status = ?1")
                .bind(ClassStatus::Scheduled)
                .fetch_one(&self.db)
                .await?;

        let (pending_payments,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM payments WHERE status = ?1")
                .bind(PaymentStatus::Pending)
                .fetch_one(&self.db)
                .await?;

        Ok(StudioStats {
            students,
            approved_students,
            scheduled_classes,
            pending_payments,
        })
    }

    async fn remember(&self, key: &str, value: &str, context: serde_json::Value) -> AppResult<()> {
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO ai_memory (id, key, value, context, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                context = excluded.context,
                updated_at = excluded.updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(key)
        .bind(value)
        .bind(context.to_string())
        .bind(now)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Stored exchanges for one admin, newest first.
    pub async fn memories(&self, admin_id: Uuid) -> AppResult<Vec<AiMemory>> {
        let memories = sqlx::query_as::<_, AiMemory>(
            "SELECT id, key, value, context, created_at, updated_at FROM ai_memory
             WHERE key LIKE ?1
             ORDER BY updated_at DESC",
        )
        .bind(format!("conversation_{}_%", admin_id))
        .fetch_all(&self.db)
        .await?;

        Ok(memories)
    }
}

pub fn system_context(instructor: &str, stats: &StudioStats) -> String {
    format!(
        "You are an AI assistant for Samyoga, a yoga studio run by {instructor}.\n\
         You help with administrative tasks. Here's the current system status:\n\
         - Total students: {}\n\
         - Approved students: {}\n\
         - Scheduled classes: {}\n\
         - Pending payments: {}\n\n\
         You can help with:\n\
         - Student management and information\n\
         - Class scheduling and details\n\
         - Payment tracking\n\
         - General questions about the yoga studio\n\n\
         Be helpful, professional, and concise.",
        stats.students, stats.approved_students, stats.scheduled_classes, stats.pending_payments,
    )
}

/// Keyword answer used when the generative API is not configured.
pub fn fallback_response(message: &str, stats: &StudioStats) -> String {
    let lower = message.to_lowercase();
    let mut response = String::from("I'm your AI assistant. ");
    let mut matched = false;

    if lower.contains("student") {
        response.push_str(&format!("I found {} students in the system. ", stats.students));
        matched = true;
    }
    if lower.contains("class") {
        response.push_str(&format!("There are {} scheduled classes. ", stats.scheduled_classes));
        matched = true;
    }
    if lower.contains("payment") {
        response.push_str(&format!("There are {} pending payments. ", stats.pending_payments));
        matched = true;
    }

    if !matched {
        response.push_str(
            "I can help you with information about students, classes, and payments. \
             What would you like to know? (Note: Gemini API key not configured - using fallback mode)",
        );
    }

    response
}
