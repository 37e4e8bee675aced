use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Progress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub metric: String,
    pub value: f64,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordProgressRequest {
    #[validate(length(min = 1, max = 100, message = "Metric is required"))]
    pub metric: String,
    pub value: f64,
    pub notes: Option<String>,
    pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressGoal {
    pub metric: String,
    pub value: f64,
    pub notes: Option<String>,
}

/// Dashboard progress card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub classes_attended: i64,
    pub practice_days: usize,
    pub last_practice_date: Option<DateTime<Utc>>,
    pub goals: Vec<ProgressGoal>,
}
