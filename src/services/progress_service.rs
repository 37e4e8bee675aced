use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::models::{
    BookingStatus, Progress, ProgressGoal, ProgressSummary, RecordProgressRequest,
};

const RECENT_GOALS: i64 = 10;

#[derive(Debug, Clone)]
pub struct ProgressService {
    db: SqlitePool,
}

impl ProgressService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn summary(&self, user_id: Uuid) -> AppResult<ProgressSummary> {
        let sessions: Vec<(DateTime<Utc>, BookingStatus)> = sqlx::query_as(
            "SELECT c.date, b.status
             FROM bookings b
             JOIN classes c ON c.id = b.class_id
             WHERE b.user_id = ?1 AND b.status != 'CANCELLED'",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        let goals = sqlx::query_as::<_, (String, f64, Option<String>)>(
            "SELECT metric, value, notes FROM progress
             WHERE user_id = ?1
             ORDER BY recorded_at DESC
             LIMIT ?2",
        )
        .bind(user_id)
        .bind(RECENT_GOALS)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|(metric, value, notes)| ProgressGoal { metric, value, notes })
        .collect();

        Ok(summarize(&sessions, goals))
    }

    pub async fn record(&self, user_id: Uuid, request: RecordProgressRequest) -> AppResult<Progress> {
        request.validate()?;
        let now = Utc::now();

        let progress = sqlx::query_as::<_, Progress>(
            "INSERT INTO progress (id, user_id, metric, value, notes, recorded_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, user_id, metric, value, notes, recorded_at, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(request.metric.trim())
        .bind(request.value)
        .bind(&request.notes)
        .bind(request.recorded_at.unwrap_or(now))
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(progress)
    }
}

/// Fold a student's non-cancelled bookings into the dashboard card.
fn summarize(
    sessions: &[(DateTime<Utc>, BookingStatus)],
    goals: Vec<ProgressGoal>,
) -> ProgressSummary {
    let attended: Vec<DateTime<Utc>> = sessions
        .iter()
        .filter(|(_, status)| *status == BookingStatus::Attended)
        .map(|(date, _)| *date)
        .collect();

    let practice_days = sessions
        .iter()
        .map(|(date, _)| date.date_naive())
        .collect::<HashSet<_>>()
        .len();

    ProgressSummary {
        classes_attended: attended.len() as i64,
        practice_days,
        last_practice_date: attended.into_iter().max(),
        goals,
    }
}
