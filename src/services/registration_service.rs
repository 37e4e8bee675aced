use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    QuestionnaireRequest, Registration, RegistrationWithUser, RegistrationWithUserRow, User,
    UserStatus,
};
use crate::services::UserService;

#[derive(Debug, Clone)]
pub struct RegistrationService {
    db: SqlitePool,
    users: UserService,
}

impl RegistrationService {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            users: UserService::new(db.clone()),
            db,
        }
    }

    /// Create or replace the caller's questionnaire answers.
    pub async fn submit_questionnaire(
        &self,
        user_id: Uuid,
        answers: QuestionnaireRequest,
    ) -> AppResult<Registration> {
        let answers = answers.normalized();

        let registration = sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations
                (id, user_id, experience, goals, injuries, preferences, availability, additional_info, submitted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT (user_id) DO UPDATE SET
                experience = excluded.experience,
                goals = excluded.goals,
                injuries = excluded.injuries,
                preferences = excluded.preferences,
                availability = excluded.availability,
                additional_info = excluded.additional_info,
                submitted_at = excluded.submitted_at
             RETURNING id, user_id, experience, goals, injuries, preferences, availability,
                       additional_info, submitted_at, reviewed_at, reviewed_by",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&answers.experience)
        .bind(&answers.goals)
        .bind(&answers.injuries)
        .bind(&answers.preferences)
        .bind(&answers.availability)
        .bind(&answers.additional_info)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(user_id = %user_id, "questionnaire submitted");

        Ok(registration)
    }

    /// All registrations with their applicant, newest submission first.
    pub async fn list_registrations(&self) -> AppResult<Vec<RegistrationWithUser>> {
        let rows = sqlx::query_as::<_, RegistrationWithUserRow>(
            "SELECT r.id, r.user_id, r.experience, r.goals, r.injuries, r.preferences,
                    r.availability, r.additional_info, r.submitted_at, r.reviewed_at, r.reviewed_by,
                    u.name AS user_name, u.email AS user_email, u.status AS user_status,
                    u.created_at AS user_created_at
             FROM registrations r
             JOIN users u ON u.id = r.user_id
             ORDER BY r.submitted_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(RegistrationWithUser::from).collect())
    }

    /// Approve or reject an applicant and stamp their registration as reviewed.
    pub async fn review(&self, user_id: Uuid, approved: bool, reviewer: Uuid) -> AppResult<User> {
        let status = UserStatus::from_decision(approved);
        let mut tx = self.db.begin().await?;

        let updated = sqlx::query("UPDATE users SET status = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(status)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("User"));
        }

        sqlx::query("UPDATE registrations SET reviewed_at = ?1, reviewed_by = ?2 WHERE user_id = ?3")
            .bind(Utc::now())
            .bind(reviewer)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(user_id = %user_id, reviewer = %reviewer, status = status.as_str(), "registration reviewed");

        self.users
            .get_user_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound("User"))
    }
}
