use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::AuthError;
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, StudentSummary, User, UserRole, UserStatus};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, status, created_at, updated_at";

/// Account storage shared by authentication, approval and seeding.
#[derive(Debug, Clone)]
pub struct UserService {
    db: SqlitePool,
}

impl UserService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a new account. The email must already be normalized.
    pub async fn create_user(&self, user_data: CreateUser) -> AppResult<User> {
        let password_hash = hash_password(&user_data.password).map_err(AuthError::from)?;
        let now = Utc::now();

        let result = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, name, email, password_hash, role, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user_data.name)
        .bind(&user_data.email)
        .bind(&password_hash)
        .bind(user_data.role)
        .bind(user_data.status)
        .bind(now)
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::EmailAlreadyExists.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// Students with their booking and payment counts, newest first.
    pub async fn list_students(&self) -> AppResult<Vec<StudentSummary>> {
        let students = sqlx::query_as::<_, StudentSummary>(
            "SELECT u.id, u.name, u.email, u.status, u.created_at,
                    (SELECT COUNT(*) FROM bookings b WHERE b.user_id = u.id) AS bookings_count,
                    (SELECT COUNT(*) FROM payments p WHERE p.user_id = u.id) AS payments_count
             FROM users u
             WHERE u.role = ?1
             ORDER BY u.created_at DESC",
        )
        .bind(UserRole::Student)
        .fetch_all(&self.db)
        .await?;

        Ok(students)
    }

    /// Promote an existing account to an approved admin with a new password.
    pub async fn promote_to_admin(&self, user_id: Uuid, password: &str) -> AppResult<User> {
        let password_hash = hash_password(password).map_err(AuthError::from)?;

        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = ?1, status = ?2, password_hash = ?3, updated_at = ?4
             WHERE id = ?5
             RETURNING {USER_COLUMNS}"
        ))
        .bind(UserRole::Admin)
        .bind(UserStatus::Approved)
        .bind(&password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("User"))
    }
}
