use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::password::verify_password;
use crate::auth::{
    subject_id, AuthError, AuthResponse, JwtService, LoginRequest, MessageResponse,
    RefreshTokenRequest, RegisterRequest, RegisterResponse, TokenKind, TokenResponse, UserSession,
};
use crate::error::{AppError, AppResult};
use crate::models::{normalize_email, validate_email, CreateUser, User, UserRole, UserStatus};
use crate::services::UserService;

#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    users: UserService,
    db: SqlitePool,
}

impl AuthService {
    pub fn new(db: SqlitePool, jwt_secret: &str) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_secret),
            users: UserService::new(db.clone()),
            db,
        }
    }

    /// Register a new student account awaiting approval.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let email = normalize_email(&request.email);
        validate_email(&email).map_err(|e| AuthError::EmailValidation(e.to_string()))?;

        if self.users.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let name = request
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let user = self
            .users
            .create_user(CreateUser {
                email,
                password: request.password,
                name,
                role: UserRole::Student,
                status: UserStatus::Pending,
            })
            .await?;

        tracing::info!(user_id = %user.id, "student registered");

        Ok(RegisterResponse {
            message: "User created successfully".to_string(),
            user_id: user.id,
        })
    }

    /// Login user
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .users
            .get_user_by_email(&normalize_email(&request.email))
            .await
            .map_err(into_auth_error)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let (access_token, refresh_token) =
            self.jwt_service
                .create_token_pair(user.id, &user.email, user.role)?;

        self.purge_expired_tokens().await?;
        self.store_refresh_token(user.id, &refresh_token).await?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
            user: user.into(),
        })
    }

    /// Refresh access token
    pub async fn refresh_token(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<TokenResponse, AuthError> {
        let claims = self
            .jwt_service
            .validate_kind(&request.refresh_token, TokenKind::Refresh)?;
        let user_id = subject_id(&claims)?;

        if !self.is_refresh_token_valid(user_id, &request.refresh_token).await? {
            return Err(AuthError::InvalidToken);
        }

        // Role may have changed since the refresh token was issued.
        let user = self.load_user(user_id).await?;

        let access_token = self
            .jwt_service
            .create_access_token(user.id, &user.email, user.role)?;

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
        })
    }

    /// Logout user (blacklist token)
    pub async fn logout(&self, token: &str) -> Result<MessageResponse, AuthError> {
        let claims = self.jwt_service.validate_kind(token, TokenKind::Access)?;
        let user_id = subject_id(&claims)?;

        self.blacklist_token(&claims.jti, claims.exp as i64).await?;
        self.revoke_user_refresh_tokens(user_id).await?;

        tracing::info!(user_id = %user_id, "user logged out");

        Ok(MessageResponse::new("Successfully logged out"))
    }

    pub async fn is_token_blacklisted(&self, jti: &str) -> Result<bool, AuthError> {
        let result = sqlx::query("SELECT 1 FROM token_blacklist WHERE jti = ?1")
            .bind(jti)
            .fetch_optional(&self.db)
            .await?;

        Ok(result.is_some())
    }

    /// Resolve a bearer token into a session carrying the user's current
    /// role and status.
    pub async fn validate_session(&self, token: &str) -> Result<UserSession, AuthError> {
        let claims = self.jwt_service.validate_kind(token, TokenKind::Access)?;

        if self.is_token_blacklisted(&claims.jti).await? {
            return Err(AuthError::InvalidToken);
        }

        let user = self.load_user(subject_id(&claims)?).await?;

        Ok(UserSession {
            user_id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            status: user.status,
            jti: claims.jti,
            expires_at: claims.exp,
        })
    }

    /// Drop blacklist entries and refresh tokens that can no longer be used.
    pub async fn purge_expired_tokens(&self) -> Result<u64, AuthError> {
        let now = Utc::now();

        let blacklisted = sqlx::query("DELETE FROM token_blacklist WHERE expires_at < ?1")
            .bind(now)
            .execute(&self.db)
            .await?;
        let refresh = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?1")
            .bind(now)
            .execute(&self.db)
            .await?;

        let removed = blacklisted.rows_affected() + refresh.rows_affected();
        if removed > 0 {
            tracing::debug!(removed, "purged expired tokens");
        }

        Ok(removed)
    }

    pub async fn current_user(&self, session: &UserSession) -> Result<User, AuthError> {
        self.load_user(session.user_id).await
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, AuthError> {
        self.users
            .get_user_by_id(user_id)
            .await
            .map_err(into_auth_error)?
            .ok_or(AuthError::InvalidToken)
    }

    async fn store_refresh_token(&self, user_id: Uuid, refresh_token: &str) -> Result<(), AuthError> {
        let claims = self.jwt_service.validate_token(refresh_token)?;
        let expires_at =
            DateTime::from_timestamp(claims.exp as i64, 0).ok_or(AuthError::InvalidToken)?;

        sqlx::query(
            "INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, revoked, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(hash_token(refresh_token))
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn is_refresh_token_valid(
        &self,
        user_id: Uuid,
        refresh_token: &str,
    ) -> Result<bool, AuthError> {
        let row: Option<(DateTime<Utc>,)> = sqlx::query_as(
            "SELECT expires_at FROM refresh_tokens
             WHERE user_id = ?1 AND token_hash = ?2 AND revoked = 0",
        )
        .bind(user_id)
        .bind(hash_token(refresh_token))
        .fetch_optional(&self.db)
        .await?;

        Ok(matches!(row, Some((expires_at,)) if expires_at > Utc::now()))
    }

    async fn revoke_user_refresh_tokens(&self, user_id: Uuid) -> Result<(), AuthError> {
        sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn blacklist_token(&self, jti: &str, exp: i64) -> Result<(), AuthError> {
        let expires_at = DateTime::from_timestamp(exp, 0).ok_or(AuthError::InvalidToken)?;

        sqlx::query(
            "INSERT INTO token_blacklist (jti, expires_at, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

fn hash_token(token: &str) -> String {
    format!("{:x}", md5::compute(token))
}

fn into_auth_error(err: AppError) -> AuthError {
    match err {
        AppError::Auth(auth) => auth,
        AppError::Database(db) => AuthError::Database(db),
        other => AuthError::Internal(anyhow::anyhow!(other.to_string())),
    }
}
