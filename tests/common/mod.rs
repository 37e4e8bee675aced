use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use fake::{faker::name::en::Name, Fake};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Once;
use std::time::Duration as StdDuration;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use samyoga::api::create_routes;
use samyoga::config::{in_memory_pool, run_migrations, AppConfig, DatabaseConfig};
use samyoga::models::*;
use samyoga::services::{ClassService, UserService};
use samyoga::state::AppState;

pub const TEST_PASSWORD: &str = "namaste123";

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("samyoga=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory database with migrations applied.
pub async fn test_pool() -> SqlitePool {
    init_test_logging();
    in_memory_pool().await.expect("Failed to create test database")
}

/// File-backed database allowing several concurrent connections.
/// The returned directory must outlive the pool.
pub async fn file_pool(max_connections: u32) -> (TempDir, SqlitePool) {
    init_test_logging();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}", dir.path().join("samyoga.db").display()),
        max_connections,
        connect_timeout: StdDuration::from_secs(30),
    };

    let pool = config.create_pool().await.expect("Failed to open database");
    run_migrations(&pool).await.expect("Failed to run migrations");
    (dir, pool)
}

/// Full router over an isolated database.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(AppConfig::for_tests()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let pool = test_pool().await;
        let state = AppState::new(pool.clone(), config).expect("Failed to build state");
        let router = create_routes(state.clone());

        Self {
            router,
            state,
            pool,
        }
    }

    /// Send a request and decode the JSON body (Null when empty or not JSON).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    /// Log in through the API and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Create an account directly in the store and log it in.
    pub async fn user_with_token(&self, role: UserRole, status: UserStatus) -> (User, String) {
        let user = create_user(&self.pool, role, status).await;
        let token = self.login(&user.email, TEST_PASSWORD).await;
        (user, token)
    }

    pub async fn admin(&self) -> (User, String) {
        self.user_with_token(UserRole::Admin, UserStatus::Approved).await
    }

    pub async fn approved_student(&self) -> (User, String) {
        self.user_with_token(UserRole::Student, UserStatus::Approved).await
    }

    pub async fn pending_student(&self) -> (User, String) {
        self.user_with_token(UserRole::Student, UserStatus::Pending).await
    }
}

pub fn unique_email() -> String {
    format!("yogi.{}@example.com", Uuid::new_v4().simple())
}

pub async fn create_user(pool: &SqlitePool, role: UserRole, status: UserStatus) -> User {
    UserService::new(pool.clone())
        .create_user(CreateUser {
            email: unique_email(),
            password: TEST_PASSWORD.to_string(),
            name: Some(Name().fake()),
            role,
            status,
        })
        .await
        .expect("Failed to create user")
}

pub fn class_request(max_students: i64) -> CreateClassRequest {
    CreateClassRequest {
        title: "Sunrise Hatha".to_string(),
        description: Some("Gentle opening sequence".to_string()),
        class_type: ClassType::Hatha,
        date: Utc::now() + Duration::days(2),
        duration: 60,
        meet_link: Some("https://meet.google.com/abc-defg-hij".to_string()),
        max_students,
        instructor: None,
    }
}

pub async fn create_class(pool: &SqlitePool, max_students: i64) -> YogaClass {
    ClassService::new(pool.clone(), "Samyuktha Nambiar")
        .create_class(class_request(max_students))
        .await
        .expect("Failed to create class")
}
