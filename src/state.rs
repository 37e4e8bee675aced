use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::services::{
    AssistantService, ClassService, ContentService, GeminiClient, PaymentService, PosterService,
    ProgressService, RegistrationService, ReminderService, UserService,
};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub auth_service: AuthService,
    pub users: UserService,
    pub registrations: RegistrationService,
    pub classes: ClassService,
    pub payments: PaymentService,
    pub progress: ProgressService,
    pub content: ContentService,
    pub assistant: AssistantService,
    pub posters: PosterService,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> Result<Self> {
        let reminders = ReminderService::new(config.smtp.as_ref())?;
        let gemini = GeminiClient::from_config(&config.gemini)?;
        if gemini.is_none() {
            tracing::warn!("GOOGLE_API_KEY not set, assistant runs in fallback mode");
        }

        Ok(Self {
            auth_service: AuthService::new(db.clone(), &config.jwt_secret),
            users: UserService::new(db.clone()),
            registrations: RegistrationService::new(db.clone()),
            classes: ClassService::new(db.clone(), config.studio_instructor.clone()),
            payments: PaymentService::new(db.clone(), reminders),
            progress: ProgressService::new(db.clone()),
            content: ContentService::new(db.clone()),
            assistant: AssistantService::new(db.clone(), gemini.clone(), config.studio_instructor.clone()),
            posters: PosterService::new(gemini),
            config: Arc::new(config),
            db,
        })
    }
}
