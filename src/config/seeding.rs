use anyhow::Result;
use chrono::{Duration, Timelike, Utc};
use sqlx::SqlitePool;

use crate::config::AdminSeed;
use crate::models::*;
use crate::services::*;

const DEMO_STUDENT_EMAIL: &str = "demo.student@samyoga.online";
const DEMO_STUDENT_PASSWORD: &str = "namaste123";

pub struct DatabaseSeeder {
    pool: SqlitePool,
}

impl DatabaseSeeder {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create or promote the studio admin account.
    pub async fn ensure_admin(&self, seed: &AdminSeed) -> Result<()> {
        let user_service = UserService::new(self.pool.clone());
        let email = normalize_email(&seed.email);

        match user_service.get_user_by_email(&email).await? {
            Some(user) if user.role == UserRole::Admin && user.status == UserStatus::Approved => {
                tracing::debug!(email = %email, "admin account already present");
            }
            Some(user) => {
                user_service.promote_to_admin(user.id, &seed.password).await?;
                tracing::info!(email = %email, "existing account promoted to admin");
            }
            None => {
                user_service
                    .create_user(CreateUser {
                        email: email.clone(),
                        password: seed.password.clone(),
                        name: Some(seed.name.clone()),
                        role: UserRole::Admin,
                        status: UserStatus::Approved,
                    })
                    .await?;
                tracing::info!(email = %email, "admin account created");
            }
        }

        Ok(())
    }

    /// Demo data for local development. Existing rows are left alone.
    pub async fn seed_demo(&self, instructor: &str) -> Result<()> {
        tracing::info!("Starting demo data seeding...");

        self.seed_demo_student().await?;
        self.seed_demo_classes(instructor).await?;
        self.seed_demo_content().await?;

        tracing::info!("Demo data seeding completed!");
        Ok(())
    }

    async fn seed_demo_student(&self) -> Result<()> {
        let user_service = UserService::new(self.pool.clone());

        if user_service.get_user_by_email(DEMO_STUDENT_EMAIL).await?.is_none() {
            user_service
                .create_user(CreateUser {
                    email: DEMO_STUDENT_EMAIL.to_string(),
                    password: DEMO_STUDENT_PASSWORD.to_string(),
                    name: Some("Demo Student".to_string()),
                    role: UserRole::Student,
                    status: UserStatus::Approved,
                })
                .await?;
            tracing::info!("Created demo student");
        }

        Ok(())
    }

    async fn seed_demo_classes(&self, instructor: &str) -> Result<()> {
        let class_service = ClassService::new(self.pool.clone(), instructor);

        if !class_service.list_schedule().await?.is_empty() {
            return Ok(());
        }

        let tomorrow = (Utc::now() + Duration::days(1))
            .with_hour(6)
            .and_then(|d| d.with_minute(30))
            .and_then(|d| d.with_second(0))
            .and_then(|d| d.with_nanosecond(0))
            .unwrap_or_else(Utc::now);

        let demo_classes = vec![
            CreateClassRequest {
                title: "Morning Hatha Flow".to_string(),
                description: Some("Breath-led sequence to start the day.".to_string()),
                class_type: ClassType::Hatha,
                date: tomorrow,
                duration: 60,
                meet_link: Some("https://meet.google.com/sam-yoga-one".to_string()),
                max_students: 15,
                instructor: None,
            },
            CreateClassRequest {
                title: "Evening Yin".to_string(),
                description: Some("Long holds for the connective tissue.".to_string()),
                class_type: ClassType::Yin,
                date: tomorrow + Duration::hours(12),
                duration: 75,
                meet_link: Some("https://meet.google.com/sam-yoga-two".to_string()),
                max_students: 10,
                instructor: None,
            },
        ];

        for class in demo_classes {
            class_service.create_class(class).await?;
        }
        tracing::info!("Created demo classes");

        Ok(())
    }

    async fn seed_demo_content(&self) -> Result<()> {
        let content_service = ContentService::new(self.pool.clone());
        let user_service = UserService::new(self.pool.clone());

        if !content_service.list_all().await?.is_empty() {
            return Ok(());
        }

        let Some(author) = user_service.get_user_by_email(DEMO_STUDENT_EMAIL).await? else {
            return Ok(());
        };

        content_service
            .create(
                CreateContentRequest {
                    content_type: ContentType::BlogPost,
                    title: "Why Yin and Hatha Belong Together".to_string(),
                    body: "Hatha builds heat and strength. Yin asks for stillness and patience.\n\n\
                           Practicing both through the week balances effort with surrender."
                        .to_string(),
                    published: true,
                },
                author.id,
            )
            .await?;
        tracing::info!("Created demo blog post");

        Ok(())
    }
}
