use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{slugify, BlogPost, Content, ContentSummary, ContentType, CreateContentRequest};

const CONTENT_COLUMNS: &str = "id, content_type, title, slug, body, published, published_at, \
                               created_by, created_at, updated_at";

const SLUG_ATTEMPTS: usize = 5;

/// Blog posts, resources and announcements managed from the admin panel.
#[derive(Debug, Clone)]
pub struct ContentService {
    db: SqlitePool,
}

impl ContentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> AppResult<Vec<ContentSummary>> {
        let items = sqlx::query_as::<_, ContentSummary>(
            "SELECT id, content_type, title, slug, published, published_at, created_at
             FROM content
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    pub async fn create(&self, request: CreateContentRequest, author: Uuid) -> AppResult<Content> {
        request.validate()?;

        let slug = self.unique_slug(&request.title).await?;
        let now = Utc::now();
        let published_at = request.published.then_some(now);

        let content = sqlx::query_as::<_, Content>(&format!(
            "INSERT INTO content
                (id, content_type, title, slug, body, published, published_at, created_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
             RETURNING {CONTENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(request.content_type)
        .bind(request.title.trim())
        .bind(&slug)
        .bind(&request.body)
        .bind(request.published)
        .bind(published_at)
        .bind(author)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(content_id = %content.id, slug = %content.slug, "content created");

        Ok(content)
    }

    async fn unique_slug(&self, title: &str) -> AppResult<String> {
        let base = slugify(title);
        let mut candidate = base.clone();

        for _ in 0..SLUG_ATTEMPTS {
            let taken = sqlx::query("SELECT 1 FROM content WHERE slug = ?1")
                .bind(&candidate)
                .fetch_optional(&self.db)
                .await?
                .is_some();

            if !taken {
                return Ok(candidate);
            }

            let suffix: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(6)
                .map(|c| char::from(c).to_ascii_lowercase())
                .collect();
            candidate = format!("{}-{}", base, suffix);
        }

        Err(AppError::Conflict(format!("Could not allocate a slug for '{}'", title)))
    }

    /// Publishing keeps the first publication date; unpublishing clears it.
    pub async fn set_published(&self, content_id: Uuid, published: bool) -> AppResult<Content> {
        let now = Utc::now();

        sqlx::query_as::<_, Content>(&format!(
            "UPDATE content
             SET published = ?1,
                 published_at = CASE WHEN ?1 THEN COALESCE(published_at, ?2) ELSE NULL END,
                 updated_at = ?2
             WHERE id = ?3
             RETURNING {CONTENT_COLUMNS}"
        ))
        .bind(published)
        .bind(now)
        .bind(content_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Content"))
    }

    pub async fn delete(&self, content_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM content WHERE id = ?1")
            .bind(content_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Content"));
        }

        tracing::info!(content_id = %content_id, "content deleted");

        Ok(())
    }

    pub async fn list_published_posts(&self) -> AppResult<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, Content>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content
             WHERE content_type = ?1 AND published = 1
             ORDER BY published_at DESC"
        ))
        .bind(ContentType::BlogPost)
        .fetch_all(&self.db)
        .await?;

        Ok(posts.into_iter().map(BlogPost::from).collect())
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> AppResult<BlogPost> {
        sqlx::query_as::<_, Content>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content
             WHERE slug = ?1 AND content_type = ?2 AND published = 1"
        ))
        .bind(slug)
        .bind(ContentType::BlogPost)
        .fetch_optional(&self.db)
        .await?
        .map(BlogPost::from)
        .ok_or(AppError::NotFound("Post"))
    }

    /// Published resources and practice guides for approved students.
    pub async fn list_resources(&self) -> AppResult<Vec<Content>> {
        let resources = sqlx::query_as::<_, Content>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM content
             WHERE content_type IN (?1, ?2) AND published = 1
             ORDER BY published_at DESC"
        ))
        .bind(ContentType::Resource)
        .bind(ContentType::PracticeGuide)
        .fetch_all(&self.db)
        .await?;

        Ok(resources)
    }
}
