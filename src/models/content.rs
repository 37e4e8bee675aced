use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    BlogPost,
    Resource,
    Announcement,
    PracticeGuide,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Content {
    pub id: Uuid,
    pub content_type: ContentType,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row without the body.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentSummary {
    pub id: Uuid,
    pub content_type: ContentType,
    pub title: String,
    pub slug: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContentRequest {
    pub content_type: ContentType,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishRequest {
    pub published: bool,
}

/// Public blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub excerpt: String,
    pub content: String,
}

const EXCERPT_CHARS: usize = 160;

impl From<Content> for BlogPost {
    fn from(content: Content) -> Self {
        Self {
            excerpt: excerpt(&content.body, EXCERPT_CHARS),
            slug: content.slug,
            title: content.title,
            date: content.published_at,
            content: content.body,
        }
    }
}

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// URL-safe slug: lowercase ASCII alphanumerics joined by single hyphens.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "post".to_string()
    } else {
        slug.to_string()
    }
}

/// First paragraph of `body`, cut at a word boundary.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let first = body
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty() && !p.starts_with('#'))
        .unwrap_or("");

    if first.chars().count() <= max_chars {
        return first.to_string();
    }

    let cut: String = first.chars().take(max_chars).collect();
    match cut.rfind(' ') {
        Some(idx) => format!("{}…", &cut[..idx]),
        None => format!("{}…", cut),
    }
}
