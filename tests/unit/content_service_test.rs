use assert_matches::assert_matches;
use samyoga::models::*;
use samyoga::services::ContentService;
use samyoga::AppError;
use uuid::Uuid;

use crate::common::{create_user, test_pool};

#[cfg(test)]
mod content_service_tests {
    use super::*;

    fn post(title: &str, published: bool) -> CreateContentRequest {
        CreateContentRequest {
            content_type: ContentType::BlogPost,
            title: title.to_string(),
            body: "Breath first.\n\nThen movement.".to_string(),
            published,
        }
    }

    #[tokio::test]
    async fn test_slugs_are_unique() {
        let pool = test_pool().await;
        let service = ContentService::new(pool.clone());
        let admin = create_user(&pool, UserRole::Admin, UserStatus::Approved).await;

        let first = service.create(post("Morning Rituals", true), admin.id).await.unwrap();
        let second = service.create(post("Morning Rituals", true), admin.id).await.unwrap();

        assert_eq!(first.slug, "morning-rituals");
        assert_ne!(first.slug, second.slug);
        assert!(second.slug.starts_with("morning-rituals-"));
    }

    #[tokio::test]
    async fn test_publish_toggle_controls_blog_visibility() {
        let pool = test_pool().await;
        let service = ContentService::new(pool.clone());
        let admin = create_user(&pool, UserRole::Admin, UserStatus::Approved).await;

        let draft = service.create(post("Draft Thoughts", false), admin.id).await.unwrap();
        assert!(draft.published_at.is_none());
        assert!(service.list_published_posts().await.unwrap().is_empty());
        assert_matches!(
            service.get_post_by_slug(&draft.slug).await,
            Err(AppError::NotFound("Post"))
        );

        let published = service.set_published(draft.id, true).await.unwrap();
        assert!(published.published);
        assert!(published.published_at.is_some());

        let posts = service.list_published_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].excerpt, "Breath first.");

        let unpublished = service.set_published(draft.id, false).await.unwrap();
        assert!(unpublished.published_at.is_none());
    }

    #[tokio::test]
    async fn test_resources_exclude_blog_posts() {
        let pool = test_pool().await;
        let service = ContentService::new(pool.clone());
        let admin = create_user(&pool, UserRole::Admin, UserStatus::Approved).await;

        service.create(post("Public Post", true), admin.id).await.unwrap();
        service
            .create(
                CreateContentRequest {
                    content_type: ContentType::PracticeGuide,
                    title: "Home Practice Guide".to_string(),
                    body: "Ten minutes a day.".to_string(),
                    published: true,
                },
                admin.id,
            )
            .await
            .unwrap();

        let resources = service.list_resources().await.unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].content_type, ContentType::PracticeGuide);
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let service = ContentService::new(pool.clone());
        let admin = create_user(&pool, UserRole::Admin, UserStatus::Approved).await;

        let item = service.create(post("Short Lived", false), admin.id).await.unwrap();
        service.delete(item.id).await.unwrap();

        assert!(service.list_all().await.unwrap().is_empty());
        assert_matches!(service.delete(Uuid::new_v4()).await, Err(AppError::NotFound("Content")));
    }
}
