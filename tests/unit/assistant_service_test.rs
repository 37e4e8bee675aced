use assert_matches::assert_matches;
use samyoga::models::*;
use samyoga::services::{AssistantService, ClassService};
use samyoga::AppError;

use crate::common::{class_request, create_user, test_pool};

#[cfg(test)]
mod assistant_service_tests {
    use super::*;

    fn service(pool: &sqlx::SqlitePool) -> AssistantService {
        AssistantService::new(pool.clone(), None, "Samyuktha Nambiar")
    }

    #[tokio::test]
    async fn test_studio_stats() {
        let pool = test_pool().await;
        create_user(&pool, UserRole::Student, UserStatus::Approved).await;
        create_user(&pool, UserRole::Student, UserStatus::Pending).await;
        create_user(&pool, UserRole::Admin, UserStatus::Approved).await;
        ClassService::new(pool.clone(), "Samyuktha Nambiar")
            .create_class(class_request(10))
            .await
            .unwrap();

        let stats = service(&pool).studio_stats().await.unwrap();
        assert_eq!(stats.students, 2);
        assert_eq!(stats.approved_students, 1);
        assert_eq!(stats.scheduled_classes, 1);
        assert_eq!(stats.pending_payments, 0);
    }

    #[tokio::test]
    async fn test_fallback_chat_uses_counts_and_remembers_exchange() {
        let pool = test_pool().await;
        let admin = create_user(&pool, UserRole::Admin, UserStatus::Approved).await;
        create_user(&pool, UserRole::Student, UserStatus::Pending).await;
        let assistant = service(&pool);

        let response = assistant
            .chat(admin.id, "How many students do we have?", vec![])
            .await
            .unwrap();
        assert_eq!(response, "I'm your AI assistant. I found 1 students in the system. ");

        let memories = assistant.memories(admin.id).await.unwrap();
        assert_eq!(memories.len(), 2);

        let latest = memories
            .iter()
            .find(|m| m.key == format!("conversation_{}_latest", admin.id))
            .unwrap();
        assert_eq!(latest.value, "How many students do we have?");

        let stored = memories
            .iter()
            .find(|m| m.key.starts_with(&format!("conversation_{}_response_", admin.id)))
            .unwrap();
        assert_eq!(stored.value, response);
        let context: serde_json::Value =
            serde_json::from_str(stored.context.as_deref().unwrap()).unwrap();
        assert_eq!(context["user_message"], "How many students do we have?");
    }

    #[tokio::test]
    async fn test_latest_message_is_overwritten() {
        let pool = test_pool().await;
        let admin = create_user(&pool, UserRole::Admin, UserStatus::Approved).await;
        let assistant = service(&pool);

        assistant.chat(admin.id, "first", vec![]).await.unwrap();
        assistant.chat(admin.id, "second", vec![]).await.unwrap();

        let memories = assistant.memories(admin.id).await.unwrap();
        let latest: Vec<_> = memories.iter().filter(|m| m.key.ends_with("_latest")).collect();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].value, "second");
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let pool = test_pool().await;
        let admin = create_user(&pool, UserRole::Admin, UserStatus::Approved).await;

        assert_matches!(
            service(&pool).chat(admin.id, "   ", vec![]).await,
            Err(AppError::Validation(_))
        );
    }
}
