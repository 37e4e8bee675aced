use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::TestApp;

#[cfg(test)]
mod content_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_blog_shows_only_published_posts() {
        let app = TestApp::new().await;
        let (_, token) = app.admin().await;

        let (status, draft) = app
            .post(
                "/api/admin/content",
                Some(&token),
                json!({
                    "content_type": "BLOG_POST",
                    "title": "Breathing Through Winter",
                    "body": "# Intro\n\nCold mornings call for warming pranayama.\n\nMore below."
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(draft["slug"], "breathing-through-winter");
        assert_eq!(draft["published"], false);

        let (status, posts) = app.get("/api/blog", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(posts.as_array().unwrap().is_empty());

        let (status, _) = app.get("/api/blog/breathing-through-winter", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, published) = app
            .put(
                &format!("/api/admin/content/{}/publish", draft["id"].as_str().unwrap()),
                Some(&token),
                json!({ "published": true }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(published["published_at"].is_string());

        let (_, posts) = app.get("/api/blog", None).await;
        assert_eq!(posts[0]["slug"], "breathing-through-winter");
        assert_eq!(posts[0]["excerpt"], "Cold mornings call for warming pranayama.");

        let (status, post) = app.get("/api/blog/breathing-through-winter", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(post["title"], "Breathing Through Winter");
    }

    #[tokio::test]
    async fn test_delete_content() {
        let app = TestApp::new().await;
        let (_, token) = app.admin().await;

        let (_, item) = app
            .post(
                "/api/admin/content",
                Some(&token),
                json!({
                    "content_type": "ANNOUNCEMENT",
                    "title": "Studio closed Monday",
                    "body": "Rest day.",
                    "published": true
                }),
            )
            .await;
        let uri = format!("/api/admin/content/{}", item["id"].as_str().unwrap());

        let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resources_for_approved_students() {
        let app = TestApp::new().await;
        let (_, admin_token) = app.admin().await;
        let (_, student_token) = app.approved_student().await;

        app.post(
            "/api/admin/content",
            Some(&admin_token),
            json!({
                "content_type": "RESOURCE",
                "title": "Props at Home",
                "body": "Use a belt and two cushions.",
                "published": true
            }),
        )
        .await;

        let (status, resources) = app.get("/api/dashboard/resources", Some(&student_token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resources[0]["title"], "Props at Home");
    }
}
