use axum::http::StatusCode;
use serde_json::json;

use crate::common::{unique_email, TestApp};

#[cfg(test)]
mod access_control_tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_requires_token() {
        let app = TestApp::new().await;

        let (status, body) = app.get("/api/dashboard/classes", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "UNAUTHORIZED");

        let (status, _) = app.get("/api/dashboard/classes", Some("not-a-jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_pending_student_cannot_use_dashboard() {
        let app = TestApp::new().await;
        let (_, token) = app.pending_student().await;

        for uri in [
            "/api/dashboard/classes",
            "/api/dashboard/payments",
            "/api/dashboard/progress",
            "/api/dashboard/resources",
        ] {
            let (status, body) = app.get(uri, Some(&token)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
            assert_eq!(body["error"], "ACCOUNT_NOT_APPROVED");
        }
    }

    #[tokio::test]
    async fn test_pending_student_can_submit_questionnaire() {
        let app = TestApp::new().await;
        let (user, token) = app.pending_student().await;

        let (status, body) = app
            .post(
                "/api/register/questionnaire",
                Some(&token),
                json!({ "experience": "Beginner", "goals": "Better sleep", "injuries": "" }),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Questionnaire submitted successfully");
        assert_eq!(body["registration"]["user_id"], user.id.to_string());
        assert!(body["registration"]["injuries"].is_null());
    }

    #[tokio::test]
    async fn test_students_cannot_reach_admin_routes() {
        let app = TestApp::new().await;
        let (_, token) = app.approved_student().await;

        for uri in [
            "/api/admin/registrations",
            "/api/admin/students",
            "/api/admin/schedule",
            "/api/admin/payments",
            "/api/admin/content",
        ] {
            let (status, body) = app.get(uri, Some(&token)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
            assert_eq!(body["error"], "FORBIDDEN");
        }

        let (status, _) = app
            .post("/api/admin/ai/chat", Some(&token), json!({ "message": "hi" }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_approval_takes_effect_without_new_login() {
        let app = TestApp::new().await;
        let (_, admin_token) = app.admin().await;

        let email = unique_email();
        let (status, registered) = app
            .post(
                "/api/auth/register",
                None,
                json!({ "email": email, "password": "lotus123" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = registered["user_id"].as_str().unwrap().to_string();

        let student_token = app.login(&email, "lotus123").await;
        let (status, _) = app.get("/api/dashboard/classes", Some(&student_token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .post(
                "/api/admin/approve",
                Some(&admin_token),
                json!({ "user_id": user_id, "approved": true }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User approved successfully");
        assert_eq!(body["user"]["status"], "APPROVED");

        let (status, _) = app.get("/api/dashboard/classes", Some(&student_token)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejected_student_stays_locked_out() {
        let app = TestApp::new().await;
        let (_, admin_token) = app.admin().await;
        let (student, student_token) = app.pending_student().await;

        let (status, body) = app
            .post(
                "/api/admin/approve",
                Some(&admin_token),
                json!({ "user_id": student.id, "approved": false }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User rejected successfully");

        let (status, _) = app.get("/api/dashboard/classes", Some(&student_token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_approve_requires_fields() {
        let app = TestApp::new().await;
        let (_, admin_token) = app.admin().await;

        let (status, body) = app
            .post("/api/admin/approve", Some(&admin_token), json!({ "approved": true }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User ID and approval status are required");

        let (status, _) = app
            .post(
                "/api/admin/approve",
                Some(&admin_token),
                json!({ "user_id": uuid::Uuid::new_v4(), "approved": true }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = TestApp::new().await;

        let (status, body) = app.get("/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "samyoga");
    }
}
