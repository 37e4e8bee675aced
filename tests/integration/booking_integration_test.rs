use axum::http::StatusCode;
use serde_json::json;

use crate::common::{create_class, TestApp};

#[cfg(test)]
mod booking_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_book_and_cancel_class() {
        let app = TestApp::new().await;
        let (_, token) = app.approved_student().await;
        let class = create_class(&app.pool, 5).await;

        let (status, body) = app
            .post(
                "/api/dashboard/classes/book",
                Some(&token),
                json!({ "class_id": class.id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Class booked successfully");
        assert_eq!(body["booking"]["status"], "CONFIRMED");

        let (status, classes) = app.get("/api/dashboard/classes", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(classes[0]["booking_status"], "CONFIRMED");
        assert_eq!(classes[0]["spots_left"], 4);

        let (status, body) = app
            .post(
                "/api/dashboard/classes/book",
                Some(&token),
                json!({ "class_id": class.id }),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "ALREADY_BOOKED");

        let (status, _) = app
            .post(
                &format!("/api/dashboard/classes/{}/cancel", class.id),
                Some(&token),
                json!({}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, classes) = app.get("/api/dashboard/classes", Some(&token)).await;
        assert_eq!(classes[0]["booking_status"], "CANCELLED");
        assert_eq!(classes[0]["spots_left"], 5);
    }

    #[tokio::test]
    async fn test_booking_full_class_fails() {
        let app = TestApp::new().await;
        let class = create_class(&app.pool, 1).await;
        let (_, first) = app.approved_student().await;
        let (_, second) = app.approved_student().await;

        let (status, _) = app
            .post("/api/dashboard/classes/book", Some(&first), json!({ "class_id": class.id }))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app
            .post("/api/dashboard/classes/book", Some(&second), json!({ "class_id": class.id }))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "CLASS_FULL");
        assert_eq!(body["message"], "Class is full");
    }

    #[tokio::test]
    async fn test_booking_requires_known_class_id() {
        let app = TestApp::new().await;
        let (_, token) = app.approved_student().await;

        let (status, body) = app
            .post("/api/dashboard/classes/book", Some(&token), json!({}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Class ID is required");

        let (status, body) = app
            .post(
                "/api/dashboard/classes/book",
                Some(&token),
                json!({ "class_id": uuid::Uuid::new_v4() }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Class not found");
    }

    #[tokio::test]
    async fn test_cancelled_class_is_not_bookable() {
        let app = TestApp::new().await;
        let (_, admin_token) = app.admin().await;
        let (_, token) = app.approved_student().await;
        let class = create_class(&app.pool, 5).await;

        let (status, body) = app
            .put(
                &format!("/api/admin/schedule/{}/status", class.id),
                Some(&admin_token),
                json!({ "status": "CANCELLED" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "CANCELLED");

        let (status, body) = app
            .post("/api/dashboard/classes/book", Some(&token), json!({ "class_id": class.id }))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "CLASS_NOT_BOOKABLE");
    }

    #[tokio::test]
    async fn test_progress_endpoints() {
        let app = TestApp::new().await;
        let (_, token) = app.approved_student().await;

        let (status, body) = app
            .post(
                "/api/dashboard/progress",
                Some(&token),
                json!({ "metric": "Plank hold (s)", "value": 90.0, "notes": "Steady" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["metric"], "Plank hold (s)");

        let (status, summary) = app.get("/api/dashboard/progress", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["classes_attended"], 0);
        assert_eq!(summary["goals"][0]["metric"], "Plank hold (s)");
        assert_eq!(summary["goals"][0]["value"], 90.0);
    }
}
