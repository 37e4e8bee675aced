use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use samyoga::models::*;
use samyoga::services::{PaymentService, ReminderService};
use samyoga::AppError;
use uuid::Uuid;

use crate::common::{create_user, test_pool};

#[cfg(test)]
mod payment_service_tests {
    use super::*;

    fn service(pool: &sqlx::SqlitePool) -> PaymentService {
        PaymentService::new(pool.clone(), ReminderService::log_only())
    }

    fn request(user_id: Uuid, amount: f64) -> CreatePaymentRequest {
        CreatePaymentRequest {
            user_id,
            amount,
            currency: None,
            description: Some("Monthly membership".to_string()),
            due_date: Some(Utc::now() + Duration::days(7)),
        }
    }

    #[tokio::test]
    async fn test_create_payment_defaults_to_pending_inr() {
        let pool = test_pool().await;
        let student = create_user(&pool, UserRole::Student, UserStatus::Approved).await;

        let payment = service(&pool)
            .create_payment(request(student.id, 2500.0))
            .await
            .unwrap();

        assert_eq!(payment.currency, "INR");
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.paid_at.is_none());
    }

    #[tokio::test]
    async fn test_create_payment_validation() {
        let pool = test_pool().await;
        let student = create_user(&pool, UserRole::Student, UserStatus::Approved).await;
        let payments = service(&pool);

        assert_matches!(
            payments.create_payment(request(student.id, 0.0)).await,
            Err(AppError::Validation(_))
        );
        assert_matches!(
            payments.create_payment(request(Uuid::new_v4(), 100.0)).await,
            Err(AppError::NotFound("User"))
        );
    }

    #[tokio::test]
    async fn test_mark_paid() {
        let pool = test_pool().await;
        let student = create_user(&pool, UserRole::Student, UserStatus::Approved).await;
        let payments = service(&pool);
        let payment = payments.create_payment(request(student.id, 1200.0)).await.unwrap();

        let paid = payments
            .mark_paid(
                payment.id,
                MarkPaidRequest {
                    method: Some("UPI".to_string()),
                    transaction_id: Some("TXN-42".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(paid.status, PaymentStatus::Paid);
        assert!(paid.paid_at.is_some());
        assert_eq!(paid.method.as_deref(), Some("UPI"));

        assert_matches!(
            payments.mark_paid(Uuid::new_v4(), MarkPaidRequest::default()).await,
            Err(AppError::NotFound("Payment"))
        );
    }

    #[tokio::test]
    async fn test_reminder_records_timestamp() {
        let pool = test_pool().await;
        let student = create_user(&pool, UserRole::Student, UserStatus::Approved).await;
        let payments = service(&pool);
        let payment = payments.create_payment(request(student.id, 900.0)).await.unwrap();

        let response = payments.send_reminder(payment.id).await.unwrap();
        assert_eq!(response.message, "Reminder sent successfully");
        assert_eq!(response.email, student.email);

        let listed = payments.list_for_user(student.id).await.unwrap();
        assert!(listed[0].last_reminded_at.is_some());

        assert_matches!(
            payments.send_reminder(Uuid::new_v4()).await,
            Err(AppError::NotFound("Payment"))
        );
    }

    #[tokio::test]
    async fn test_admin_listing_includes_payer() {
        let pool = test_pool().await;
        let student = create_user(&pool, UserRole::Student, UserStatus::Approved).await;
        let payments = service(&pool);
        payments.create_payment(request(student.id, 700.0)).await.unwrap();

        let all = payments.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].user.email, student.email);
        assert_eq!(all[0].user.name, student.name);
    }
}
