use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    AdminPaymentRow, AdminPaymentView, CreatePaymentRequest, MarkPaidRequest, Payment,
    PaymentStatus, ReminderResponse,
};
use crate::services::{PaymentReminder, ReminderService, UserService};

const PAYMENT_COLUMNS: &str = "id, user_id, amount, currency, status, method, transaction_id, \
                               description, due_date, paid_at, last_reminded_at, created_at, updated_at";

const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, FromRow)]
struct ReminderTarget {
    amount: f64,
    currency: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    user_name: Option<String>,
    user_email: String,
}

#[derive(Debug, Clone)]
pub struct PaymentService {
    db: SqlitePool,
    users: UserService,
    reminders: ReminderService,
}

impl PaymentService {
    pub fn new(db: SqlitePool, reminders: ReminderService) -> Self {
        Self {
            users: UserService::new(db.clone()),
            db,
            reminders,
        }
    }

    /// The caller's payments, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE user_id = ?1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(payments)
    }

    pub async fn list_all(&self) -> AppResult<Vec<AdminPaymentView>> {
        let rows = sqlx::query_as::<_, AdminPaymentRow>(
            "SELECT p.id, u.name AS user_name, u.email AS user_email, p.amount, p.currency,
                    p.status, p.description, p.due_date, p.last_reminded_at, p.created_at
             FROM payments p
             JOIN users u ON u.id = p.user_id
             ORDER BY p.created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(AdminPaymentView::from).collect())
    }

    pub async fn create_payment(&self, request: CreatePaymentRequest) -> AppResult<Payment> {
        request.validate()?;

        if self.users.get_user_by_id(request.user_id).await?.is_none() {
            return Err(AppError::NotFound("User"));
        }

        let currency = request
            .currency
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let now = Utc::now();

        let payment = sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payments
                (id, user_id, amount, currency, status, description, due_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(request.amount)
        .bind(&currency)
        .bind(PaymentStatus::Pending)
        .bind(&request.description)
        .bind(request.due_date)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(payment_id = %payment.id, user_id = %payment.user_id, "payment created");

        Ok(payment)
    }

    pub async fn mark_paid(&self, payment_id: Uuid, request: MarkPaidRequest) -> AppResult<Payment> {
        let now = Utc::now();

        let payment = sqlx::query_as::<_, Payment>(&format!(
            "UPDATE payments
             SET status = ?1, paid_at = ?2, updated_at = ?2,
                 method = COALESCE(?3, method),
                 transaction_id = COALESCE(?4, transaction_id)
             WHERE id = ?5
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(PaymentStatus::Paid)
        .bind(now)
        .bind(&request.method)
        .bind(&request.transaction_id)
        .bind(payment_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Payment"))?;

        tracing::info!(payment_id = %payment_id, "payment marked paid");

        Ok(payment)
    }

    /// Email the payer about an outstanding payment and record when.
    pub async fn send_reminder(&self, payment_id: Uuid) -> AppResult<ReminderResponse> {
        let target = sqlx::query_as::<_, ReminderTarget>(
            "SELECT p.amount, p.currency, p.description, p.due_date,
                    u.name AS user_name, u.email AS user_email
             FROM payments p
             JOIN users u ON u.id = p.user_id
             WHERE p.id = ?1",
        )
        .bind(payment_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Payment"))?;

        let reminder = PaymentReminder {
            recipient_name: target.user_name,
            recipient_email: target.user_email,
            amount: target.amount,
            currency: target.currency,
            description: target.description,
            due_date: target.due_date,
        };

        self.reminders
            .send_payment_reminder(&reminder)
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        sqlx::query("UPDATE payments SET last_reminded_at = ?1 WHERE id = ?2")
            .bind(Utc::now())
            .bind(payment_id)
            .execute(&self.db)
            .await?;

        Ok(ReminderResponse {
            message: "Reminder sent successfully".to_string(),
            email: reminder.recipient_email,
        })
    }
}
