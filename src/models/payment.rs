use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub method: Option<String>,
    pub transaction_id: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub last_reminded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub user_id: Uuid,
    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkPaidRequest {
    pub method: Option<String>,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReminderRequest {
    pub payment_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentUser {
    pub name: Option<String>,
    pub email: String,
}

/// Payment row for the admin ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPaymentView {
    pub id: Uuid,
    pub user: PaymentUser,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub last_reminded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub(crate) struct AdminPaymentRow {
    pub id: Uuid,
    pub user_name: Option<String>,
    pub user_email: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub last_reminded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<AdminPaymentRow> for AdminPaymentView {
    fn from(row: AdminPaymentRow) -> Self {
        Self {
            id: row.id,
            user: PaymentUser {
                name: row.user_name,
                email: row.user_email,
            },
            amount: row.amount,
            currency: row.currency,
            status: row.status,
            description: row.description,
            due_date: row.due_date,
            last_reminded_at: row.last_reminded_at,
            created_at: row.created_at,
        }
    }
}
