use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::BookingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassType {
    Hatha,
    Yin,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl ClassStatus {
    pub fn is_bookable(&self) -> bool {
        matches!(self, ClassStatus::Scheduled)
    }
}

/// A scheduled online session with a capacity limit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct YogaClass {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub class_type: ClassType,
    pub instructor: String,
    pub date: DateTime<Utc>,
    /// Minutes
    pub duration: i64,
    pub meet_link: Option<String>,
    pub max_students: i64,
    pub status: ClassStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub class_type: ClassType,
    pub date: DateTime<Utc>,
    #[validate(range(min = 1, max = 600, message = "Duration must be between 1 and 600 minutes"))]
    pub duration: i64,
    #[validate(url(message = "Meet link must be a valid URL"))]
    pub meet_link: Option<String>,
    #[validate(range(min = 1, max = 500, message = "Max students must be between 1 and 500"))]
    pub max_students: i64,
    pub instructor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClassStatusRequest {
    pub status: ClassStatus,
}

/// Admin schedule row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub class_type: ClassType,
    pub instructor: String,
    pub date: DateTime<Utc>,
    pub duration: i64,
    pub meet_link: Option<String>,
    pub max_students: i64,
    pub status: ClassStatus,
    pub bookings_count: i64,
}

/// A class as seen by a student, including their own booking state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentClassView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub class_type: ClassType,
    pub date: DateTime<Utc>,
    pub duration: i64,
    pub meet_link: Option<String>,
    pub status: ClassStatus,
    pub spots_left: i64,
    pub booking_status: Option<BookingStatus>,
}
