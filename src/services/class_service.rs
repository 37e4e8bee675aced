use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    Booking, BookingStatus, ClassStatus, CreateClassRequest, ScheduleEntry, StudentClassView,
    YogaClass,
};

const CLASS_COLUMNS: &str = "id, title, description, class_type, instructor, date, duration, \
                             meet_link, max_students, status, created_at, updated_at";

const BOOKING_COLUMNS: &str = "id, user_id, class_id, status, reminder_sent, created_at, updated_at";

/// Class schedule and seat reservations.
#[derive(Debug, Clone)]
pub struct ClassService {
    db: SqlitePool,
    default_instructor: String,
}

impl ClassService {
    pub fn new(db: SqlitePool, default_instructor: impl Into<String>) -> Self {
        Self {
            db,
            default_instructor: default_instructor.into(),
        }
    }

    pub async fn get_class(&self, class_id: Uuid) -> AppResult<Option<YogaClass>> {
        let class = sqlx::query_as::<_, YogaClass>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = ?1"
        ))
        .bind(class_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(class)
    }

    /// Every class by date, annotated with free seats and the caller's booking.
    pub async fn list_for_student(&self, user_id: Uuid) -> AppResult<Vec<StudentClassView>> {
        let classes = sqlx::query_as::<_, StudentClassView>(
            "SELECT c.id, c.title, c.description, c.class_type, c.date, c.duration, c.meet_link, c.status,
                    MAX(0, c.max_students - (
                        SELECT COUNT(*) FROM bookings b
                        WHERE b.class_id = c.id AND b.status != 'CANCELLED'
                    )) AS spots_left,
                    (SELECT b.status FROM bookings b
                     WHERE b.class_id = c.id AND b.user_id = ?1) AS booking_status
             FROM classes c
             ORDER BY c.date ASC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(classes)
    }

    /// Reserve a seat.
    ///
    /// The status check, the capacity check and the write happen in one
    /// statement, so concurrent requests cannot overfill a class. A
    /// previously cancelled booking for the same class is reactivated.
    pub async fn book(&self, user_id: Uuid, class_id: Uuid) -> AppResult<Booking> {
        if self.get_class(class_id).await?.is_none() {
            return Err(AppError::NotFound("Class"));
        }

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO bookings (id, user_id, class_id, status, reminder_sent, created_at, updated_at)
             SELECT ?1, ?2, ?3, 'CONFIRMED', 0, ?4, ?4
             WHERE (SELECT status FROM classes WHERE id = ?3) = 'SCHEDULED'
               AND (SELECT COUNT(*) FROM bookings WHERE class_id = ?3 AND status != 'CANCELLED')
                   < (SELECT max_students FROM classes WHERE id = ?3)
             ON CONFLICT (user_id, class_id) DO UPDATE
                SET status = 'CONFIRMED', updated_at = excluded.updated_at
                WHERE bookings.status = 'CANCELLED'",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(class_id)
        .bind(now)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.explain_rejected_booking(user_id, class_id).await?);
        }

        let booking = self
            .find_booking(user_id, class_id)
            .await?
            .ok_or(AppError::NotFound("Booking"))?;

        tracing::info!(user_id = %user_id, class_id = %class_id, "class booked");

        Ok(booking)
    }

    async fn explain_rejected_booking(&self, user_id: Uuid, class_id: Uuid) -> AppResult<AppError> {
        if let Some(existing) = self.find_booking(user_id, class_id).await? {
            if existing.status.occupies_seat() {
                return Ok(AppError::AlreadyBooked);
            }
        }

        match self.get_class(class_id).await? {
            None => Ok(AppError::NotFound("Class")),
            Some(class) if !class.status.is_bookable() => Ok(AppError::ClassNotBookable),
            Some(_) => Ok(AppError::ClassFull),
        }
    }

    /// Cancel the caller's confirmed booking, freeing its seat.
    pub async fn cancel_booking(&self, user_id: Uuid, class_id: Uuid) -> AppResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings SET status = ?1, updated_at = ?2
             WHERE user_id = ?3 AND class_id = ?4 AND status = ?5
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(BookingStatus::Cancelled)
        .bind(Utc::now())
        .bind(user_id)
        .bind(class_id)
        .bind(BookingStatus::Confirmed)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Booking"))?;

        tracing::info!(user_id = %user_id, class_id = %class_id, "booking cancelled");

        Ok(booking)
    }

    async fn find_booking(&self, user_id: Uuid, class_id: Uuid) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = ?1 AND class_id = ?2"
        ))
        .bind(user_id)
        .bind(class_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(booking)
    }

    /// Admin schedule, latest first, with seat usage.
    pub async fn list_schedule(&self) -> AppResult<Vec<ScheduleEntry>> {
        let entries = sqlx::query_as::<_, ScheduleEntry>(
            "SELECT c.id, c.title, c.description, c.class_type, c.instructor, c.date, c.duration,
                    c.meet_link, c.max_students, c.status,
                    (SELECT COUNT(*) FROM bookings b
                     WHERE b.class_id = c.id AND b.status != 'CANCELLED') AS bookings_count
             FROM classes c
             ORDER BY c.date DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    pub async fn create_class(&self, request: CreateClassRequest) -> AppResult<YogaClass> {
        request.validate()?;

        let instructor = request
            .instructor
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .unwrap_or(&self.default_instructor)
            .to_string();
        let now = Utc::now();

        let class = sqlx::query_as::<_, YogaClass>(&format!(
            "INSERT INTO classes
                (id, title, description, class_type, instructor, date, duration, meet_link,
                 max_students, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(request.class_type)
        .bind(&instructor)
        .bind(request.date)
        .bind(request.duration)
        .bind(&request.meet_link)
        .bind(request.max_students)
        .bind(ClassStatus::Scheduled)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(class_id = %class.id, title = %class.title, "class scheduled");

        Ok(class)
    }

    pub async fn update_class_status(
        &self,
        class_id: Uuid,
        status: ClassStatus,
    ) -> AppResult<YogaClass> {
        sqlx::query_as::<_, YogaClass>(&format!(
            "UPDATE classes SET status = ?1, updated_at = ?2 WHERE id = ?3
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(status)
        .bind(Utc::now())
        .bind(class_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Class"))
    }
}
