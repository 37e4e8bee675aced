use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Router,
};
use uuid::Uuid;

use super::extract::{Json, Path};
use crate::auth::{approved_only_middleware, jwt_auth_middleware, MessageResponse, UserSession};
use crate::error::{AppError, AppResult};
use crate::models::{
    BookClassRequest, BookingResponse, Content, Payment, Progress, ProgressSummary,
    RecordProgressRequest, StudentClassView,
};
use crate::state::AppState;

/// Student dashboard. Every route requires an approved account.
pub fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_classes))
        .route("/classes/book", post(book_class))
        .route("/classes/:id/cancel", post(cancel_booking))
        .route("/payments", get(list_payments))
        .route("/progress", get(progress_summary).post(record_progress))
        .route("/resources", get(list_resources))
        .route_layer(middleware::from_fn(approved_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

#[tracing::instrument(skip(state, session), fields(user_id = %session.user_id))]
async fn list_classes(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<Vec<StudentClassView>>> {
    let classes = state.classes.list_for_student(session.user_id).await?;
    Ok(Json(classes))
}

#[tracing::instrument(skip(state, session, request), fields(user_id = %session.user_id))]
async fn book_class(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<BookClassRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let class_id = request
        .class_id
        .ok_or_else(|| AppError::validation("Class ID is required"))?;

    let booking = state.classes.book(session.user_id, class_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Class booked successfully".to_string(),
            booking,
        }),
    ))
}

#[tracing::instrument(skip(state, session), fields(user_id = %session.user_id))]
async fn cancel_booking(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(class_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.classes.cancel_booking(session.user_id, class_id).await?;
    Ok(Json(MessageResponse::new("Booking cancelled")))
}

async fn list_payments(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<Vec<Payment>>> {
    let payments = state.payments.list_for_user(session.user_id).await?;
    Ok(Json(payments))
}

async fn progress_summary(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> AppResult<Json<ProgressSummary>> {
    let summary = state.progress.summary(session.user_id).await?;
    Ok(Json(summary))
}

#[tracing::instrument(skip(state, session, request), fields(user_id = %session.user_id))]
async fn record_progress(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<RecordProgressRequest>,
) -> AppResult<(StatusCode, Json<Progress>)> {
    let progress = state.progress.record(session.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(progress)))
}

async fn list_resources(State(state): State<AppState>) -> AppResult<Json<Vec<Content>>> {
    let resources = state.content.list_resources().await?;
    Ok(Json(resources))
}
