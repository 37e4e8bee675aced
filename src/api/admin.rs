use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Extension, Router,
};
use uuid::Uuid;

use super::ai::ai_routes;
use super::extract::{Json, Path};
use crate::auth::{admin_only_middleware, jwt_auth_middleware, MessageResponse, UserSession};
use crate::error::{AppError, AppResult};
use crate::models::{
    AdminPaymentView, ApprovalRequest, ApprovalResponse, Content, ContentSummary,
    CreateClassRequest, CreateContentRequest, CreatePaymentRequest, MarkPaidRequest, Payment,
    PublishRequest, RegistrationWithUser, ReminderRequest, ReminderResponse, ScheduleEntry,
    StudentSummary, UpdateClassStatusRequest, YogaClass,
};
use crate::state::AppState;

/// Admin panel routes
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/registrations", get(list_registrations))
        .route("/students", get(list_students))
        .route("/approve", post(approve_user))
        .route("/schedule", get(list_schedule).post(create_class))
        .route("/schedule/:id/status", put(update_class_status))
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/remind", post(send_reminder))
        .route("/payments/:id/paid", post(mark_paid))
        .route("/content", get(list_content).post(create_content))
        .route("/content/:id/publish", put(set_published))
        .route("/content/:id", delete(delete_content))
        .merge(ai_routes())
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

async fn list_registrations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RegistrationWithUser>>> {
    let registrations = state.registrations.list_registrations().await?;
    Ok(Json(registrations))
}

async fn list_students(State(state): State<AppState>) -> AppResult<Json<Vec<StudentSummary>>> {
    let students = state.users.list_students().await?;
    Ok(Json(students))
}

#[tracing::instrument(skip(state, session, request), fields(admin_id = %session.user_id))]
async fn approve_user(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<ApprovalRequest>,
) -> AppResult<Json<ApprovalResponse>> {
    let (Some(user_id), Some(approved)) = (request.user_id, request.approved) else {
        return Err(AppError::validation(
            "User ID and approval status are required",
        ));
    };

    let user = state
        .registrations
        .review(user_id, approved, session.user_id)
        .await?;

    Ok(Json(ApprovalResponse {
        message: format!(
            "User {} successfully",
            if approved { "approved" } else { "rejected" }
        ),
        user: user.into(),
    }))
}

async fn list_schedule(State(state): State<AppState>) -> AppResult<Json<Vec<ScheduleEntry>>> {
    let schedule = state.classes.list_schedule().await?;
    Ok(Json(schedule))
}

#[tracing::instrument(skip(state, request))]
async fn create_class(
    State(state): State<AppState>,
    Json(request): Json<CreateClassRequest>,
) -> AppResult<(StatusCode, Json<YogaClass>)> {
    let class = state.classes.create_class(request).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

#[tracing::instrument(skip(state, request))]
async fn update_class_status(
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
    Json(request): Json<UpdateClassStatusRequest>,
) -> AppResult<Json<YogaClass>> {
    let class = state
        .classes
        .update_class_status(class_id, request.status)
        .await?;
    Ok(Json(class))
}

async fn list_payments(State(state): State<AppState>) -> AppResult<Json<Vec<AdminPaymentView>>> {
    let payments = state.payments.list_all().await?;
    Ok(Json(payments))
}

#[tracing::instrument(skip(state, request))]
async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let payment = state.payments.create_payment(request).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[tracing::instrument(skip(state, request))]
async fn mark_paid(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    request: Option<Json<MarkPaidRequest>>,
) -> AppResult<Json<Payment>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let payment = state.payments.mark_paid(payment_id, request).await?;
    Ok(Json(payment))
}

#[tracing::instrument(skip(state, request))]
async fn send_reminder(
    State(state): State<AppState>,
    Json(request): Json<ReminderRequest>,
) -> AppResult<Json<ReminderResponse>> {
    let payment_id = request
        .payment_id
        .ok_or_else(|| AppError::validation("Payment ID is required"))?;

    let response = state.payments.send_reminder(payment_id).await?;
    Ok(Json(response))
}

async fn list_content(State(state): State<AppState>) -> AppResult<Json<Vec<ContentSummary>>> {
    let items = state.content.list_all().await?;
    Ok(Json(items))
}

#[tracing::instrument(skip(state, session, request), fields(admin_id = %session.user_id))]
async fn create_content(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateContentRequest>,
) -> AppResult<(StatusCode, Json<Content>)> {
    let content = state.content.create(request, session.user_id).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

#[tracing::instrument(skip(state, request))]
async fn set_published(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
    Json(request): Json<PublishRequest>,
) -> AppResult<Json<Content>> {
    let content = state
        .content
        .set_published(content_id, request.published)
        .await?;
    Ok(Json(content))
}

#[tracing::instrument(skip(state))]
async fn delete_content(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.content.delete(content_id).await?;
    Ok(Json(MessageResponse::new("Content deleted")))
}
