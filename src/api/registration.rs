use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::post,
    Extension, Router,
};
use serde::Serialize;

use super::extract::Json;
use crate::auth::{jwt_auth_middleware, UserSession};
use crate::error::AppResult;
use crate::models::{QuestionnaireRequest, Registration};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionnaireResponse {
    pub message: String,
    pub registration: Registration,
}

/// Onboarding questionnaire. Open to any signed-in account, approved or not.
pub fn registration_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/questionnaire", post(submit_questionnaire))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

#[tracing::instrument(skip(state, session, answers), fields(user_id = %session.user_id))]
async fn submit_questionnaire(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(answers): Json<QuestionnaireRequest>,
) -> AppResult<(StatusCode, Json<QuestionnaireResponse>)> {
    let registration = state
        .registrations
        .submit_questionnaire(session.user_id, answers)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(QuestionnaireResponse {
            message: "Questionnaire submitted successfully".to_string(),
            registration,
        }),
    ))
}
