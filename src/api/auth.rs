use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use super::extract::Json;
use crate::auth::{
    jwt_auth_middleware, AuthError, AuthResponse, LoginRequest, MessageResponse,
    RefreshTokenRequest, RegisterRequest, RegisterResponse, TokenResponse, UserSession,
};
use crate::error::AppResult;
use crate::models::UserResponse;
use crate::state::AppState;

/// Authentication routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout))
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware)),
        )
}

/// Register a new student account
#[tracing::instrument(skip(state, request))]
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let response = state.auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login user
#[tracing::instrument(skip(state, request))]
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}

/// Refresh access token
#[tracing::instrument(skip(state, request))]
async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let response = state.auth_service.refresh_token(request).await?;
    Ok(Json(response))
}

/// Logout user
#[tracing::instrument(skip(state, bearer))]
async fn logout(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<MessageResponse>, AuthError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AuthError::MissingAuthHeader)?;
    let response = state.auth_service.logout(bearer.token()).await?;
    Ok(Json(response))
}

/// Current user's profile
#[tracing::instrument(skip(state, session))]
async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<UserResponse>, AuthError> {
    let user = state.auth_service.current_user(&session).await?;
    Ok(Json(user.into()))
}
