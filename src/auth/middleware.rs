use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::auth::{extract_bearer_token, AuthError, UserSession};
use crate::state::AppState;

/// JWT authentication middleware
///
/// Validates the bearer token, rejects revoked tokens and attaches a
/// [`UserSession`] built from the user's current row.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = extract_bearer_token(auth_header)?;
    let session = state.auth_service.validate_session(token).await?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Admin-only middleware
pub async fn admin_only_middleware(request: Request, next: Next) -> Result<Response, AuthError> {
    let session = extract_user_session(&request)?;

    if !session.is_admin() {
        tracing::warn!(user_id = %session.user_id, "non-admin reached admin route");
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}

/// Dashboard gate: the account must have been approved.
pub async fn approved_only_middleware(
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let session = extract_user_session(&request)?;

    if !session.is_approved() {
        return Err(AuthError::AccountNotApproved);
    }

    Ok(next.run(request).await)
}

pub fn extract_user_session(request: &Request) -> Result<&UserSession, AuthError> {
    request
        .extensions()
        .get::<UserSession>()
        .ok_or(AuthError::MissingAuthHeader)
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn security_headers_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    )
}
