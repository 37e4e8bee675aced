use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::admin::admin_routes;
use super::auth::auth_routes;
use super::blog::blog_routes;
use super::dashboard::dashboard_routes;
use super::health::health_check;
use super::registration::registration_routes;
use crate::auth::{cors_layer, security_headers_layer};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/register", registration_routes(state.clone()))
        .nest("/api/blog", blog_routes())
        .nest("/api/dashboard", dashboard_routes(state.clone()))
        .nest("/api/admin", admin_routes(state.clone()))
        .layer(security_headers_layer())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
