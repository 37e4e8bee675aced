use axum::{
    extract::State,
    routing::get,
    Router,
};

use super::extract::{Json, Path};
use crate::error::AppResult;
use crate::models::BlogPost;
use crate::state::AppState;

/// Public blog
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/:slug", get(get_post))
}

async fn list_posts(State(state): State<AppState>) -> AppResult<Json<Vec<BlogPost>>> {
    let posts = state.content.list_published_posts().await?;
    Ok(Json(posts))
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<BlogPost>> {
    let post = state.content.get_post_by_slug(&slug).await?;
    Ok(Json(post))
}
