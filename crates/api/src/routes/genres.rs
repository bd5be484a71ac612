//! Genre reference routes (read-only).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use cinelog_core::types::DbId;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/genres
async fn list_genres(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let genres = state.films.list_genres().await?;
    Ok(Json(genres))
}

/// GET /api/v1/genres/{id}
async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let genre = state.films.get_genre(id).await?;
    Ok(Json(genre))
}

/// Genre routes mounted at `/genres`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_genres))
        .route("/{id}", get(get_genre))
}
