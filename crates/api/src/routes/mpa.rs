//! MPA rating reference routes (read-only).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use cinelog_core::types::DbId;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/mpa
async fn list_mpa(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ratings = state.films.list_mpa().await?;
    Ok(Json(ratings))
}

/// GET /api/v1/mpa/{id}
async fn get_mpa(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rating = state.films.get_mpa(id).await?;
    Ok(Json(rating))
}

/// MPA rating routes mounted at `/mpa`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_mpa))
        .route("/{id}", get(get_mpa))
}
