//! Film routes: CRUD, likes, and the popularity query.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use cinelog_core::types::DbId;
use cinelog_db::models::film::{CreateFilm, UpdateFilm};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for `GET /films/popular`.
#[derive(Debug, Deserialize)]
struct PopularParams {
    count: Option<i64>,
}

/// POST /api/v1/films
async fn create_film(
    State(state): State<AppState>,
    Json(input): Json<CreateFilm>,
) -> AppResult<impl IntoResponse> {
    let film = state.films.create(input).await?;
    Ok((StatusCode::CREATED, Json(film)))
}

/// GET /api/v1/films
async fn list_films(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let films = state.films.list().await?;
    Ok(Json(films))
}

/// PUT /api/v1/films -- full replace, body carries the film id.
async fn update_film(
    State(state): State<AppState>,
    Json(input): Json<UpdateFilm>,
) -> AppResult<impl IntoResponse> {
    let film = state.films.update(input).await?;
    Ok(Json(film))
}

/// GET /api/v1/films/{id}
async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let film = state.films.get(id).await?;
    Ok(Json(film))
}

/// GET /api/v1/films/popular?count=N
async fn popular_films(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> AppResult<impl IntoResponse> {
    let count = params.count.unwrap_or(10);
    if count < 1 {
        return Err(AppError::BadRequest(
            "count must be a positive integer".to_string(),
        ));
    }
    let films = state.films.popular(count).await?;
    Ok(Json(films))
}

/// PUT /api/v1/films/{id}/like/{user_id}
async fn add_like(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    state.films.add_like(film_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/films/{id}/like/{user_id}
async fn remove_like(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    state.films.remove_like(film_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Film routes mounted at `/films`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_films).post(create_film).put(update_film))
        .route("/popular", get(popular_films))
        .route("/{id}", get(get_film))
        .route("/{id}/like/{user_id}", put(add_like).delete(remove_like))
}
