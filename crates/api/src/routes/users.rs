//! User routes: CRUD and friendship management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use cinelog_core::types::DbId;
use cinelog_db::models::user::{CreateUser, UpdateUser};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/users
async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users
async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// PUT /api/v1/users -- full replace, body carries the user id.
async fn update_user(
    State(state): State<AppState>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.update(input).await?;
    Ok(Json(user))
}

/// GET /api/v1/users/{id}
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.get(id).await?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}/friends/{friend_id}
async fn add_friend(
    State(state): State<AppState>,
    Path((user_id, friend_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    state.users.add_friend(user_id, friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/{id}/friends/{friend_id}
async fn remove_friend(
    State(state): State<AppState>,
    Path((user_id, friend_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    state.users.remove_friend(user_id, friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}/friends
async fn list_friends(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let friends = state.users.friends(id).await?;
    Ok(Json(friends))
}

/// GET /api/v1/users/{id}/friends/common/{other_id}
async fn common_friends(
    State(state): State<AppState>,
    Path((user_id, other_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let friends = state.users.common_friends(user_id, other_id).await?;
    Ok(Json(friends))
}

/// User routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user).put(update_user))
        .route("/{id}", get(get_user))
        .route("/{id}/friends", get(list_friends))
        .route(
            "/{id}/friends/{friend_id}",
            put(add_friend).delete(remove_friend),
        )
        .route("/{id}/friends/common/{other_id}", get(common_friends))
}
