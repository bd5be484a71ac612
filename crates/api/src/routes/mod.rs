pub mod films;
pub mod genres;
pub mod health;
pub mod mpa;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /films                                   list, create, update (PUT, body carries id)
/// /films/popular                           most-liked films (?count=N, default 10)
/// /films/{id}                              get
/// /films/{id}/like/{user_id}               like (PUT), unlike (DELETE)
///
/// /users                                   list, create, update (PUT, body carries id)
/// /users/{id}                              get
/// /users/{id}/friends                      list friends
/// /users/{id}/friends/{friend_id}          add (PUT), remove (DELETE)
/// /users/{id}/friends/common/{other_id}    common friends
///
/// /genres                                  list
/// /genres/{id}                             get
/// /mpa                                     list
/// /mpa/{id}                                get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/films", films::router())
        .nest("/users", users::router())
        .nest("/genres", genres::router())
        .nest("/mpa", mpa::router())
}
