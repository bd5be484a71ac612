//! Storage abstraction: one trait per aggregate, two backends.
//!
//! The backend is selected at startup from [`crate::config::ServerConfig`]
//! and injected into the services as `Arc<dyn _>`. Stores own their state
//! (and, for films, the seeded reference data); cross-entity rules such as
//! existence checks before like/friend mutations live in the services.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use cinelog_core::friendship::FriendshipStatus;
use cinelog_core::types::DbId;
use cinelog_db::models::film::{CreateFilm, Film, UpdateFilm};
use cinelog_db::models::genre::Genre;
use cinelog_db::models::mpa::MpaRating;
use cinelog_db::models::user::{CreateUser, UpdateUser, User};

use crate::error::AppResult;

pub use memory::{InMemoryFilmStore, InMemoryUserStore};
pub use postgres::{PgFilmStore, PgUserStore};

/// Persistence for films, their likes, and the genre/MPA reference data.
///
/// `mpa_id` and `genre_ids` arrive pre-extracted and deduplicated by the
/// film service; the store validates them against its reference data and
/// fails not-found on unknown ids.
#[async_trait]
pub trait FilmStore: Send + Sync {
    /// Persist a new film, assigning the next id.
    async fn create(
        &self,
        input: &CreateFilm,
        mpa_id: DbId,
        genre_ids: &[DbId],
    ) -> AppResult<Film>;

    /// Fetch a film; not-found if absent.
    async fn get(&self, id: DbId) -> AppResult<Film>;

    /// All films, id ascending.
    async fn list(&self) -> AppResult<Vec<Film>>;

    /// Full-field replace; the genre set is replaced wholesale.
    /// Not-found if `input.id` does not exist.
    async fn update(
        &self,
        input: &UpdateFilm,
        mpa_id: DbId,
        genre_ids: &[DbId],
    ) -> AppResult<Film>;

    /// Whether a film with this id exists.
    async fn exists(&self, id: DbId) -> AppResult<bool>;

    /// Record a like; idempotent.
    async fn add_like(&self, film_id: DbId, user_id: DbId) -> AppResult<()>;

    /// Remove a like; returns whether the like existed.
    async fn remove_like(&self, film_id: DbId, user_id: DbId) -> AppResult<bool>;

    /// The `count` most-liked films, like count descending, id ascending
    /// on ties.
    async fn popular(&self, count: i64) -> AppResult<Vec<Film>>;

    /// All genres, id ascending.
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;

    /// A single genre; not-found if absent.
    async fn get_genre(&self, id: DbId) -> AppResult<Genre>;

    /// All MPA ratings, id ascending.
    async fn list_mpa(&self) -> AppResult<Vec<MpaRating>>;

    /// A single MPA rating; not-found if absent.
    async fn get_mpa(&self, id: DbId) -> AppResult<MpaRating>;
}

/// Persistence for users and their directed friendship edges.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user, assigning the next id.
    async fn create(&self, input: &CreateUser) -> AppResult<User>;

    /// Fetch a user; not-found if absent.
    async fn get(&self, id: DbId) -> AppResult<User>;

    /// All users, id ascending.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Full-field replace. Not-found if `input.id` does not exist.
    async fn update(&self, input: &UpdateUser) -> AppResult<User>;

    /// Whether a user with this id exists.
    async fn exists(&self, id: DbId) -> AppResult<bool>;

    /// Status of the directed edge `user_id -> friend_id`, if present.
    async fn friend_status(
        &self,
        user_id: DbId,
        friend_id: DbId,
    ) -> AppResult<Option<FriendshipStatus>>;

    /// Insert or update the directed edge `user_id -> friend_id`.
    async fn upsert_friend(
        &self,
        user_id: DbId,
        friend_id: DbId,
        status: FriendshipStatus,
    ) -> AppResult<()>;

    /// Remove the directed edge; returns whether it existed.
    async fn remove_friend(&self, user_id: DbId, friend_id: DbId) -> AppResult<bool>;

    /// Users the given user has a directed edge to, id ascending.
    async fn friends_of(&self, user_id: DbId) -> AppResult<Vec<User>>;

    /// Users present in both users' friend sets, id ascending.
    async fn common_friends(&self, user_id: DbId, other_id: DbId) -> AppResult<Vec<User>>;
}
