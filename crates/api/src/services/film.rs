//! Film service: validation, like management, popularity.

use std::collections::BTreeSet;
use std::sync::Arc;

use cinelog_core::error::CoreError;
use cinelog_core::film::validate_film;
use cinelog_core::types::DbId;
use cinelog_db::models::film::{CreateFilm, Film, UpdateFilm};
use cinelog_db::models::genre::{Genre, GenreRef};
use cinelog_db::models::mpa::{MpaRating, MpaRef};

use crate::error::AppResult;
use crate::storage::{FilmStore, UserStore};

/// Orchestrates film CRUD, likes, and the reference-data reads.
///
/// Holds the user store as well: like mutations verify the user exists
/// before touching film state.
#[derive(Clone)]
pub struct FilmService {
    films: Arc<dyn FilmStore>,
    users: Arc<dyn UserStore>,
}

impl FilmService {
    pub fn new(films: Arc<dyn FilmStore>, users: Arc<dyn UserStore>) -> Self {
        Self { films, users }
    }

    pub async fn create(&self, input: CreateFilm) -> AppResult<Film> {
        validate_film(
            &input.name,
            input.description.as_deref(),
            input.release_date,
            input.duration,
        )?;
        let mpa_id = required_mpa(input.mpa.as_ref())?;
        let genre_ids = dedup_genre_ids(&input.genres);

        let film = self.films.create(&input, mpa_id, &genre_ids).await?;
        tracing::info!(film_id = film.id, name = %film.name, "Film created");
        Ok(film)
    }

    pub async fn update(&self, input: UpdateFilm) -> AppResult<Film> {
        validate_film(
            &input.name,
            input.description.as_deref(),
            input.release_date,
            input.duration,
        )?;
        let mpa_id = required_mpa(input.mpa.as_ref())?;
        let genre_ids = dedup_genre_ids(&input.genres);

        let film = self.films.update(&input, mpa_id, &genre_ids).await?;
        tracing::info!(film_id = film.id, "Film updated");
        Ok(film)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Film> {
        self.films.get(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<Film>> {
        self.films.list().await
    }

    /// Record a like; idempotent. Both film and user must exist.
    pub async fn add_like(&self, film_id: DbId, user_id: DbId) -> AppResult<()> {
        self.ensure_film(film_id).await?;
        self.ensure_user(user_id).await?;
        self.films.add_like(film_id, user_id).await?;
        tracing::info!(film_id, user_id, "Like added");
        Ok(())
    }

    /// Remove a like; not-found if it was never recorded.
    pub async fn remove_like(&self, film_id: DbId, user_id: DbId) -> AppResult<()> {
        self.ensure_film(film_id).await?;
        self.ensure_user(user_id).await?;
        let removed = self.films.remove_like(film_id, user_id).await?;
        if !removed {
            tracing::warn!(film_id, user_id, "Like not found");
            return Err(CoreError::NotFound {
                entity: "Like",
                id: film_id,
            }
            .into());
        }
        tracing::info!(film_id, user_id, "Like removed");
        Ok(())
    }

    /// The `count` most-liked films.
    pub async fn popular(&self, count: i64) -> AppResult<Vec<Film>> {
        self.films.popular(count).await
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.films.list_genres().await
    }

    pub async fn get_genre(&self, id: DbId) -> AppResult<Genre> {
        self.films.get_genre(id).await
    }

    pub async fn list_mpa(&self) -> AppResult<Vec<MpaRating>> {
        self.films.list_mpa().await
    }

    pub async fn get_mpa(&self, id: DbId) -> AppResult<MpaRating> {
        self.films.get_mpa(id).await
    }

    async fn ensure_film(&self, id: DbId) -> AppResult<()> {
        if !self.films.exists(id).await? {
            return Err(CoreError::NotFound {
                entity: "Film",
                id,
            }
            .into());
        }
        Ok(())
    }

    async fn ensure_user(&self, id: DbId) -> AppResult<()> {
        if !self.users.exists(id).await? {
            return Err(CoreError::NotFound {
                entity: "User",
                id,
            }
            .into());
        }
        Ok(())
    }
}

/// The MPA rating is mandatory but optional at the serde level, so its
/// absence is a validation error rather than a deserialization rejection.
fn required_mpa(mpa: Option<&MpaRef>) -> Result<DbId, CoreError> {
    mpa.map(|m| m.id)
        .ok_or_else(|| CoreError::Validation("MPA rating is required".to_string()))
}

/// Collapse the genre reference list to unique ids, ascending.
fn dedup_genre_ids(genres: &[GenreRef]) -> Vec<DbId> {
    genres
        .iter()
        .map(|g| g.id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
