//! PostgreSQL storage backend.
//!
//! Thin adapters over the repositories in `cinelog-db`: they validate
//! reference ids, assemble rows into API-facing entities, and map row
//! absence to not-found errors.

use async_trait::async_trait;
use cinelog_core::error::CoreError;
use cinelog_core::friendship::FriendshipStatus;
use cinelog_core::types::DbId;
use cinelog_db::models::film::{CreateFilm, Film, FilmRow, UpdateFilm};
use cinelog_db::models::genre::Genre;
use cinelog_db::models::mpa::MpaRating;
use cinelog_db::models::user::{CreateUser, FriendLink, UpdateUser, User, UserRow};
use cinelog_db::repositories::{FilmRepo, GenreRepo, MpaRepo, UserRepo};
use cinelog_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::storage::{FilmStore, UserStore};

/// Postgres-backed [`FilmStore`].
pub struct PgFilmStore {
    pool: DbPool,
}

impl PgFilmStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Validate the MPA id and every genre id against the reference tables;
    /// not-found on the first unknown id.
    async fn check_references(&self, mpa_id: DbId, genre_ids: &[DbId]) -> AppResult<()> {
        if !MpaRepo::exists(&self.pool, mpa_id).await? {
            return Err(CoreError::NotFound {
                entity: "MpaRating",
                id: mpa_id,
            }
            .into());
        }
        if genre_ids.is_empty() {
            return Ok(());
        }
        let found = GenreRepo::count_existing(&self.pool, genre_ids).await?;
        if found != genre_ids.len() as i64 {
            let known: Vec<DbId> = GenreRepo::list(&self.pool)
                .await?
                .into_iter()
                .map(|g| g.id)
                .collect();
            let missing = genre_ids
                .iter()
                .find(|id| !known.contains(id))
                .copied()
                .unwrap_or_default();
            return Err(CoreError::NotFound {
                entity: "Genre",
                id: missing,
            }
            .into());
        }
        Ok(())
    }

    /// Load a row's genre set and like set and assemble the film.
    async fn assemble(&self, row: FilmRow) -> AppResult<Film> {
        let genres = FilmRepo::genres_of(&self.pool, row.id).await?;
        let likes = FilmRepo::likes_of(&self.pool, row.id).await?;
        Ok(row.into_film(genres, likes))
    }

    /// Re-read a film that is known to exist (e.g. just written).
    async fn fetch_existing(&self, id: DbId) -> AppResult<Film> {
        let row = FilmRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("film {id} vanished after write")))?;
        self.assemble(row).await
    }
}

#[async_trait]
impl FilmStore for PgFilmStore {
    async fn create(
        &self,
        input: &CreateFilm,
        mpa_id: DbId,
        genre_ids: &[DbId],
    ) -> AppResult<Film> {
        self.check_references(mpa_id, genre_ids).await?;
        let id = FilmRepo::create(&self.pool, input, mpa_id, genre_ids).await?;
        self.fetch_existing(id).await
    }

    async fn get(&self, id: DbId) -> AppResult<Film> {
        let row = FilmRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Film",
                id,
            })?;
        self.assemble(row).await
    }

    async fn list(&self) -> AppResult<Vec<Film>> {
        let rows = FilmRepo::list(&self.pool).await?;
        let mut films = Vec::with_capacity(rows.len());
        for row in rows {
            films.push(self.assemble(row).await?);
        }
        Ok(films)
    }

    async fn update(
        &self,
        input: &UpdateFilm,
        mpa_id: DbId,
        genre_ids: &[DbId],
    ) -> AppResult<Film> {
        self.check_references(mpa_id, genre_ids).await?;
        let updated = FilmRepo::update(&self.pool, input, mpa_id, genre_ids).await?;
        if !updated {
            return Err(CoreError::NotFound {
                entity: "Film",
                id: input.id,
            }
            .into());
        }
        self.fetch_existing(input.id).await
    }

    async fn exists(&self, id: DbId) -> AppResult<bool> {
        Ok(FilmRepo::exists(&self.pool, id).await?)
    }

    async fn add_like(&self, film_id: DbId, user_id: DbId) -> AppResult<()> {
        Ok(FilmRepo::add_like(&self.pool, film_id, user_id).await?)
    }

    async fn remove_like(&self, film_id: DbId, user_id: DbId) -> AppResult<bool> {
        Ok(FilmRepo::remove_like(&self.pool, film_id, user_id).await?)
    }

    async fn popular(&self, count: i64) -> AppResult<Vec<Film>> {
        let rows = FilmRepo::popular(&self.pool, count).await?;
        let mut films = Vec::with_capacity(rows.len());
        for row in rows {
            films.push(self.assemble(row).await?);
        }
        Ok(films)
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(GenreRepo::list(&self.pool).await?)
    }

    async fn get_genre(&self, id: DbId) -> AppResult<Genre> {
        GenreRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "Genre", id }.into())
    }

    async fn list_mpa(&self) -> AppResult<Vec<MpaRating>> {
        Ok(MpaRepo::list(&self.pool).await?)
    }

    async fn get_mpa(&self, id: DbId) -> AppResult<MpaRating> {
        MpaRepo::find_by_id(&self.pool, id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "MpaRating",
                id,
            }
            .into()
        })
    }
}

/// Postgres-backed [`UserStore`].
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Load a row's friendship edges and assemble the user.
    async fn assemble(&self, row: UserRow) -> AppResult<User> {
        let links = UserRepo::links_of(&self.pool, row.id).await?;
        let mut friends = Vec::with_capacity(links.len());
        for (friend_id, status) in links {
            friends.push(FriendLink {
                id: friend_id,
                status: status.parse::<FriendshipStatus>()?,
            });
        }
        Ok(row.into_user(friends))
    }

    async fn assemble_all(&self, rows: Vec<UserRow>) -> AppResult<Vec<User>> {
        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(self.assemble(row).await?);
        }
        Ok(users)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, input: &CreateUser) -> AppResult<User> {
        let row = UserRepo::create(&self.pool, input).await?;
        self.assemble(row).await
    }

    async fn get(&self, id: DbId) -> AppResult<User> {
        let row = UserRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id,
            })?;
        self.assemble(row).await
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let rows = UserRepo::list(&self.pool).await?;
        self.assemble_all(rows).await
    }

    async fn update(&self, input: &UpdateUser) -> AppResult<User> {
        let row = UserRepo::update(&self.pool, input)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: input.id,
            })?;
        self.assemble(row).await
    }

    async fn exists(&self, id: DbId) -> AppResult<bool> {
        Ok(UserRepo::exists(&self.pool, id).await?)
    }

    async fn friend_status(
        &self,
        user_id: DbId,
        friend_id: DbId,
    ) -> AppResult<Option<FriendshipStatus>> {
        match UserRepo::friend_status(&self.pool, user_id, friend_id).await? {
            Some(status) => Ok(Some(status.parse::<FriendshipStatus>()?)),
            None => Ok(None),
        }
    }

    async fn upsert_friend(
        &self,
        user_id: DbId,
        friend_id: DbId,
        status: FriendshipStatus,
    ) -> AppResult<()> {
        Ok(UserRepo::upsert_friend(&self.pool, user_id, friend_id, status.as_str()).await?)
    }

    async fn remove_friend(&self, user_id: DbId, friend_id: DbId) -> AppResult<bool> {
        Ok(UserRepo::remove_friend(&self.pool, user_id, friend_id).await?)
    }

    async fn friends_of(&self, user_id: DbId) -> AppResult<Vec<User>> {
        let rows = UserRepo::friends_of(&self.pool, user_id).await?;
        self.assemble_all(rows).await
    }

    async fn common_friends(&self, user_id: DbId, other_id: DbId) -> AppResult<Vec<User>> {
        let rows = UserRepo::common_friends(&self.pool, user_id, other_id).await?;
        self.assemble_all(rows).await
    }
}
