//! In-memory storage backend.
//!
//! Each store owns a `RwLock`-guarded table with its own id counter, so no
//! global mutable state exists and tests can build isolated instances.
//! Reference data (genres, MPA ratings) is seeded at construction with the
//! same rows the database migrations seed.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use cinelog_core::error::CoreError;
use cinelog_core::friendship::FriendshipStatus;
use cinelog_core::types::{Date, DbId};
use cinelog_db::models::film::{CreateFilm, Film, UpdateFilm};
use cinelog_db::models::genre::Genre;
use cinelog_db::models::mpa::MpaRating;
use cinelog_db::models::user::{CreateUser, FriendLink, UpdateUser, User};
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::storage::{FilmStore, UserStore};

/// Genre rows matching the database seed migration.
fn seeded_genres() -> Vec<Genre> {
    ["Comedy", "Drama", "Cartoon", "Thriller", "Documentary", "Action"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Genre {
            id,
            name: name.to_string(),
        })
        .collect()
}

/// MPA rating rows matching the database seed migration.
fn seeded_mpa() -> Vec<MpaRating> {
    ["G", "PG", "PG-13", "R", "NC-17"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| MpaRating {
            id,
            name: name.to_string(),
        })
        .collect()
}

/* --------------------------------------------------------------------------
Films
-------------------------------------------------------------------------- */

/// Stored film record; references kept as ids, resolved on read.
#[derive(Debug, Clone)]
struct FilmRecord {
    name: String,
    description: Option<String>,
    release_date: Date,
    duration: i32,
    mpa_id: DbId,
    genre_ids: BTreeSet<DbId>,
    likes: BTreeSet<DbId>,
}

#[derive(Debug, Default)]
struct FilmTable {
    films: BTreeMap<DbId, FilmRecord>,
    last_id: DbId,
}

/// In-memory [`FilmStore`].
pub struct InMemoryFilmStore {
    genres: Vec<Genre>,
    mpa: Vec<MpaRating>,
    inner: RwLock<FilmTable>,
}

impl InMemoryFilmStore {
    pub fn new() -> Self {
        Self {
            genres: seeded_genres(),
            mpa: seeded_mpa(),
            inner: RwLock::new(FilmTable::default()),
        }
    }

    /// Validate the MPA id and every genre id against the seeded reference
    /// data; not-found on the first unknown id.
    fn check_references(&self, mpa_id: DbId, genre_ids: &[DbId]) -> AppResult<()> {
        if !self.mpa.iter().any(|m| m.id == mpa_id) {
            return Err(CoreError::NotFound {
                entity: "MpaRating",
                id: mpa_id,
            }
            .into());
        }
        for &genre_id in genre_ids {
            if !self.genres.iter().any(|g| g.id == genre_id) {
                return Err(CoreError::NotFound {
                    entity: "Genre",
                    id: genre_id,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Resolve a record's reference ids into the API-facing film.
    fn assemble(&self, id: DbId, record: &FilmRecord) -> Film {
        let mpa = self
            .mpa
            .iter()
            .find(|m| m.id == record.mpa_id)
            .cloned()
            .unwrap_or(MpaRating {
                id: record.mpa_id,
                name: String::new(),
            });
        let genres = self
            .genres
            .iter()
            .filter(|g| record.genre_ids.contains(&g.id))
            .cloned()
            .collect();
        Film {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            release_date: record.release_date,
            duration: record.duration,
            mpa,
            genres,
            likes: record.likes.iter().copied().collect(),
        }
    }
}

impl Default for InMemoryFilmStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilmStore for InMemoryFilmStore {
    async fn create(
        &self,
        input: &CreateFilm,
        mpa_id: DbId,
        genre_ids: &[DbId],
    ) -> AppResult<Film> {
        self.check_references(mpa_id, genre_ids)?;

        let mut table = self.inner.write().await;
        table.last_id += 1;
        let id = table.last_id;
        let record = FilmRecord {
            name: input.name.clone(),
            description: input.description.clone(),
            release_date: input.release_date,
            duration: input.duration,
            mpa_id,
            genre_ids: genre_ids.iter().copied().collect(),
            likes: BTreeSet::new(),
        };
        let film = self.assemble(id, &record);
        table.films.insert(id, record);
        Ok(film)
    }

    async fn get(&self, id: DbId) -> AppResult<Film> {
        let table = self.inner.read().await;
        let record = table.films.get(&id).ok_or(CoreError::NotFound {
            entity: "Film",
            id,
        })?;
        Ok(self.assemble(id, record))
    }

    async fn list(&self) -> AppResult<Vec<Film>> {
        let table = self.inner.read().await;
        Ok(table
            .films
            .iter()
            .map(|(&id, record)| self.assemble(id, record))
            .collect())
    }

    async fn update(
        &self,
        input: &UpdateFilm,
        mpa_id: DbId,
        genre_ids: &[DbId],
    ) -> AppResult<Film> {
        self.check_references(mpa_id, genre_ids)?;

        let mut table = self.inner.write().await;
        let record = table.films.get_mut(&input.id).ok_or(CoreError::NotFound {
            entity: "Film",
            id: input.id,
        })?;
        record.name = input.name.clone();
        record.description = input.description.clone();
        record.release_date = input.release_date;
        record.duration = input.duration;
        record.mpa_id = mpa_id;
        record.genre_ids = genre_ids.iter().copied().collect();
        let film = self.assemble(input.id, record);
        Ok(film)
    }

    async fn exists(&self, id: DbId) -> AppResult<bool> {
        Ok(self.inner.read().await.films.contains_key(&id))
    }

    async fn add_like(&self, film_id: DbId, user_id: DbId) -> AppResult<()> {
        let mut table = self.inner.write().await;
        let record = table.films.get_mut(&film_id).ok_or(CoreError::NotFound {
            entity: "Film",
            id: film_id,
        })?;
        record.likes.insert(user_id);
        Ok(())
    }

    async fn remove_like(&self, film_id: DbId, user_id: DbId) -> AppResult<bool> {
        let mut table = self.inner.write().await;
        let record = table.films.get_mut(&film_id).ok_or(CoreError::NotFound {
            entity: "Film",
            id: film_id,
        })?;
        Ok(record.likes.remove(&user_id))
    }

    async fn popular(&self, count: i64) -> AppResult<Vec<Film>> {
        let table = self.inner.read().await;
        let mut ranked: Vec<(&DbId, &FilmRecord)> = table.films.iter().collect();
        ranked.sort_by(|(a_id, a), (b_id, b)| {
            b.likes.len().cmp(&a.likes.len()).then(a_id.cmp(b_id))
        });
        Ok(ranked
            .into_iter()
            .take(count.max(0) as usize)
            .map(|(&id, record)| self.assemble(id, record))
            .collect())
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(self.genres.clone())
    }

    async fn get_genre(&self, id: DbId) -> AppResult<Genre> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound { entity: "Genre", id }.into())
    }

    async fn list_mpa(&self) -> AppResult<Vec<MpaRating>> {
        Ok(self.mpa.clone())
    }

    async fn get_mpa(&self, id: DbId) -> AppResult<MpaRating> {
        self.mpa
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "MpaRating",
                    id,
                }
                .into()
            })
    }
}

/* --------------------------------------------------------------------------
Users
-------------------------------------------------------------------------- */

/// Stored user record; `name` kept as entered, fallback applied on read.
#[derive(Debug, Clone)]
struct UserRecord {
    login: String,
    email: String,
    name: Option<String>,
    birthday: Date,
    friends: BTreeMap<DbId, FriendshipStatus>,
}

#[derive(Debug, Default)]
struct UserTable {
    users: BTreeMap<DbId, UserRecord>,
    last_id: DbId,
}

/// In-memory [`UserStore`].
pub struct InMemoryUserStore {
    inner: RwLock<UserTable>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(UserTable::default()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a record into the API-facing user (display-name fallback applied).
fn assemble_user(id: DbId, record: &UserRecord) -> User {
    let friends = record
        .friends
        .iter()
        .map(|(&friend_id, &status)| FriendLink {
            id: friend_id,
            status,
        })
        .collect();
    User {
        id,
        login: record.login.clone(),
        email: record.email.clone(),
        name: cinelog_core::user::display_name(record.name.as_deref(), &record.login),
        birthday: record.birthday,
        friends,
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, input: &CreateUser) -> AppResult<User> {
        let mut table = self.inner.write().await;
        table.last_id += 1;
        let id = table.last_id;
        let record = UserRecord {
            login: input.login.clone(),
            email: input.email.clone(),
            name: input.name.clone(),
            birthday: input.birthday,
            friends: BTreeMap::new(),
        };
        let user = assemble_user(id, &record);
        table.users.insert(id, record);
        Ok(user)
    }

    async fn get(&self, id: DbId) -> AppResult<User> {
        let table = self.inner.read().await;
        let record = table.users.get(&id).ok_or(CoreError::NotFound {
            entity: "User",
            id,
        })?;
        Ok(assemble_user(id, record))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let table = self.inner.read().await;
        Ok(table
            .users
            .iter()
            .map(|(&id, record)| assemble_user(id, record))
            .collect())
    }

    async fn update(&self, input: &UpdateUser) -> AppResult<User> {
        let mut table = self.inner.write().await;
        let record = table.users.get_mut(&input.id).ok_or(CoreError::NotFound {
            entity: "User",
            id: input.id,
        })?;
        record.login = input.login.clone();
        record.email = input.email.clone();
        record.name = input.name.clone();
        record.birthday = input.birthday;
        Ok(assemble_user(input.id, record))
    }

    async fn exists(&self, id: DbId) -> AppResult<bool> {
        Ok(self.inner.read().await.users.contains_key(&id))
    }

    async fn friend_status(
        &self,
        user_id: DbId,
        friend_id: DbId,
    ) -> AppResult<Option<FriendshipStatus>> {
        let table = self.inner.read().await;
        Ok(table
            .users
            .get(&user_id)
            .and_then(|record| record.friends.get(&friend_id).copied()))
    }

    async fn upsert_friend(
        &self,
        user_id: DbId,
        friend_id: DbId,
        status: FriendshipStatus,
    ) -> AppResult<()> {
        let mut table = self.inner.write().await;
        let record = table.users.get_mut(&user_id).ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;
        record.friends.insert(friend_id, status);
        Ok(())
    }

    async fn remove_friend(&self, user_id: DbId, friend_id: DbId) -> AppResult<bool> {
        let mut table = self.inner.write().await;
        let record = table.users.get_mut(&user_id).ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;
        Ok(record.friends.remove(&friend_id).is_some())
    }

    async fn friends_of(&self, user_id: DbId) -> AppResult<Vec<User>> {
        let table = self.inner.read().await;
        let record = table.users.get(&user_id).ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;
        Ok(record
            .friends
            .keys()
            .filter_map(|friend_id| {
                table
                    .users
                    .get(friend_id)
                    .map(|friend| assemble_user(*friend_id, friend))
            })
            .collect())
    }

    async fn common_friends(&self, user_id: DbId, other_id: DbId) -> AppResult<Vec<User>> {
        let table = self.inner.read().await;
        let user = table.users.get(&user_id).ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;
        let other = table.users.get(&other_id).ok_or(CoreError::NotFound {
            entity: "User",
            id: other_id,
        })?;
        Ok(user
            .friends
            .keys()
            .filter(|id| other.friends.contains_key(id))
            .filter_map(|friend_id| {
                table
                    .users
                    .get(friend_id)
                    .map(|friend| assemble_user(*friend_id, friend))
            })
            .collect())
    }
}
