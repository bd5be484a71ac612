//! Film entity model and DTOs.

use cinelog_core::types::{Date, DbId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::genre::{Genre, GenreRef};
use crate::models::mpa::{MpaRating, MpaRef};

/// Film as exposed by the API: row fields plus resolved references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Date,
    pub duration: i32,
    pub mpa: MpaRating,
    /// Genres in id order.
    pub genres: Vec<Genre>,
    /// Ids of users who liked this film, in id order.
    pub likes: Vec<DbId>,
}

/// A row from the `films` table joined with its MPA rating name.
#[derive(Debug, Clone, FromRow)]
pub struct FilmRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Date,
    pub duration: i32,
    pub mpa_rating_id: DbId,
    pub mpa_name: String,
}

impl FilmRow {
    /// Assemble the API-facing film from the row and its loaded relations.
    pub fn into_film(self, genres: Vec<Genre>, likes: Vec<DbId>) -> Film {
        Film {
            id: self.id,
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            mpa: MpaRating {
                id: self.mpa_rating_id,
                name: self.mpa_name,
            },
            genres,
            likes,
        }
    }
}

/// DTO for creating a new film.
///
/// `mpa` is optional at the serde level so its absence surfaces as a
/// validation error rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub release_date: Date,
    pub duration: i32,
    #[serde(default)]
    pub mpa: Option<MpaRef>,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
}

/// DTO for updating an existing film: a full-field replace addressed by `id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilm {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub release_date: Date,
    pub duration: i32,
    #[serde(default)]
    pub mpa: Option<MpaRef>,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
}
