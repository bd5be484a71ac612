//! Repository for the `genres` reference table (seeded, read-only).

use cinelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::Genre;

/// Read operations for genres.
pub struct GenreRepo;

impl GenreRepo {
    /// List all genres, id ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Find a genre by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// How many of the given ids exist. Used to validate a film's genre set
    /// in one round trip.
    pub async fn count_existing(pool: &PgPool, ids: &[DbId]) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM genres WHERE id = ANY($1)")
                .bind(ids)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
