//! Repository for the `mpa_ratings` reference table (seeded, read-only).

use cinelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::mpa::MpaRating;

/// Read operations for MPA ratings.
pub struct MpaRepo;

impl MpaRepo {
    /// List all MPA ratings, id ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<MpaRating>, sqlx::Error> {
        sqlx::query_as::<_, MpaRating>("SELECT id, name FROM mpa_ratings ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Find an MPA rating by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MpaRating>, sqlx::Error> {
        sqlx::query_as::<_, MpaRating>("SELECT id, name FROM mpa_ratings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an MPA rating with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (found,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM mpa_ratings WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(found)
    }
}
