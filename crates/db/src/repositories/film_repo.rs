//! Repository for the `films` table and its `film_genres` / `likes` relations.

use cinelog_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::film::{CreateFilm, FilmRow, UpdateFilm};
use crate::models::genre::Genre;

/// Column list shared across film queries (joined with the MPA name).
const COLUMNS: &str = "f.id, f.name, f.description, f.release_date, f.duration, \
                       f.mpa_rating_id, m.name AS mpa_name";

/// Provides CRUD operations for films, their genre sets, and their likes.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a new film and its genre set in one transaction.
    ///
    /// `mpa_id` and the genre ids must already be validated against the
    /// reference tables. Returns the new film id.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFilm,
        mpa_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO films (name, description, release_date, duration, mpa_rating_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.release_date)
        .bind(input.duration)
        .bind(mpa_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_genres(&mut tx, id, genre_ids).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Full-field update of a film; the genre set is replaced wholesale
    /// (delete then reinsert) in the same transaction.
    ///
    /// Returns `false` if no film with `input.id` exists.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateFilm,
        mpa_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE films
             SET name = $2, description = $3, release_date = $4,
                 duration = $5, mpa_rating_id = $6
             WHERE id = $1",
        )
        .bind(input.id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.release_date)
        .bind(input.duration)
        .bind(mpa_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM film_genres WHERE film_id = $1")
            .bind(input.id)
            .execute(&mut *tx)
            .await?;
        Self::insert_genres(&mut tx, input.id, genre_ids).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Find a film row by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FilmRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM films f
             JOIN mpa_ratings m ON f.mpa_rating_id = m.id
             WHERE f.id = $1"
        );
        sqlx::query_as::<_, FilmRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all film rows, id ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<FilmRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM films f
             JOIN mpa_ratings m ON f.mpa_rating_id = m.id
             ORDER BY f.id"
        );
        sqlx::query_as::<_, FilmRow>(&query).fetch_all(pool).await
    }

    /// The `count` most-liked film rows; like count descending, id ascending
    /// on ties.
    pub async fn popular(pool: &PgPool, count: i64) -> Result<Vec<FilmRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM films f
             JOIN mpa_ratings m ON f.mpa_rating_id = m.id
             LEFT JOIN likes l ON f.id = l.film_id
             GROUP BY f.id, m.id
             ORDER BY COUNT(l.user_id) DESC, f.id
             LIMIT $1"
        );
        sqlx::query_as::<_, FilmRow>(&query)
            .bind(count)
            .fetch_all(pool)
            .await
    }

    /// Whether a film with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (found,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM films WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(found)
    }

    /// Genres attached to a film, id ascending.
    pub async fn genres_of(pool: &PgPool, film_id: DbId) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name
             FROM genres g
             JOIN film_genres fg ON g.id = fg.genre_id
             WHERE fg.film_id = $1
             ORDER BY g.id",
        )
        .bind(film_id)
        .fetch_all(pool)
        .await
    }

    /// Ids of users who liked a film, id ascending.
    pub async fn likes_of(pool: &PgPool, film_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT user_id FROM likes WHERE film_id = $1 ORDER BY user_id",
        )
        .bind(film_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Record a like. Idempotent: re-liking is a no-op.
    pub async fn add_like(pool: &PgPool, film_id: DbId, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO likes (film_id, user_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(film_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a like. Returns `true` if a row was deleted.
    pub async fn remove_like(
        pool: &PgPool,
        film_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM likes WHERE film_id = $1 AND user_id = $2")
            .bind(film_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bulk-insert the genre set for a film inside an open transaction.
    async fn insert_genres(
        tx: &mut Transaction<'_, Postgres>,
        film_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if genre_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO film_genres (film_id, genre_id)
             SELECT $1, g FROM UNNEST($2::bigint[]) AS g",
        )
        .bind(film_id)
        .bind(genre_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
