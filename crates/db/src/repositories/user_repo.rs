//! Repository for the `users` table and the `friendships` relation.

use cinelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, UserRow};

/// Column list shared across user queries.
const COLUMNS: &str = "id, login, email, name, birthday";

/// Provides CRUD operations for users and their friendship edges.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (login, email, name, birthday)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.login)
            .bind(&input.email)
            .bind(&input.name)
            .bind(input.birthday)
            .fetch_one(pool)
            .await
    }

    /// Find a user row by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all user rows, id ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, UserRow>(&query).fetch_all(pool).await
    }

    /// Full-field update of a user.
    ///
    /// Returns `None` if no row with `input.id` exists.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateUser,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!(
            "UPDATE users
             SET login = $2, email = $3, name = $4, birthday = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(input.id)
            .bind(&input.login)
            .bind(&input.email)
            .bind(&input.name)
            .bind(input.birthday)
            .fetch_optional(pool)
            .await
    }

    /// Whether a user with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (found,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(found)
    }

    /// Directed friendship edges owned by a user: `(friend_id, status)`
    /// pairs, friend id ascending.
    pub async fn links_of(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<(DbId, String)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, String)>(
            "SELECT friend_id, status FROM friendships
             WHERE user_id = $1
             ORDER BY friend_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Status of the directed edge `user_id -> friend_id`, if present.
    pub async fn friend_status(
        pool: &PgPool,
        user_id: DbId,
        friend_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT status FROM friendships WHERE user_id = $1 AND friend_id = $2",
        )
        .bind(user_id)
        .bind(friend_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(status,)| status))
    }

    /// Insert the directed edge `user_id -> friend_id` with the given
    /// status, or update the status if the edge already exists.
    pub async fn upsert_friend(
        pool: &PgPool,
        user_id: DbId,
        friend_id: DbId,
        status: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO friendships (user_id, friend_id, status)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, friend_id) DO UPDATE SET status = EXCLUDED.status",
        )
        .bind(user_id)
        .bind(friend_id)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove the directed edge `user_id -> friend_id`.
    /// Returns `true` if a row was deleted.
    pub async fn remove_friend(
        pool: &PgPool,
        user_id: DbId,
        friend_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM friendships WHERE user_id = $1 AND friend_id = $2")
                .bind(user_id)
                .bind(friend_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Users this user has a directed edge to, id ascending.
    pub async fn friends_of(pool: &PgPool, user_id: DbId) -> Result<Vec<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.login, u.email, u.name, u.birthday
             FROM users u
             JOIN friendships f ON u.id = f.friend_id
             WHERE f.user_id = $1
             ORDER BY u.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Users present in both users' friend sets, id ascending.
    pub async fn common_friends(
        pool: &PgPool,
        user_id: DbId,
        other_id: DbId,
    ) -> Result<Vec<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.login, u.email, u.name, u.birthday
             FROM users u
             JOIN friendships f1 ON u.id = f1.friend_id
             JOIN friendships f2 ON u.id = f2.friend_id
             WHERE f1.user_id = $1 AND f2.user_id = $2
             ORDER BY u.id",
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_all(pool)
        .await
    }
}
