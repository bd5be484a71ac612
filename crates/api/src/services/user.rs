//! User service: validation, friendship management.

use std::sync::Arc;

use cinelog_core::error::CoreError;
use cinelog_core::friendship::FriendshipStatus;
use cinelog_core::types::DbId;
use cinelog_core::user::{validate_friend_pair, validate_user};
use cinelog_db::models::user::{CreateUser, UpdateUser, User};

use crate::error::AppResult;
use crate::storage::UserStore;

/// Orchestrates user CRUD and the friendship state machine.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn create(&self, input: CreateUser) -> AppResult<User> {
        validate_user(&input.login, &input.email, input.birthday)?;
        let user = self.users.create(&input).await?;
        tracing::info!(user_id = user.id, login = %user.login, "User created");
        Ok(user)
    }

    pub async fn update(&self, input: UpdateUser) -> AppResult<User> {
        validate_user(&input.login, &input.email, input.birthday)?;
        let user = self.users.update(&input).await?;
        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    pub async fn get(&self, id: DbId) -> AppResult<User> {
        self.users.get(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    /// Add a friend edge from `user_id` to `friend_id`.
    ///
    /// One-sided adds create a PENDING edge. If the target already has an
    /// edge toward the requester, both directed edges become CONFIRMED.
    pub async fn add_friend(&self, user_id: DbId, friend_id: DbId) -> AppResult<()> {
        validate_friend_pair(user_id, friend_id)?;
        self.ensure_user(user_id).await?;
        self.ensure_user(friend_id).await?;

        let reciprocal = self.users.friend_status(friend_id, user_id).await?;
        if reciprocal.is_some() {
            self.users
                .upsert_friend(user_id, friend_id, FriendshipStatus::Confirmed)
                .await?;
            self.users
                .upsert_friend(friend_id, user_id, FriendshipStatus::Confirmed)
                .await?;
            tracing::info!(user_id, friend_id, "Friendship confirmed");
        } else {
            self.users
                .upsert_friend(user_id, friend_id, FriendshipStatus::Pending)
                .await?;
            tracing::info!(user_id, friend_id, "Friend request sent");
        }
        Ok(())
    }

    /// Remove the directed friend edge; a no-op if it does not exist.
    pub async fn remove_friend(&self, user_id: DbId, friend_id: DbId) -> AppResult<()> {
        self.ensure_user(user_id).await?;
        self.ensure_user(friend_id).await?;
        let removed = self.users.remove_friend(user_id, friend_id).await?;
        if removed {
            tracing::info!(user_id, friend_id, "Friend removed");
        }
        Ok(())
    }

    pub async fn friends(&self, user_id: DbId) -> AppResult<Vec<User>> {
        self.ensure_user(user_id).await?;
        self.users.friends_of(user_id).await
    }

    pub async fn common_friends(&self, user_id: DbId, other_id: DbId) -> AppResult<Vec<User>> {
        self.ensure_user(user_id).await?;
        self.ensure_user(other_id).await?;
        self.users.common_friends(user_id, other_id).await
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
