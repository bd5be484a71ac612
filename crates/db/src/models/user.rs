//! User entity model and DTOs.

use cinelog_core::friendship::FriendshipStatus;
use cinelog_core::types::{Date, DbId};
use cinelog_core::user::display_name;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// `name` is stored as entered (possibly NULL); the login fallback is
/// applied when building [`User`], never persisted.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub login: String,
    pub email: String,
    pub name: Option<String>,
    pub birthday: Date,
}

/// User as exposed by the API; `name` has the login fallback applied.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: DbId,
    pub login: String,
    pub email: String,
    pub name: String,
    pub birthday: Date,
    /// Directed friendship edges owned by this user, friend id ascending.
    pub friends: Vec<FriendLink>,
}

/// A directed friendship edge as seen from its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendLink {
    pub id: DbId,
    pub status: FriendshipStatus,
}

impl UserRow {
    /// Assemble the API-facing user, applying the display-name fallback.
    pub fn into_user(self, friends: Vec<FriendLink>) -> User {
        let name = display_name(self.name.as_deref(), &self.login);
        User {
            id: self.id,
            login: self.login,
            email: self.email,
            name,
            birthday: self.birthday,
            friends,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub login: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub birthday: Date,
}

/// DTO for updating an existing user: a full-field replace addressed by `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub id: DbId,
    pub login: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub birthday: Date,
}
