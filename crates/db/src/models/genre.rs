//! Genre reference entity.

use cinelog_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `genres` table (seeded, read-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
}

/// Bare genre reference in film payloads.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GenreRef {
    pub id: DbId,
}
