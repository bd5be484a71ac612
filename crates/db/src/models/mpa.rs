//! MPA rating reference entity.

use cinelog_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `mpa_ratings` table (seeded, read-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MpaRating {
    pub id: DbId,
    pub name: String,
}

/// Bare MPA reference in film payloads; unknown extra fields are ignored,
/// so clients may send the full `{id, name}` object back.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MpaRef {
    pub id: DbId,
}
