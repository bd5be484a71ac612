//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` row struct matching the database row
//! - A `Serialize` entity struct as exposed by the API (references resolved)
//! - `Deserialize` create/update DTOs for the write endpoints

pub mod film;
pub mod genre;
pub mod mpa;
pub mod user;
