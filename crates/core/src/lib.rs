//! Domain layer for the Cinelog service.
//!
//! Contains the shared error type, id/date aliases, field validation rules
//! for films and users, and the friendship status model. This crate has no
//! I/O: storage and HTTP live in `cinelog-db` and `cinelog-api`.

pub mod error;
pub mod film;
pub mod friendship;
pub mod types;
pub mod user;
