//! Service layer: thin orchestration over the storage traits.
//!
//! Services apply domain validation, run existence checks before relation
//! mutations so not-found surfaces early, and own the one-line business
//! rules (self-friend guard, friendship confirmation, popularity query).

pub mod film;
pub mod user;

pub use film::FilmService;
pub use user::UserService;
