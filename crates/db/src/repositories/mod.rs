//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Repositories stay at the
//! SQL level: reference validation and error mapping live in the storage
//! adapters above them.

pub mod film_repo;
pub mod genre_repo;
pub mod mpa_repo;
pub mod user_repo;

pub use film_repo::FilmRepo;
pub use genre_repo::GenreRepo;
pub use mpa_repo::MpaRepo;
pub use user_repo::UserRepo;
