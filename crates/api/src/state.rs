use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{FilmService, UserService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (services hold `Arc`s; the pool is already
/// reference-counted).
#[derive(Clone)]
pub struct AppState {
    /// Film CRUD, likes, and reference-data reads.
    pub films: FilmService,
    /// User CRUD and friendships.
    pub users: UserService,
    /// Database connection pool; `None` when running on the in-memory backend.
    pub pool: Option<cinelog_db::DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
