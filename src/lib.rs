pub mod auth;
pub mod autosave;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod startup;

use moka::future::Cache;
use std::sync::Arc;

pub use auth::JwtKeys;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use extractors::AuthenticatedUser;
pub use handlers::MetricsState;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub jwt_keys: Arc<JwtKeys>,
    pub user_cache: Cache<i64, AuthenticatedUser>, // user id → resolved user
    pub config: AppConfig,
    pub metrics: Option<Arc<MetricsState>>,
}
