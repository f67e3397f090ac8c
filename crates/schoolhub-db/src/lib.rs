//! # SchoolHub DB
//!
//! Persistence for the SchoolHub API.
//!
//! Handlers talk to the [`Store`] trait object held in application state. The
//! production implementation is [`PgStore`] over a SQLx PostgreSQL pool; the
//! `test-utils` feature adds an in-memory [`MemoryStore`] with the same behaviour.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_db::{MIGRATOR, PgStore, init_db_pool};
//!
//! let pool = init_db_pool(&config.database).await?;
//! MIGRATOR.run(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

use schoolhub_config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{ClassroomStore, SchoolStore, Store, StoreError, StudentStore, UserStore};

pub use sqlx::PgPool;

/// Embedded SQL migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a PostgreSQL pool sized by [`DatabaseConfig::max_connections`].
///
/// Call once at startup; the pool is cheap to clone and is shared by every
/// request through [`PgStore`].
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}
