//! Postgres connection pool.
//!
//! The pool is created lazily: no connection is opened until the first query,
//! idle connections are reused, and broken ones are dropped and replaced on
//! the next acquire. The handle is passed explicitly to the stores that need it.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Build a lazily-connecting pool for `database_url`.
///
/// Fails only if the URL itself cannot be parsed.
pub fn lazy_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .test_before_acquire(true)
        .connect_lazy(database_url)
}
