//! Database connection setup and migrations.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "sqlite::memory:".to_owned()
}

fn default_max_conns() -> u32 {
    10
}

fn default_min_conns() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DbConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_max_conns")]
    pub max_conns: u32,
    #[serde(default = "default_min_conns")]
    pub min_conns: u32,
    /// Log every SQL statement through `sqlx`.
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_conns: default_max_conns(),
            min_conns: default_min_conns(),
            sqlx_logging: false,
        }
    }
}

impl DbConfig {
    /// Every pooled connection to `sqlite::memory:` opens its own empty database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("invalid database config: {0}")]
    InvalidConfig(String),

    #[error("failed to connect to database: {0}")]
    Connect(#[source] DbErr),

    #[error("migration failed: {0}")]
    Migration(#[source] DbErr),
}

/// Open a sea-orm connection pool.
///
/// # Errors
/// Returns [`DbError`] on invalid pool sizes or when the database is unreachable.
pub async fn connect_db(cfg: &DbConfig) -> Result<DatabaseConnection, DbError> {
    if cfg.max_conns == 0 {
        return Err(DbError::InvalidConfig("max_conns must be at least 1".to_owned()));
    }
    if cfg.min_conns > cfg.max_conns {
        return Err(DbError::InvalidConfig(format!(
            "min_conns ({}) exceeds max_conns ({})",
            cfg.min_conns, cfg.max_conns
        )));
    }

    let (max, min) = if cfg.is_in_memory() {
        (1, 1)
    } else {
        (cfg.max_conns, cfg.min_conns)
    };

    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(max)
        .min_connections(min)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opts).await.map_err(DbError::Connect)?;
    tracing::info!(
        backend = ?db.get_database_backend(),
        max_conns = max,
        "Database connected"
    );
    Ok(db)
}

/// Apply all pending migrations of `M`.
///
/// # Errors
/// Returns [`DbError::Migration`] if any migration fails.
pub async fn run_migrator<M: MigratorTrait>(db: &DatabaseConnection) -> Result<(), DbError> {
    M::up(db, None).await.map_err(DbError::Migration)
}
