use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub enum DatabasePool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DatabasePool {
    pub async fn new(config: &Config) -> AppResult<Self> {
        let database_url = &config.database.url;

        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(database_url)
                .await?;

            Ok(DatabasePool::Postgres(pool))
        } else if database_url.starts_with("sqlite:") {
            // packing_histories.user_id relies on ON DELETE CASCADE
            let options = SqliteConnectOptions::from_str(database_url)?
                .create_if_missing(true)
                .foreign_keys(true);

            let mut pool_options =
                SqlitePoolOptions::new().max_connections(config.database.max_connections);

            // Every connection to :memory: opens its own empty database, and closing
            // the last one drops it
            if database_url.contains(":memory:") {
                pool_options = pool_options
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
            }

            let pool = pool_options.connect_with(options).await?;

            Ok(DatabasePool::Sqlite(pool))
        } else {
            Err(AppError::ConfigError(config::ConfigError::Message(
                "Invalid database URL. Must start with postgres:// or sqlite:".to_string(),
            )))
        }
    }

    pub async fn migrate(&self) -> AppResult<()> {
        match self {
            DatabasePool::Postgres(pool) => {
                Migrator::new(std::path::Path::new("./migrations/postgres"))
                    .await?
                    .run(pool)
                    .await?;
            }
            DatabasePool::Sqlite(pool) => {
                Migrator::new(std::path::Path::new("./migrations/sqlite"))
                    .await?
                    .run(pool)
                    .await?;
            }
        }
        Ok(())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            DatabasePool::Postgres(_) => "postgres",
            DatabasePool::Sqlite(_) => "sqlite",
        }
    }
}

#[cfg(test)]
pub async fn test_pool() -> DatabasePool {
    let pool = DatabasePool::new(&Config::in_memory())
        .await
        .expect("in-memory sqlite pool");
    pool.migrate().await.expect("sqlite migrations");
    pool
}
