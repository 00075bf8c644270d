//! PostgreSQL connection pool.
//!
//! Wraps the SQLx pool together with the settings the repositories need
//! (the per-query deadline) and owns the embedded schema migrations.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use tracing::log::LevelFilter;

use fg_shared::DatabaseConfig;

use crate::InfrastructureError;

const SLOW_STATEMENT: Duration = Duration::from_millis(500);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Shared handle to the PostgreSQL pool
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Connects and eagerly opens one connection, so a bad URL or an
    /// unreachable server fails at startup rather than on the first request.
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("invalid DATABASE_URL: {}", e)))?
            .log_statements(LevelFilter::Trace)
            .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(IDLE_TIMEOUT)
            .connect_with(options)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            query_timeout_secs = config.query_timeout,
            "PostgreSQL pool ready"
        );

        Ok(Self { pool, config })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Deadline applied to every repository query
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.config.query_timeout)
    }

    /// Round-trips a trivial query through the pool.
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        tracing::debug!(
            size = self.pool.size(),
            idle = self.pool.num_idle(),
            "PostgreSQL health check passed"
        );
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }

    /// Applies the migrations embedded from `infra/migrations`.
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}
