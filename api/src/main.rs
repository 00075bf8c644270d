use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use fg_api::{create_app, telemetry, AppState};
use fg_core::domain::entities::user::{NewUser, Role};
use fg_core::errors::DomainError;
use fg_core::services::auth::BcryptHasher;
use fg_infra::cache::{RedisClient, RedisSessionStore};
use fg_infra::database::{DatabasePool, PgActorRepository, PgFilmRepository, PgUserRepository};
use fg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init(&config.logging);
    config.validate().map_err(anyhow::Error::msg)?;

    tracing::info!(
        environment = ?config.environment,
        "Starting Filmography API Server"
    );

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    database
        .run_migrations()
        .await
        .context("failed to run database migrations")?;
    database
        .health_check()
        .await
        .context("database health check failed")?;

    let pool = database.get_pool().clone();
    let query_timeout = database.query_timeout();

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to redis")?;
    redis
        .health_check()
        .await
        .context("redis health check failed")?;

    let users = Arc::new(PgUserRepository::new(pool.clone(), query_timeout));
    let state = web::Data::new(AppState::new(
        users,
        Arc::new(PgFilmRepository::new(pool.clone(), query_timeout)),
        Arc::new(PgActorRepository::new(pool, query_timeout)),
        Arc::new(RedisSessionStore::new(redis)),
        Arc::new(BcryptHasher::default()),
        config.auth.clone(),
    ));

    bootstrap_admin(&state).await?;

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, workers = config.server.workers, "Listening");

    let mut server = HttpServer::new(move || create_app(state.clone()));
    // 0 keeps actix's default of one worker per core
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Creates the admin account named by `ADMIN_USERNAME`/`ADMIN_PASSWORD`
/// when both are set. An existing account with that name is left as is.
async fn bootstrap_admin(state: &AppState) -> anyhow::Result<()> {
    let (Ok(username), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        return Ok(());
    };

    let admin = NewUser {
        username: username.clone(),
        password,
        role: Role::Admin,
    };

    match state.user_service.create(admin).await {
        Ok(id) => tracing::info!(username = %username, user_id = %id, "Admin account created"),
        Err(DomainError::Conflict { .. }) => {
            tracing::debug!(username = %username, "Admin account already exists")
        }
        Err(e) => return Err(anyhow::Error::new(e).context("failed to create admin account")),
    }
    Ok(())
}
