//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use fg_core::domain::entities::user::{Role, User, UserUpdate};
use fg_core::errors::DomainError;
use fg_core::repositories::UserRepository;

use super::{column_error, map_db_error, with_timeout};

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    /// Database connection pool
    pool: PgPool,
    query_timeout: Duration,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let role: String = row.try_get("role").map_err(|e| column_error("role", e))?;

        Ok(User {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            username: row
                .try_get("username")
                .map_err(|e| column_error("username", e))?,
            role: role
                .parse::<Role>()
                .map_err(|message| DomainError::Database { message })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        with_timeout(self.query_timeout, async {
            let row = sqlx::query(
                "SELECT id, username, password_hash, role FROM users WHERE username = $1 LIMIT 1",
            )
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "user"))?;

            row.as_ref().map(Self::row_to_user).transpose()
        })
        .await
    }

    async fn create(&self, user: &User) -> Result<(), DomainError> {
        with_timeout(self.query_timeout, async {
            sqlx::query(
                "INSERT INTO users (id, username, password_hash, role) VALUES ($1, $2, $3, $4)",
            )
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "username"))?;
            Ok(())
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        with_timeout(self.query_timeout, async {
            let rows =
                sqlx::query("SELECT id, username, password_hash, role FROM users ORDER BY username")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| map_db_error(e, "users"))?;

            rows.iter().map(Self::row_to_user).collect()
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        with_timeout(self.query_timeout, async {
            let row = sqlx::query("SELECT id, username, password_hash, role FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "user"))?;

            row.as_ref().map(Self::row_to_user).transpose()
        })
        .await
    }

    async fn update(&self, id: Uuid, update: &UserUpdate) -> Result<(), DomainError> {
        with_timeout(self.query_timeout, async {
            let result = sqlx::query("UPDATE users SET username = $2, role = $3 WHERE id = $1")
                .bind(id)
                .bind(&update.username)
                .bind(update.role.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "username"))?;

            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("user"));
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        with_timeout(self.query_timeout, async {
            let result = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "user"))?;

            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("user"));
            }
            Ok(())
        })
        .await
    }
}
