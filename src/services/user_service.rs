use std::sync::Arc;

use crate::clock::Clock;
use crate::db::DatabasePool;
use crate::error::{AppError, AppResult};
use crate::models::{CreateUserRequest, User};
use sqlx::Row;
use uuid::Uuid;

pub struct UserService {
    db: DatabasePool,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(db: DatabasePool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> AppResult<User> {
        let id = Uuid::new_v4();
        let now = self.clock.now();

        match &self.db {
            DatabasePool::Postgres(pool) => {
                sqlx::query("INSERT INTO users (id, name, created_at) VALUES ($1, $2, $3)")
                    .bind(id)
                    .bind(&req.name)
                    .bind(now)
                    .execute(pool)
                    .await?;
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query("INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3)")
                    .bind(id)
                    .bind(&req.name)
                    .bind(now)
                    .execute(pool)
                    .await?;
            }
        }

        tracing::info!(user_id = %id, "user created");
        self.get_user(id).await
    }

    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        let user = match &self.db {
            DatabasePool::Postgres(pool) => {
                let row = sqlx::query("SELECT id, name, created_at FROM users WHERE id = $1")
                    .bind(id)
                    .fetch_optional(pool)
                    .await?;
                match row {
                    Some(row) => Some(User {
                        id: row.try_get("id")?,
                        name: row.try_get("name")?,
                        created_at: row.try_get("created_at")?,
                    }),
                    None => None,
                }
            }
            DatabasePool::Sqlite(pool) => {
                let row = sqlx::query("SELECT id, name, created_at FROM users WHERE id = ?1")
                    .bind(id)
                    .fetch_optional(pool)
                    .await?;
                match row {
                    Some(row) => Some(User {
                        id: row.try_get("id")?,
                        name: row.try_get("name")?,
                        created_at: row.try_get("created_at")?,
                    }),
                    None => None,
                }
            }
        };

        user.ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Packing histories go with the user via ON DELETE CASCADE.
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        let result = match &self.db {
            DatabasePool::Postgres(pool) => {
                sqlx::query("DELETE FROM users WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await?
                    .rows_affected()
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query("DELETE FROM users WHERE id = ?1")
                    .bind(id)
                    .execute(pool)
                    .await?
                    .rows_affected()
            }
        };

        if result == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}
