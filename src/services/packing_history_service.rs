use std::sync::Arc;

use crate::clock::Clock;
use crate::db::DatabasePool;
use crate::error::{AppError, AppResult};
use crate::models::{CreatePackingHistoryRequest, PackingHistoriesListResponse, PackingHistory};
use sqlx::types::Json;
use sqlx::Row;
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "id, user_id, destination, travel_duration, preferences, packing_list, created_at";

pub struct PackingHistoryService {
    db: DatabasePool,
    clock: Arc<dyn Clock>,
}

impl PackingHistoryService {
    pub fn new(db: DatabasePool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub async fn create_packing_history(
        &self,
        req: CreatePackingHistoryRequest,
    ) -> AppResult<PackingHistory> {
        let record = PackingHistory::from_request(req, self.clock.now())?;
        self.ensure_user_exists(record.user_id).await?;

        match &self.db {
            DatabasePool::Postgres(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO packing_histories (
                        id, user_id, destination, travel_duration, preferences, packing_list, created_at
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(record.id)
                .bind(record.user_id)
                .bind(&record.destination)
                .bind(record.travel_duration)
                .bind(&record.preferences)
                .bind(Json(&record.packing_list))
                .bind(record.created_at)
                .execute(pool)
                .await?;
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO packing_histories (
                        id, user_id, destination, travel_duration, preferences, packing_list, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )
                .bind(record.id)
                .bind(record.user_id)
                .bind(&record.destination)
                .bind(record.travel_duration)
                .bind(&record.preferences)
                .bind(Json(&record.packing_list))
                .bind(record.created_at)
                .execute(pool)
                .await?;
            }
        }

        tracing::info!(
            packing_history_id = %record.id,
            user_id = %record.user_id,
            items = record.packing_list.len(),
            "packing history recorded"
        );
        self.get_packing_history(record.id).await
    }

    pub async fn get_packing_history(&self, id: Uuid) -> AppResult<PackingHistory> {
        let record = match &self.db {
            DatabasePool::Postgres(pool) => {
                let query = format!("SELECT {} FROM packing_histories WHERE id = $1", SELECT_COLUMNS);
                match sqlx::query(&query).bind(id).fetch_optional(pool).await? {
                    Some(row) => Some(row_to_packing_history_postgres(&row)?),
                    None => None,
                }
            }
            DatabasePool::Sqlite(pool) => {
                let query = format!("SELECT {} FROM packing_histories WHERE id = ?1", SELECT_COLUMNS);
                match sqlx::query(&query).bind(id).fetch_optional(pool).await? {
                    Some(row) => Some(row_to_packing_history(&row)?),
                    None => None,
                }
            }
        };

        record.ok_or_else(|| AppError::NotFound(format!("Packing history with id {} not found", id)))
    }

    /// A user's trips, newest first.
    pub async fn list_packing_histories(
        &self,
        user_id: Uuid,
        page: u32,
        per_page: u32,
    ) -> AppResult<PackingHistoriesListResponse> {
        if page == 0 || per_page == 0 {
            return Err(AppError::BadRequest(
                "page and per_page must be at least 1".to_string(),
            ));
        }
        self.ensure_user_exists(user_id).await?;

        let limit = i64::from(per_page);
        let offset = i64::from(page - 1)
            .checked_mul(limit)
            .ok_or_else(|| AppError::BadRequest("page is out of range".to_string()))?;

        let (packing_histories, total) = match &self.db {
            DatabasePool::Postgres(pool) => {
                let query = format!(
                    "SELECT {} FROM packing_histories WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                    SELECT_COLUMNS
                );
                let rows = sqlx::query(&query)
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await?;
                let records = rows
                    .iter()
                    .map(row_to_packing_history_postgres)
                    .collect::<AppResult<Vec<_>>>()?;

                let count_row =
                    sqlx::query("SELECT COUNT(*) as count FROM packing_histories WHERE user_id = $1")
                        .bind(user_id)
                        .fetch_one(pool)
                        .await?;
                (records, count_row.try_get::<i64, _>("count")?)
            }
            DatabasePool::Sqlite(pool) => {
                let query = format!(
                    "SELECT {} FROM packing_histories WHERE user_id = ?1 ORDER BY created_at DESC LIMIT ?2 OFFSET ?3",
                    SELECT_COLUMNS
                );
                let rows = sqlx::query(&query)
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await?;
                let records = rows
                    .iter()
                    .map(row_to_packing_history)
                    .collect::<AppResult<Vec<_>>>()?;

                let count_row =
                    sqlx::query("SELECT COUNT(*) as count FROM packing_histories WHERE user_id = ?1")
                        .bind(user_id)
                        .fetch_one(pool)
                        .await?;
                (records, count_row.try_get::<i64, _>("count")?)
            }
        };

        Ok(PackingHistoriesListResponse {
            packing_histories,
            total,
            page,
            per_page,
        })
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> AppResult<()> {
        let found = match &self.db {
            DatabasePool::Postgres(pool) => sqlx::query("SELECT id FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(pool)
                .await?
                .is_some(),
            DatabasePool::Sqlite(pool) => sqlx::query("SELECT id FROM users WHERE id = ?1")
                .bind(user_id)
                .fetch_optional(pool)
                .await?
                .is_some(),
        };

        if !found {
            return Err(AppError::NotFound(format!("User with id {} not found", user_id)));
        }
        Ok(())
    }
}

fn row_to_packing_history(row: &sqlx::sqlite::SqliteRow) -> AppResult<PackingHistory> {
    let Json(packing_list) = row.try_get::<Json<Vec<String>>, _>("packing_list")?;
    Ok(PackingHistory {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        destination: row.try_get("destination")?,
        travel_duration: row.try_get("travel_duration")?,
        preferences: row.try_get("preferences")?,
        packing_list,
        created_at: row.try_get("created_at")?,
    })
}

fn row_to_packing_history_postgres(row: &sqlx::postgres::PgRow) -> AppResult<PackingHistory> {
    let Json(packing_list) = row.try_get::<Json<Vec<String>>, _>("packing_list")?;
    Ok(PackingHistory {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        destination: row.try_get("destination")?,
        travel_duration: row.try_get("travel_duration")?,
        preferences: row.try_get("preferences")?,
        packing_list,
        created_at: row.try_get("created_at")?,
    })
}
