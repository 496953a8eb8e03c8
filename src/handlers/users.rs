use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::models::{CreateUserRequest, PackingHistoriesListResponse, User};

#[derive(Deserialize, Validate)]
pub struct PackingHistoriesQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100))]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

pub async fn create_user(
    State((user_service, _packing_history_service)): State<crate::AppState>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    req.validate()?;

    let user = user_service.create_user(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State((user_service, _packing_history_service)): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let user = user_service.get_user(id).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State((user_service, _packing_history_service)): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_user_packing_histories(
    State((_user_service, packing_history_service)): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<PackingHistoriesQuery>,
) -> AppResult<Json<PackingHistoriesListResponse>> {
    params.validate()?;

    let response = packing_history_service
        .list_packing_histories(id, params.page, params.per_page)
        .await?;

    Ok(Json(response))
}
