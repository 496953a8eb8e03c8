use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::models::{CreatePackingHistoryRequest, PackingHistory};

pub async fn create_packing_history(
    State((_user_service, packing_history_service)): State<crate::AppState>,
    Json(req): Json<CreatePackingHistoryRequest>,
) -> AppResult<(StatusCode, Json<PackingHistory>)> {
    req.validate()?;

    let record = packing_history_service.create_packing_history(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_packing_history(
    State((_user_service, packing_history_service)): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PackingHistory>> {
    let record = packing_history_service.get_packing_history(id).await?;
    Ok(Json(record))
}
