use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// One packing trip a user has recorded. Never updated after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingHistory {
    pub id: Uuid,
    pub user_id: Uuid,
    pub destination: Option<String>,
    /// Days
    pub travel_duration: Option<f64>,
    pub preferences: Option<String>,
    /// Pack order as supplied; duplicates are kept.
    pub packing_list: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreatePackingHistoryRequest {
    #[validate(required)]
    pub user_id: Option<Uuid>,

    #[validate(length(max = 255))]
    pub destination: Option<String>,

    pub travel_duration: Option<f64>,

    pub preferences: Option<String>,

    pub packing_list: Option<Vec<String>>,

    pub created_at: Option<DateTime<Utc>>,
}

impl PackingHistory {
    /// Builds a record from a request, stamping `created_at` with `now` unless the
    /// request carries its own timestamp.
    pub fn from_request(req: CreatePackingHistoryRequest, now: DateTime<Utc>) -> AppResult<Self> {
        let user_id = req
            .user_id
            .ok_or_else(|| AppError::ValidationError("user_id is required".to_string()))?;

        Ok(PackingHistory {
            id: Uuid::new_v4(),
            user_id,
            destination: req.destination,
            travel_duration: req.travel_duration,
            preferences: req.preferences,
            packing_list: req.packing_list.unwrap_or_default(),
            created_at: req.created_at.unwrap_or(now),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingHistoriesListResponse {
    pub packing_histories: Vec<PackingHistory>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
