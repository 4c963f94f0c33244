// src/models/travel.rs
// DOCUMENTATION: Travel entity, request DTOs and read-time aggregate views
// PURPOSE: A trip owning an ordered list of places

use crate::models::date_only;
use crate::models::FullPlace;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Travel row as stored in the `travel` table
/// DOCUMENTATION: `preview` is a filesystem path, empty when unset.
/// `places` keeps insertion order; the Place rows hold no back-reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Travel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "date_only")]
    pub date_start: NaiveDate,
    #[serde(with = "date_only")]
    pub date_end: NaiveDate,
    pub places: Vec<Uuid>,
    pub preview: String,
}

/// Request to create a new travel
/// DOCUMENTATION: Any `id`, `places` or `preview` sent by the client is ignored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTravelRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "date_only")]
    pub date_start: NaiveDate,
    #[serde(with = "date_only")]
    pub date_end: NaiveDate,
}

/// Request to overwrite the editable fields of a travel
pub type UpdateTravelRequest = CreateTravelRequest;

/// Travel with every place inlined and every image embedded
/// DOCUMENTATION: Built per request by TravelService::get_travel, never persisted
#[derive(Debug, Clone, Serialize)]
pub struct FullTravel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "date_only")]
    pub date_start: NaiveDate,
    #[serde(with = "date_only")]
    pub date_end: NaiveDate,
    pub places: Vec<FullPlace>,
    pub preview: String,
}

/// Short travel summary for the listing endpoint
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TravelCard {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "date_only")]
    pub date_start: NaiveDate,
    #[serde(with = "date_only")]
    pub date_end: NaiveDate,
    pub preview: String,
}

impl Travel {
    /// Assemble the aggregate view from already resolved places and preview
    pub fn into_full(self, places: Vec<FullPlace>, preview: String) -> FullTravel {
        FullTravel {
            id: self.id,
            name: self.name,
            description: self.description,
            date_start: self.date_start,
            date_end: self.date_end,
            places,
            preview,
        }
    }
}
