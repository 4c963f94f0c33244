// src/models/place.rs
// DOCUMENTATION: Place entity and its aggregate view
// PURPOSE: A visited location inside a travel, optionally linked to one expense

use crate::models::date_only;
use crate::models::Expense;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Place row as stored in the `places` table
/// DOCUMENTATION: `images` and `preview` hold filesystem paths.
/// `expenses` is the id of the linked Expense, None when nothing is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub story: String,
    #[serde(default, with = "date_only::option")]
    pub date: Option<NaiveDate>,
    pub images: Vec<String>,
    pub expenses: Option<Uuid>,
    pub preview: String,
}

/// Request to create a place
/// DOCUMENTATION: Images, preview and expense are attached by later calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlaceRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub story: String,
    #[serde(default, with = "date_only::option")]
    pub date: Option<NaiveDate>,
}

/// Request to overwrite name, story and date of a place
pub type UpdatePlaceRequest = CreatePlaceRequest;

/// Place with embedded images and the linked expense inlined
#[derive(Debug, Clone, Serialize)]
pub struct FullPlace {
    pub id: Uuid,
    pub name: String,
    pub story: String,
    #[serde(with = "date_only::option")]
    pub date: Option<NaiveDate>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Expense>,
    pub preview: String,
}

impl Place {
    /// Assemble the aggregate view; `images` and `preview` must already be embedded
    pub fn into_full(
        self,
        images: Vec<String>,
        preview: String,
        expense: Option<Expense>,
    ) -> FullPlace {
        FullPlace {
            id: self.id,
            name: self.name,
            story: self.story,
            date: self.date,
            images,
            expenses: expense,
            preview,
        }
    }
}
