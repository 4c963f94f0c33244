// src/models/expense.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Cost breakdown of a place, in whatever currency unit the client uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub road: i64,
    pub residence: i64,
    pub food: i64,
    pub entertainment: i64,
    pub other: i64,
}

/// Request to create or overwrite an expense
/// DOCUMENTATION: Missing categories count as zero
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseRequest {
    #[serde(default)]
    pub road: i64,
    #[serde(default)]
    pub residence: i64,
    #[serde(default)]
    pub food: i64,
    #[serde(default)]
    pub entertainment: i64,
    #[serde(default)]
    pub other: i64,
}

impl ExpenseRequest {
    /// Attach a server-side identity to the request body
    pub fn into_expense(self, id: Uuid) -> Expense {
        Expense {
            id,
            road: self.road,
            residence: self.residence,
            food: self.food,
            entertainment: self.entertainment,
            other: self.other,
        }
    }
}
