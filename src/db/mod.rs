// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod expense_repository;
pub mod place_repository;
pub mod travel_repository;

pub use expense_repository::*;
pub use place_repository::*;
pub use travel_repository::*;

use crate::errors::TravelError;
use sqlx::postgres::PgQueryResult;
use uuid::Uuid;

/// Turn an UPDATE that matched nothing into a downstream failure
pub(crate) fn ensure_updated(
    result: PgQueryResult,
    table: &str,
    id: Uuid,
) -> Result<(), TravelError> {
    if result.rows_affected() == 0 {
        log::error!("No row in {} with id {}", table, id);
        return Err(TravelError::NotFound(format!(
            "no row in {} with id {}",
            table, id
        )));
    }
    Ok(())
}
