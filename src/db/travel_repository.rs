// src/db/travel_repository.rs
// DOCUMENTATION: Database access for the `travel` table
// PURPOSE: Single-statement CRUD, callers compose them (optionally inside a transaction)

use crate::db::ensure_updated;
use crate::errors::TravelError;
use crate::models::{CreateTravelRequest, Travel, TravelCard, UpdateTravelRequest};
use sqlx::PgExecutor;
use uuid::Uuid;

const TRAVEL_COLUMNS: &str =
    "id, name, description, date_start, date_end, places, COALESCE(preview, '') AS preview";

/// TravelRepository: All database operations for travels
/// DOCUMENTATION: Every method accepts any Postgres executor, so the same
/// statement runs against the pool or inside an open transaction
pub struct TravelRepository;

impl TravelRepository {
    /// Insert a travel with a fresh server-side id and no places/preview
    pub async fn create<'e, E>(executor: E, req: &CreateTravelRequest) -> Result<Travel, TravelError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            INSERT INTO travel (id, name, description, date_start, date_end)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            TRAVEL_COLUMNS
        );

        let travel = sqlx::query_as::<_, Travel>(&sql)
            .bind(Uuid::new_v4())
            .bind(&req.name)
            .bind(&req.description)
            .bind(req.date_start)
            .bind(req.date_end)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to create travel: {}", e);
                TravelError::from(e)
            })?;

        Ok(travel)
    }

    /// Retrieve travel by id
    /// DOCUMENTATION: A missing row is reported as NotFound (still a 500)
    pub async fn get_by_id<'e, E>(executor: E, id: Uuid) -> Result<Travel, TravelError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT {} FROM travel WHERE id = $1", TRAVEL_COLUMNS);

        sqlx::query_as::<_, Travel>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch travel {}: {}", id, e);
                TravelError::from(e)
            })?
            .ok_or_else(|| TravelError::NotFound(format!("travel {} not found", id)))
    }

    /// All travels as summary cards, oldest trip first
    pub async fn list_cards<'e, E>(executor: E) -> Result<Vec<TravelCard>, TravelError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TravelCard>(
            r#"
            SELECT id, name, date_start, date_end, COALESCE(preview, '') AS preview
            FROM travel
            ORDER BY date_start ASC, name ASC
            "#,
        )
        .fetch_all(executor)
        .await
        .map_err(|e| {
            log::error!("Failed to list travels: {}", e);
            TravelError::from(e)
        })
    }

    /// Overwrite name, description and dates; places and preview stay untouched
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        req: &UpdateTravelRequest,
    ) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            UPDATE travel
            SET name = $1, description = $2, date_start = $3, date_end = $4
            WHERE id = $5
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.date_start)
        .bind(req.date_end)
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            log::error!("Failed to update travel {}: {}", id, e);
            TravelError::from(e)
        })?;

        ensure_updated(result, "travel", id)
    }

    /// Record the preview image path
    pub async fn set_preview<'e, E>(executor: E, id: Uuid, path: &str) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE travel SET preview = $1 WHERE id = $2")
            .bind(path)
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to set preview of travel {}: {}", id, e);
                TravelError::from(e)
            })?;

        ensure_updated(result, "travel", id)
    }

    /// Append a place id to the end of the travel's place list
    pub async fn add_place<'e, E>(
        executor: E,
        travel_id: Uuid,
        place_id: Uuid,
    ) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE travel SET places = array_append(places, $1) WHERE id = $2")
            .bind(place_id)
            .bind(travel_id)
            .execute(executor)
            .await
            .map_err(|e| {
                log::error!(
                    "Failed to attach place {} to travel {}: {}",
                    place_id,
                    travel_id,
                    e
                );
                TravelError::from(e)
            })?;

        ensure_updated(result, "travel", travel_id)
    }

    /// Delete the travel row only; owned places are handled by the caller
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("DELETE FROM travel WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to delete travel {}: {}", id, e);
                TravelError::from(e)
            })?;

        Ok(())
    }
}
