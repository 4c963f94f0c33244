// src/db/place_repository.rs
// DOCUMENTATION: Database access for the `places` table
// PURPOSE: Single-statement CRUD for places and their image/expense references

use crate::db::ensure_updated;
use crate::errors::TravelError;
use crate::models::{CreatePlaceRequest, Place, UpdatePlaceRequest};
use sqlx::PgExecutor;
use uuid::Uuid;

const PLACE_COLUMNS: &str =
    "id, name, story, date, images, expenses, COALESCE(preview, '') AS preview";

pub struct PlaceRepository;

impl PlaceRepository {
    /// Insert a place with a fresh id; images, preview and expense start empty
    pub async fn create<'e, E>(executor: E, req: &CreatePlaceRequest) -> Result<Place, TravelError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            r#"
            INSERT INTO places (id, name, story, date)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PLACE_COLUMNS
        );

        let place = sqlx::query_as::<_, Place>(&sql)
            .bind(Uuid::new_v4())
            .bind(&req.name)
            .bind(&req.story)
            .bind(req.date)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to create place: {}", e);
                TravelError::from(e)
            })?;

        Ok(place)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Place>, TravelError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT {} FROM places WHERE id = $1", PLACE_COLUMNS);

        sqlx::query_as::<_, Place>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch place {}: {}", id, e);
                TravelError::from(e)
            })
    }

    /// Like find_by_id, but a missing row is a (500-class) NotFound error
    pub async fn get_by_id<'e, E>(executor: E, id: Uuid) -> Result<Place, TravelError>
    where
        E: PgExecutor<'e>,
    {
        Self::find_by_id(executor, id)
            .await?
            .ok_or_else(|| TravelError::NotFound(format!("place {} not found", id)))
    }

    /// Overwrite name, story and date
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        req: &UpdatePlaceRequest,
    ) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE places SET name = $1, story = $2, date = $3 WHERE id = $4")
            .bind(&req.name)
            .bind(&req.story)
            .bind(req.date)
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to update place {}: {}", id, e);
                TravelError::from(e)
            })?;

        ensure_updated(result, "places", id)
    }

    /// Link an expense to the place, replacing any previous link
    pub async fn set_expense<'e, E>(
        executor: E,
        place_id: Uuid,
        expense_id: Uuid,
    ) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE places SET expenses = $1 WHERE id = $2")
            .bind(expense_id)
            .bind(place_id)
            .execute(executor)
            .await
            .map_err(|e| {
                log::error!(
                    "Failed to link expense {} to place {}: {}",
                    expense_id,
                    place_id,
                    e
                );
                TravelError::from(e)
            })?;

        ensure_updated(result, "places", place_id)
    }

    pub async fn set_preview<'e, E>(executor: E, id: Uuid, path: &str) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE places SET preview = $1 WHERE id = $2")
            .bind(path)
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to set preview of place {}: {}", id, e);
                TravelError::from(e)
            })?;

        ensure_updated(result, "places", id)
    }

    /// Replace the whole image list in one statement
    pub async fn set_images<'e, E>(
        executor: E,
        id: Uuid,
        paths: &[String],
    ) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE places SET images = $1 WHERE id = $2")
            .bind(paths)
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to set images of place {}: {}", id, e);
                TravelError::from(e)
            })?;

        ensure_updated(result, "places", id)
    }

    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to delete place {}: {}", id, e);
                TravelError::from(e)
            })?;

        Ok(())
    }
}
