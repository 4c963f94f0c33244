// src/services/place_service.rs
// DOCUMENTATION: Business logic for places
// PURPOSE: Intermediary between handlers and repositories, owns image side effects

use crate::db::{PlaceRepository, TravelRepository};
use crate::errors::TravelError;
use crate::models::{CreatePlaceRequest, Place, UpdatePlaceRequest};
use crate::services::ImageStore;
use actix_web::web::Bytes;
use futures_util::Stream;
use sqlx::PgPool;
use std::collections::HashSet;
use std::fmt::Display;
use std::path::Path;
use uuid::Uuid;

/// One uploaded image file as received from the client
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub data: Bytes,
}

pub struct PlaceService;

impl PlaceService {
    /// Create a place and append it to the travel's place list
    /// DOCUMENTATION: Insert and attach share one transaction; a missing
    /// travel rolls the insert back instead of leaving an orphaned place
    pub async fn create_place(
        pool: &PgPool,
        travel_id: Uuid,
        req: CreatePlaceRequest,
    ) -> Result<Place, TravelError> {
        let mut tx = pool.begin().await?;

        let place = PlaceRepository::create(&mut *tx, &req).await?;
        TravelRepository::add_place(&mut *tx, travel_id, place.id).await?;

        tx.commit().await?;
        log::info!("Created place {} in travel {}", place.id, travel_id);
        Ok(place)
    }

    /// Store the uploaded body as the place preview
    pub async fn set_preview<S, B, E>(
        pool: &PgPool,
        store: &ImageStore,
        travel_id: Uuid,
        place_id: Uuid,
        body: S,
    ) -> Result<(), TravelError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: Display,
    {
        let mut staged = store
            .stage(store.place_preview_path(travel_id, place_id))
            .await?;
        staged.write_stream(body).await?;
        staged.finish().await?;

        if let Err(e) = PlaceRepository::set_preview(pool, place_id, &staged.target_path()).await {
            drop(staged);
            if matches!(e, TravelError::NotFound(_)) {
                store.discard_dir(&store.place_dir(travel_id, place_id)).await;
            }
            return Err(e);
        }
        staged.commit().await?;

        log::info!("Set preview of place {}", place_id);
        Ok(())
    }

    /// Replace the place's image set with the uploaded files
    /// DOCUMENTATION: The list is overwritten, never appended to. Files of the
    /// previous set that are not part of the new one are removed afterwards.
    pub async fn set_images(
        pool: &PgPool,
        store: &ImageStore,
        travel_id: Uuid,
        place_id: Uuid,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<String>, TravelError> {
        let previous = PlaceRepository::get_by_id(pool, place_id).await?.images;

        let mut staged = Vec::with_capacity(uploads.len());
        for upload in &uploads {
            let target = store.place_image_path(travel_id, place_id, &upload.file_name)?;
            let mut image = store.stage(target).await?;
            image.write_all(&upload.data).await?;
            image.finish().await?;
            staged.push(image);
        }

        let paths: Vec<String> = staged.iter().map(|image| image.target_path()).collect();
        PlaceRepository::set_images(pool, place_id, &paths).await?;

        for image in staged {
            image.commit().await?;
        }

        let current: HashSet<&str> = paths.iter().map(String::as_str).collect();
        for stale in previous.iter().filter(|p| !p.is_empty() && !current.contains(p.as_str())) {
            if let Err(e) = store.remove_file(Path::new(stale)).await {
                log::warn!("Failed to remove replaced image {}: {}", stale, e);
            }
        }

        log::info!("Set {} image(s) on place {}", paths.len(), place_id);
        Ok(paths)
    }

    /// Overwrite name, story and date
    pub async fn update_place(
        pool: &PgPool,
        place_id: Uuid,
        req: UpdatePlaceRequest,
    ) -> Result<(), TravelError> {
        PlaceRepository::update(pool, place_id, &req).await
    }

    /// Remove the place's image tree, then its row
    /// DOCUMENTATION: The id stays in the owning travel's place list and a
    /// linked expense is kept; see DESIGN.md for the open product decision
    pub async fn delete_place(
        pool: &PgPool,
        store: &ImageStore,
        travel_id: Uuid,
        place_id: Uuid,
    ) -> Result<(), TravelError> {
        store
            .remove_dir(&store.place_dir(travel_id, place_id))
            .await?;
        PlaceRepository::delete(pool, place_id).await?;

        log::info!("Deleted place {} of travel {}", place_id, travel_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateTravelRequest, ExpenseRequest};
    use crate::services::{ExpenseService, TravelService};
    use chrono::NaiveDate;
    use futures_util::stream;

    fn scratch_store() -> ImageStore {
        ImageStore::new(std::env::temp_dir().join(format!("place-service-{}", Uuid::new_v4())))
    }

    fn upload(file_name: &str, data: &'static [u8]) -> ImageUpload {
        ImageUpload {
            file_name: file_name.into(),
            data: Bytes::from_static(data),
        }
    }

    async fn travel_with_place(pool: &PgPool) -> (Uuid, Place) {
        let travel = TravelService::create_travel(
            pool,
            CreateTravelRequest {
                name: "Kyoto".into(),
                description: String::new(),
                date_start: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
                date_end: NaiveDate::from_ymd_opt(2023, 4, 9).unwrap(),
            },
        )
        .await
        .unwrap();
        let place = PlaceService::create_place(
            pool,
            travel.id,
            CreatePlaceRequest {
                name: "Fushimi Inari".into(),
                ..CreatePlaceRequest::default()
            },
        )
        .await
        .unwrap();
        (travel.id, place)
    }

    async fn place_count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM places")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_create_appends_to_travel(pool: PgPool) {
        let (travel_id, place) = travel_with_place(&pool).await;

        assert!(place.images.is_empty());
        assert!(place.preview.is_empty());
        assert!(place.expenses.is_none());

        let travel = TravelRepository::get_by_id(&pool, travel_id).await.unwrap();
        assert_eq!(travel.places, vec![place.id]);
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_create_for_unknown_travel_rolls_back(pool: PgPool) {
        let err = PlaceService::create_place(&pool, Uuid::new_v4(), CreatePlaceRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TravelError::NotFound(_)));
        assert_eq!(place_count(&pool).await, 0);
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_set_images_replaces_previous_set(pool: PgPool) {
        let store = scratch_store();
        let (travel_id, place) = travel_with_place(&pool).await;

        let first = PlaceService::set_images(
            &pool,
            &store,
            travel_id,
            place.id,
            vec![upload("a.jpg", b"a")],
        )
        .await
        .unwrap();
        assert_eq!(first.len(), 1);

        let second = PlaceService::set_images(
            &pool,
            &store,
            travel_id,
            place.id,
            vec![upload("b.jpg", b"b"), upload("c.jpg", b"c")],
        )
        .await
        .unwrap();

        let images_dir = store.place_dir(travel_id, place.id).join("images");
        let expected: Vec<String> = ["b.jpg", "c.jpg"]
            .iter()
            .map(|name| images_dir.join(name).to_string_lossy().into_owned())
            .collect();
        assert_eq!(second, expected);

        let stored = PlaceRepository::get_by_id(&pool, place.id).await.unwrap();
        assert_eq!(stored.images, expected);
        assert!(!images_dir.join("a.jpg").exists());
        assert!(images_dir.join("b.jpg").exists());
        assert!(images_dir.join("c.jpg").exists());

        store.remove_dir(store.root()).await.unwrap();
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_set_preview_of_unknown_place_leaves_no_directory(pool: PgPool) {
        let store = scratch_store();
        let (travel_id, _) = travel_with_place(&pool).await;
        let unknown = Uuid::new_v4();

        let body = stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from_static(b"jpeg"))]);
        let err = PlaceService::set_preview(&pool, &store, travel_id, unknown, body)
            .await
            .unwrap_err();

        assert!(matches!(err, TravelError::NotFound(_)));
        assert!(!store.place_dir(travel_id, unknown).exists());

        store.remove_dir(store.root()).await.unwrap();
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_delete_keeps_travel_link_and_expense(pool: PgPool) {
        let store = scratch_store();
        let (travel_id, place) = travel_with_place(&pool).await;
        let expense = ExpenseService::create_expense(&pool, place.id, ExpenseRequest::default())
            .await
            .unwrap();
        PlaceService::set_images(&pool, &store, travel_id, place.id, vec![upload("a.jpg", b"a")])
            .await
            .unwrap();

        PlaceService::delete_place(&pool, &store, travel_id, place.id)
            .await
            .unwrap();

        assert!(PlaceRepository::find_by_id(&pool, place.id).await.unwrap().is_none());
        assert!(!store.place_dir(travel_id, place.id).exists());
        let travel = TravelRepository::get_by_id(&pool, travel_id).await.unwrap();
        assert_eq!(travel.places, vec![place.id]);
        assert!(ExpenseService::get_expense(&pool, expense.id).await.is_ok());

        store.remove_dir(store.root()).await.unwrap();
    }
}
