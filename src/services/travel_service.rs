// src/services/travel_service.rs
// DOCUMENTATION: Business logic for travels
// PURPOSE: Compose travel, place and expense repositories with the image store

use crate::db::{ExpenseRepository, PlaceRepository, TravelRepository};
use crate::errors::TravelError;
use crate::models::{
    CreateTravelRequest, FullPlace, FullTravel, Place, Travel, TravelCard, UpdateTravelRequest,
};
use crate::services::ImageStore;
use futures_util::Stream;
use sqlx::PgPool;
use std::fmt::Display;
use uuid::Uuid;

pub struct TravelService;

impl TravelService {
    /// Create a new travel (no places, no preview)
    pub async fn create_travel(
        pool: &PgPool,
        req: CreateTravelRequest,
    ) -> Result<Travel, TravelError> {
        let travel = TravelRepository::create(pool, &req).await?;
        log::info!("Created travel with id: {}", travel.id);
        Ok(travel)
    }

    /// All travels as cards with their previews embedded
    pub async fn list_travels(
        pool: &PgPool,
        store: &ImageStore,
    ) -> Result<Vec<TravelCard>, TravelError> {
        let mut cards = TravelRepository::list_cards(pool).await?;
        for card in &mut cards {
            card.preview = store.load_reference(&card.preview).await?;
        }
        Ok(cards)
    }

    /// Store the uploaded body as the travel preview
    /// DOCUMENTATION: Bytes land in a staging file first; they are moved to
    /// travel/{id}/preview.jpg only after the row records that path. An
    /// unknown travel leaves no directory behind.
    pub async fn set_preview<S, B, E>(
        pool: &PgPool,
        store: &ImageStore,
        travel_id: Uuid,
        body: S,
    ) -> Result<(), TravelError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: Display,
    {
        let mut staged = store.stage(store.travel_preview_path(travel_id)).await?;
        let size = staged.write_stream(body).await?;
        staged.finish().await?;

        if let Err(e) = TravelRepository::set_preview(pool, travel_id, &staged.target_path()).await {
            drop(staged);
            if matches!(e, TravelError::NotFound(_)) {
                store.discard_dir(&store.travel_dir(travel_id)).await;
            }
            return Err(e);
        }
        staged.commit().await?;

        log::info!("Set preview of travel {} ({} bytes)", travel_id, size);
        Ok(())
    }

    /// Full aggregate: every place inlined, every image embedded, expenses inlined
    /// DOCUMENTATION: Any failed lookup aborts the whole response
    pub async fn get_travel(
        pool: &PgPool,
        store: &ImageStore,
        travel_id: Uuid,
    ) -> Result<FullTravel, TravelError> {
        let travel = TravelRepository::get_by_id(pool, travel_id).await?;
        let preview = store.load_reference(&travel.preview).await?;

        let mut places = Vec::with_capacity(travel.places.len());
        for place_id in &travel.places {
            let place = PlaceRepository::get_by_id(pool, *place_id).await?;
            places.push(Self::resolve_place(pool, store, place).await?);
        }

        Ok(travel.into_full(places, preview))
    }

    async fn resolve_place(
        pool: &PgPool,
        store: &ImageStore,
        place: Place,
    ) -> Result<FullPlace, TravelError> {
        let images = store.load_all(&place.images).await?;
        let preview = store.load_reference(&place.preview).await?;
        let expense = match place.expenses {
            Some(expense_id) => Some(ExpenseRepository::get_by_id(pool, expense_id).await?),
            None => None,
        };

        Ok(place.into_full(images, preview, expense))
    }

    /// Overwrite name, description and dates
    pub async fn update_travel(
        pool: &PgPool,
        travel_id: Uuid,
        req: UpdateTravelRequest,
    ) -> Result<(), TravelError> {
        TravelRepository::update(pool, travel_id, &req).await
    }

    /// Delete a travel with its places, their expenses and its image tree
    /// DOCUMENTATION: All row deletions share one transaction, so a failure
    /// leaves every row in place. The image directory goes only after commit.
    /// A place id listed on the travel whose row is already gone is skipped.
    pub async fn delete_travel(
        pool: &PgPool,
        store: &ImageStore,
        travel_id: Uuid,
    ) -> Result<(), TravelError> {
        let mut tx = pool.begin().await?;

        let travel = TravelRepository::get_by_id(&mut *tx, travel_id).await?;
        TravelRepository::delete(&mut *tx, travel_id).await?;

        for place_id in &travel.places {
            let place = match PlaceRepository::find_by_id(&mut *tx, *place_id).await? {
                Some(place) => place,
                None => {
                    log::warn!(
                        "Travel {} lists place {} which no longer exists",
                        travel_id,
                        place_id
                    );
                    continue;
                }
            };

            if let Some(expense_id) = place.expenses {
                ExpenseRepository::delete(&mut *tx, expense_id).await?;
            }
            PlaceRepository::delete(&mut *tx, place.id).await?;
        }

        tx.commit().await?;
        log::info!(
            "Deleted travel {} with {} place(s)",
            travel_id,
            travel.places.len()
        );

        store.remove_dir(&store.travel_dir(travel_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatePlaceRequest, ExpenseRequest};
    use crate::services::{ExpenseService, ImageUpload, PlaceService};
    use actix_web::web::Bytes;
    use actix_web::ResponseError;
    use chrono::NaiveDate;
    use futures_util::stream;

    fn scratch_store() -> ImageStore {
        ImageStore::new(std::env::temp_dir().join(format!("travel-service-{}", Uuid::new_v4())))
    }

    fn jpeg_body(bytes: &'static [u8]) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Unpin {
        stream::iter(vec![Ok(Bytes::from_static(bytes))])
    }

    fn summer_trip() -> CreateTravelRequest {
        CreateTravelRequest {
            name: "Lisbon".into(),
            description: "Two weeks by the sea".into(),
            date_start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            date_end: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
        }
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_create_then_get_has_no_places(pool: PgPool) {
        let store = scratch_store();
        let created = TravelService::create_travel(&pool, summer_trip()).await.unwrap();

        let full = TravelService::get_travel(&pool, &store, created.id).await.unwrap();
        assert_eq!(full.id, created.id);
        assert_eq!(full.name, "Lisbon");
        assert_eq!(full.description, "Two weeks by the sea");
        assert_eq!(full.date_start, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(full.date_end, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert!(full.places.is_empty());
        assert!(full.preview.is_empty());

        let cards = TravelService::list_travels(&pool, &store).await.unwrap();
        assert!(cards.iter().any(|card| card.id == created.id));
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_get_inlines_places_and_expense(pool: PgPool) {
        let store = scratch_store();
        let travel = TravelService::create_travel(&pool, summer_trip()).await.unwrap();
        TravelService::set_preview(&pool, &store, travel.id, jpeg_body(&[1, 2, 3]))
            .await
            .unwrap();

        let with_costs = PlaceService::create_place(
            &pool,
            travel.id,
            CreatePlaceRequest {
                name: "Alfama".into(),
                story: "Fado at night".into(),
                date: NaiveDate::from_ymd_opt(2024, 6, 2),
            },
        )
        .await
        .unwrap();
        let plain = PlaceService::create_place(
            &pool,
            travel.id,
            CreatePlaceRequest {
                name: "Belem".into(),
                ..CreatePlaceRequest::default()
            },
        )
        .await
        .unwrap();

        let expense = ExpenseService::create_expense(
            &pool,
            with_costs.id,
            ExpenseRequest {
                road: 10,
                food: 35,
                ..ExpenseRequest::default()
            },
        )
        .await
        .unwrap();

        let full = TravelService::get_travel(&pool, &store, travel.id).await.unwrap();
        assert_eq!(full.preview, "data:image/jpeg;base64,AQID");
        assert_eq!(full.places.len(), 2);

        assert_eq!(full.places[0].id, with_costs.id);
        assert_eq!(full.places[0].expenses.as_ref(), Some(&expense));
        assert_eq!(full.places[0].date, NaiveDate::from_ymd_opt(2024, 6, 2));

        assert_eq!(full.places[1].id, plain.id);
        assert!(full.places[1].expenses.is_none());
        assert!(full.places[1].date.is_none());

        store.remove_dir(store.root()).await.unwrap();
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_delete_cascades_to_places_expenses_and_images(pool: PgPool) {
        let store = scratch_store();
        let travel = TravelService::create_travel(&pool, summer_trip()).await.unwrap();
        TravelService::set_preview(&pool, &store, travel.id, jpeg_body(b"jpeg"))
            .await
            .unwrap();

        let place = PlaceService::create_place(&pool, travel.id, CreatePlaceRequest::default())
            .await
            .unwrap();
        let expense = ExpenseService::create_expense(&pool, place.id, ExpenseRequest::default())
            .await
            .unwrap();
        PlaceService::set_images(
            &pool,
            &store,
            travel.id,
            place.id,
            vec![ImageUpload {
                file_name: "a.jpg".into(),
                data: Bytes::from_static(b"a"),
            }],
        )
        .await
        .unwrap();
        assert!(store.travel_dir(travel.id).exists());

        TravelService::delete_travel(&pool, &store, travel.id).await.unwrap();

        let err = TravelService::get_travel(&pool, &store, travel.id)
            .await
            .unwrap_err();
        assert!(matches!(err, TravelError::NotFound(_)));
        assert!(PlaceRepository::find_by_id(&pool, place.id).await.unwrap().is_none());
        assert!(ExpenseRepository::get_by_id(&pool, expense.id).await.is_err());
        assert!(!store.travel_dir(travel.id).exists());
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_deleted_place_breaks_aggregate(pool: PgPool) {
        let store = scratch_store();
        let travel = TravelService::create_travel(&pool, summer_trip()).await.unwrap();
        let place = PlaceService::create_place(&pool, travel.id, CreatePlaceRequest::default())
            .await
            .unwrap();

        PlaceService::delete_place(&pool, &store, travel.id, place.id)
            .await
            .unwrap();

        let listed = TravelRepository::get_by_id(&pool, travel.id).await.unwrap();
        assert_eq!(listed.places, vec![place.id]);

        let err = TravelService::get_travel(&pool, &store, travel.id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);

        // the dangling id does not block deleting the travel
        TravelService::delete_travel(&pool, &store, travel.id).await.unwrap();
        assert!(TravelRepository::get_by_id(&pool, travel.id).await.is_err());
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_preview_of_unknown_travel_leaves_no_directory(pool: PgPool) {
        let store = scratch_store();
        let unknown = Uuid::new_v4();

        let err = TravelService::set_preview(&pool, &store, unknown, jpeg_body(b"jpeg"))
            .await
            .unwrap_err();
        assert!(matches!(err, TravelError::NotFound(_)));
        assert!(!store.travel_dir(unknown).exists());

        store.remove_dir(store.root()).await.unwrap();
    }

    #[sqlx::test(migrator = "crate::config::MIGRATOR")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_update_overwrites_fields(pool: PgPool) {
        let store = scratch_store();
        let travel = TravelService::create_travel(&pool, summer_trip()).await.unwrap();

        let mut changed = summer_trip();
        changed.name = "Porto".into();
        changed.date_end = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        TravelService::update_travel(&pool, travel.id, changed).await.unwrap();

        let full = TravelService::get_travel(&pool, &store, travel.id).await.unwrap();
        assert_eq!(full.name, "Porto");
        assert_eq!(full.date_end, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());

        let err = TravelService::update_travel(&pool, Uuid::new_v4(), summer_trip())
            .await
            .unwrap_err();
        assert!(matches!(err, TravelError::NotFound(_)));
    }
}
