// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::TravelError;
use crate::handlers::multipart;
use crate::models::{CreatePlaceRequest, UpdatePlaceRequest};
use crate::services::{ImageStore, PlaceService};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// POST /api/place/{travel_uuid}
/// Create a place and attach it to the travel
pub async fn create_place(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<CreatePlaceRequest>,
) -> Result<impl Responder, TravelError> {
    let place =
        PlaceService::create_place(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(place))
}

/// PUT /api/place/{travel_uuid}/{place_uuid}
/// Raw request body is the preview image
pub async fn set_place_preview(
    pool: web::Data<PgPool>,
    store: web::Data<ImageStore>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Payload,
) -> Result<impl Responder, TravelError> {
    let (travel_id, place_id) = path.into_inner();
    PlaceService::set_preview(pool.get_ref(), store.get_ref(), travel_id, place_id, body).await?;
    Ok(HttpResponse::Ok().finish())
}

/// PUT /api/place/images/{travel_uuid}/{place_uuid}
/// multipart/form-data, one or more files under `image`; replaces the image set
pub async fn set_place_images(
    pool: web::Data<PgPool>,
    store: web::Data<ImageStore>,
    path: web::Path<(Uuid, Uuid)>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<impl Responder, TravelError> {
    let (travel_id, place_id) = path.into_inner();
    let uploads = multipart::read_images(multipart::content_type(&req)?, body).await?;

    PlaceService::set_images(pool.get_ref(), store.get_ref(), travel_id, place_id, uploads)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// PUT /api/place/{uuid}
pub async fn update_place(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePlaceRequest>,
) -> Result<impl Responder, TravelError> {
    PlaceService::update_place(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /api/place/{travel_uuid}/{place_uuid}
/// Removes the place row and its images
pub async fn delete_place(
    pool: web::Data<PgPool>,
    store: web::Data<ImageStore>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, TravelError> {
    let (travel_id, place_id) = path.into_inner();
    PlaceService::delete_place(pool.get_ref(), store.get_ref(), travel_id, place_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/place")
            .route("/images/{travel_uuid}/{place_uuid}", web::put().to(set_place_images))
            .route("/{travel_uuid}/{place_uuid}", web::put().to(set_place_preview))
            .route("/{travel_uuid}/{place_uuid}", web::delete().to(delete_place))
            .route("/{travel_uuid}", web::post().to(create_place))
            .route("/{uuid}", web::put().to(update_place)),
    );
}
