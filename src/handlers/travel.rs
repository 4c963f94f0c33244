// src/handlers/travel.rs
// DOCUMENTATION: HTTP handlers for travel operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::TravelError;
use crate::models::{CreateTravelRequest, UpdateTravelRequest};
use crate::services::{ImageStore, TravelService};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// POST /api/travel
/// Create a new travel
pub async fn create_travel(
    pool: web::Data<PgPool>,
    req: web::Json<CreateTravelRequest>,
) -> Result<impl Responder, TravelError> {
    let travel = TravelService::create_travel(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(travel))
}

/// GET /api/travel
/// List all travels as cards
pub async fn list_travels(
    pool: web::Data<PgPool>,
    store: web::Data<ImageStore>,
) -> Result<impl Responder, TravelError> {
    let cards = TravelService::list_travels(pool.get_ref(), store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(cards))
}

/// PUT /api/travel/preview/{uuid}
/// Raw request body is the image
pub async fn set_travel_preview(
    pool: web::Data<PgPool>,
    store: web::Data<ImageStore>,
    path: web::Path<Uuid>,
    body: web::Payload,
) -> Result<impl Responder, TravelError> {
    TravelService::set_preview(pool.get_ref(), store.get_ref(), path.into_inner(), body).await?;
    Ok(HttpResponse::Ok().finish())
}

/// GET /api/travel/{uuid}
/// Full travel with places, expenses and embedded images
pub async fn get_travel(
    pool: web::Data<PgPool>,
    store: web::Data<ImageStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let travel =
        TravelService::get_travel(pool.get_ref(), store.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(travel))
}

/// PUT /api/travel/{uuid}
pub async fn update_travel(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTravelRequest>,
) -> Result<impl Responder, TravelError> {
    TravelService::update_travel(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /api/travel/{uuid}
/// Cascades to places, their expenses and the image directory
pub async fn delete_travel(
    pool: web::Data<PgPool>,
    store: web::Data<ImageStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    TravelService::delete_travel(pool.get_ref(), store.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Configuration for travel routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/travel")
            .route("", web::post().to(create_travel))
            .route("", web::get().to(list_travels))
            .route("/preview/{uuid}", web::put().to(set_travel_preview))
            .route("/{uuid}", web::get().to(get_travel))
            .route("/{uuid}", web::put().to(update_travel))
            .route("/{uuid}", web::delete().to(delete_travel)),
    );
}
