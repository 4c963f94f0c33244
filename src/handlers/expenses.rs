// src/handlers/expenses.rs
// DOCUMENTATION: HTTP handlers for expense operations

use crate::errors::TravelError;
use crate::models::ExpenseRequest;
use crate::services::ExpenseService;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// POST /api/expenses/{place_uuid}
/// Create an expense and link it to the place
pub async fn create_expense(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<ExpenseRequest>,
) -> Result<impl Responder, TravelError> {
    let expense =
        ExpenseService::create_expense(pool.get_ref(), path.into_inner(), req.into_inner())
            .await?;
    Ok(HttpResponse::Created().json(expense))
}

/// GET /api/expenses/{uuid}
pub async fn get_expense(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let expense = ExpenseService::get_expense(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(expense))
}

/// PUT /api/expenses/{uuid}
pub async fn update_expense(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<ExpenseRequest>,
) -> Result<impl Responder, TravelError> {
    let expense =
        ExpenseService::update_expense(pool.get_ref(), path.into_inner(), req.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(expense))
}

/// DELETE /api/expenses/{uuid}
pub async fn delete_expense(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    ExpenseService::delete_expense(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Configuration for expense routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/expenses")
            .route("/{uuid}", web::post().to(create_expense))
            .route("/{uuid}", web::get().to(get_expense))
            .route("/{uuid}", web::put().to(update_expense))
            .route("/{uuid}", web::delete().to(delete_expense)),
    );
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;
    use uuid::Uuid;

    #[actix_rt::test]
    async fn test_expense_routes_reject_bad_uuid() {
        let app = test_app!().await;

        let req = test::TestRequest::get().uri("/api/expenses/abc").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete().uri("/api/expenses/abc").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_create_expense_rejects_non_integer_costs() {
        let app = test_app!().await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/expenses/{}", Uuid::new_v4()))
            .set_json(json!({"road": "a lot"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
