// src/services/expense_service.rs
// DOCUMENTATION: Business logic for expenses

use crate::db::{ExpenseRepository, PlaceRepository};
use crate::errors::TravelError;
use crate::models::{Expense, ExpenseRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ExpenseService;

impl ExpenseService {
    /// Create an expense and link it from the place
    /// DOCUMENTATION: Both writes share one transaction; linking to a missing
    /// place rolls the expense back
    pub async fn create_expense(
        pool: &PgPool,
        place_id: Uuid,
        req: ExpenseRequest,
    ) -> Result<Expense, TravelError> {
        let mut tx = pool.begin().await?;

        let expense = ExpenseRepository::create(&mut *tx, req).await?;
        PlaceRepository::set_expense(&mut *tx, place_id, expense.id).await?;

        tx.commit().await?;
        log::info!("Created expense {} for place {}", expense.id, place_id);
        Ok(expense)
    }

    pub async fn get_expense(pool: &PgPool, expense_id: Uuid) -> Result<Expense, TravelError> {
        ExpenseRepository::get_by_id(pool, expense_id).await
    }

    pub async fn update_expense(
        pool: &PgPool,
        expense_id: Uuid,
        req: ExpenseRequest,
    ) -> Result<Expense, TravelError> {
        ExpenseRepository::update(pool, expense_id, req).await
    }

    /// Delete unconditionally; a place may keep pointing at the removed id
    pub async fn delete_expense(pool: &PgPool, expense_id: Uuid) -> Result<(), TravelError> {
        ExpenseRepository::delete(pool, expense_id).await?;
        log::info!("Deleted expense {}", expense_id);
        Ok(())
    }
}
