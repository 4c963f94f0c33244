// src/db/expense_repository.rs
// DOCUMENTATION: Database access for the `expenses` table

use crate::errors::TravelError;
use crate::models::{Expense, ExpenseRequest};
use sqlx::PgExecutor;
use uuid::Uuid;

pub struct ExpenseRepository;

impl ExpenseRepository {
    pub async fn create<'e, E>(executor: E, req: ExpenseRequest) -> Result<Expense, TravelError>
    where
        E: PgExecutor<'e>,
    {
        let expense = req.into_expense(Uuid::new_v4());

        sqlx::query(
            r#"
            INSERT INTO expenses (id, road, residence, food, entertainment, other)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(expense.id)
        .bind(expense.road)
        .bind(expense.residence)
        .bind(expense.food)
        .bind(expense.entertainment)
        .bind(expense.other)
        .execute(executor)
        .await
        .map_err(|e| {
            log::error!("Failed to create expense: {}", e);
            TravelError::from(e)
        })?;

        Ok(expense)
    }

    pub async fn get_by_id<'e, E>(executor: E, id: Uuid) -> Result<Expense, TravelError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Expense>(
            "SELECT id, road, residence, food, entertainment, other FROM expenses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch expense {}: {}", id, e);
            TravelError::from(e)
        })?
        .ok_or_else(|| TravelError::NotFound(format!("expense {} not found", id)))
    }

    /// Overwrite all five categories and return the stored record
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        req: ExpenseRequest,
    ) -> Result<Expense, TravelError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET road = $1, residence = $2, food = $3, entertainment = $4, other = $5
            WHERE id = $6
            RETURNING id, road, residence, food, entertainment, other
            "#,
        )
        .bind(req.road)
        .bind(req.residence)
        .bind(req.food)
        .bind(req.entertainment)
        .bind(req.other)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            log::error!("Failed to update expense {}: {}", id, e);
            TravelError::from(e)
        })?
        .ok_or_else(|| TravelError::NotFound(format!("expense {} not found", id)))
    }

    /// Unconditional delete; places still pointing at the id are not touched
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<(), TravelError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                log::error!("Failed to delete expense {}: {}", id, e);
                TravelError::from(e)
            })?;

        Ok(())
    }
}
