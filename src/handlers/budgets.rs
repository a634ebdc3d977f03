use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::date_utils::TargetMonth;
use crate::db::queries::budgets;
use crate::error::{AppError, AppResult};
use crate::handlers::require;
use crate::models::transaction::cents_from_decimal;
use crate::models::{Budget, NewBudget};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BudgetPayload {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// All budgets, narrowed to one (month, year) when both params are given.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Budget>>> {
    let target = match (params.month, params.year) {
        (Some(month), Some(year)) => {
            let target = TargetMonth { month, year };
            target.validate().map_err(AppError::Validation)?;
            Some((month, year))
        }
        _ => None,
    };

    let conn = state.db.get()?;
    Ok(Json(budgets::list_budgets(&conn, target)?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<BudgetPayload>,
) -> AppResult<(StatusCode, Json<Budget>)> {
    let new_budget = NewBudget {
        category: require(payload.category, "category")?,
        amount_cents: cents_from_decimal(require(payload.amount, "amount")?),
        month: require(payload.month, "month")?,
        year: require(payload.year, "year")?,
    };

    let target = TargetMonth {
        month: new_budget.month,
        year: new_budget.year,
    };
    target.validate().map_err(AppError::Validation)?;

    let conn = state.db.get()?;
    if budgets::budget_exists(&conn, &new_budget.category, new_budget.month, new_budget.year)? {
        return Err(AppError::Validation(format!(
            "A budget for '{}' in {}/{} already exists",
            new_budget.category, new_budget.month, new_budget.year
        )));
    }

    let id = budgets::create_budget(&conn, &new_budget)?;
    let created = budgets::get_budget(&conn, id)?
        .ok_or_else(|| AppError::Internal("Created budget not found".into()))?;
    Ok((StatusCode::CREATED, Json(created)))
}
