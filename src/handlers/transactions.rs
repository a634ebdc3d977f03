use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::date_utils::{self, month_range, to_db_date, TargetMonth};
use crate::db::queries::transactions::{self, TransactionFilter};
use crate::error::{AppError, AppResult};
use crate::handlers::require;
use crate::models::transaction::cents_from_decimal;
use crate::models::{NewTransaction, Transaction, TransactionChanges, TransactionKind};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Create/update body. Every field optional: create presence-checks them
/// one by one, update treats present fields as wholesale replacements.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionPayload {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
}

fn parse_kind(s: &str) -> Result<TransactionKind, AppError> {
    s.parse().map_err(AppError::Validation)
}

fn parse_date(s: &str) -> Result<String, AppError> {
    date_utils::parse_db_date(s)
        .map(date_utils::to_db_date)
        .ok_or_else(|| AppError::Validation(format!("date must be YYYY-MM-DD, got '{}'", s)))
}

/// All transactions newest-first, narrowed to one calendar month when both
/// `month` and `year` are given.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Transaction>>> {
    let mut filter = TransactionFilter::default();

    if let (Some(month), Some(year)) = (params.month, params.year) {
        let target = TargetMonth { month, year };
        target.validate().map_err(AppError::Validation)?;
        let (from, before) = month_range(target.first_day());
        filter.from_date = Some(to_db_date(from));
        filter.before_date = Some(to_db_date(before));
    }

    let conn = state.db.get()?;
    Ok(Json(transactions::list_transactions(&conn, &filter)?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TransactionPayload>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    let new_tx = NewTransaction {
        description: require(payload.description, "description")?,
        amount_cents: cents_from_decimal(require(payload.amount, "amount")?),
        category: require(payload.category, "category")?,
        kind: parse_kind(&require(payload.kind, "type")?)?,
        date: parse_date(&require(payload.date, "date")?)?,
    };

    let conn = state.db.get()?;
    let id = transactions::create_transaction(&conn, &new_tx)?;
    let created = transactions::get_transaction(&conn, id)?
        .ok_or_else(|| AppError::Internal("Created transaction not found".into()))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TransactionPayload>,
) -> AppResult<Json<Transaction>> {
    let changes = TransactionChanges {
        date: payload.date.as_deref().map(parse_date).transpose()?,
        amount_cents: payload.amount.map(cents_from_decimal),
        description: payload.description,
        category: payload.category,
        kind: payload.kind.as_deref().map(parse_kind).transpose()?,
    };

    let conn = state.db.get()?;
    if !transactions::update_transaction(&conn, id, &changes)? {
        return Err(AppError::NotFound(format!("Transaction {} not found", id)));
    }

    let updated = transactions::get_transaction(&conn, id)?
        .ok_or_else(|| AppError::Internal("Updated transaction not found".into()))?;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    if !transactions::delete_transaction(&conn, id)? {
        return Err(AppError::NotFound(format!("Transaction {} not found", id)));
    }
    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}
