pub mod analytics;
pub mod budgets;
pub mod transactions;

use axum::response::Json;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::models::RECOMMENDED_CATEGORIES;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(analytics::report))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/:id",
            axum::routing::put(transactions::update).delete(transactions::delete),
        )
        .route("/budgets", get(budgets::list).post(budgets::create))
        .route("/categories", get(categories))
        .route("/health", get(health))
}

/// Presence check for required create fields; the body is deserialized with
/// optional fields so a missing one maps to 400 instead of axum's 422.
pub(crate) fn require<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Missing required field: {}", field)))
}

async fn categories() -> Json<&'static [&'static str]> {
    Json(RECOMMENDED_CATEGORIES)
}

async fn health() -> &'static str {
    "OK"
}
