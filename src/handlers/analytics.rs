use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::date_utils::TargetMonth;
use crate::error::{AppError, AppResult};
use crate::services::analytics::{self, AnalyticsReport};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

pub async fn report(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> AppResult<Json<AnalyticsReport>> {
    let target = TargetMonth::resolve(params.month, params.year).map_err(AppError::Validation)?;

    let conn = state.db.get()?;
    let report = analytics::monthly_report(&conn, target)?;
    Ok(Json(report))
}
