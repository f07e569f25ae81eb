//! Month roster endpoint.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{MonthRoster, YearMonth};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// `YYYY-MM`; the current month when absent or blank.
    #[serde(default)]
    pub month: Option<String>,
}

/// GET /api/persons/:person_id/roster - Resolved calendar for one month.
pub async fn get_month_roster(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<MonthRoster> {
    let person_id: i64 = person_id
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid person id: {}", person_id)))?;
    if person_id <= 0 {
        return Err(AppError::Validation(format!(
            "Person id must be positive, got {}",
            person_id
        )));
    }

    let month = match query.month.as_deref().map(str::trim) {
        None | Some("") => YearMonth::current(),
        Some(text) => text.parse::<YearMonth>()?,
    };

    tracing::debug!(person_id, month = %month, "loading month roster");
    let roster = state.repo.load_month(person_id, month).await?;

    success(roster)
}
