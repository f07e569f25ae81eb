//! Work package endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::WorkPackage;
use crate::AppState;

/// GET /api/work-packages - List all work packages in display order.
pub async fn list_work_packages(State(state): State<AppState>) -> ApiResult<Vec<WorkPackage>> {
    let packages = state.repo.list_work_packages().await?;
    success(packages)
}
