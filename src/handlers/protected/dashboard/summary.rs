use axum::{extract::State, Extension};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::DashboardSummary;

/// GET /api/dashboard - landing dashboard for the caller's role
///
/// Governors and administrators get every axis; coordinators and pole heads
/// their pole; pachas and circle heads the projects of their circle.
pub async fn summary_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<DashboardSummary> {
    let summary = state.dashboard.summary(&user).await?;
    Ok(ApiResponse::success(summary))
}
