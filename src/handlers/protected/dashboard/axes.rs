use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::Scope;
use crate::database::models::ProjectSummary;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::stats::AxisShare;

#[derive(Debug, Serialize)]
pub struct AxisProjects {
    pub axis_id: i64,
    pub count: usize,
    pub projects: Vec<ProjectSummary>,
}

/// GET /api/dashboard/axes - every axis with its share of the total budget
///
/// Reserved to the roles that see the whole program.
pub async fn axes_get(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Vec<AxisShare>> {
    user.role.require_global_view()?;
    Ok(ApiResponse::success(state.dashboard.axis_shares(&Scope::Global).await))
}

/// GET /api/dashboard/axes/:axis_id/projects - projects of one axis, within the caller's scope
pub async fn axis_projects_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(axis_id): Path<String>,
) -> ApiResult<AxisProjects> {
    let axis_id = parse_axis_id(&axis_id)?;
    let scope = user.scope()?;

    let projects = state.dashboard.projects_by_axis(axis_id, &scope).await.map_err(|e| {
        tracing::error!(axis_id, ?scope, error = %e, "Loading axis projects failed");
        ApiError::from(e)
    })?;

    Ok(ApiResponse::success(AxisProjects {
        axis_id,
        count: projects.len(),
        projects,
    }))
}

fn parse_axis_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| ApiError::bad_request("Invalid axis id"))
}
