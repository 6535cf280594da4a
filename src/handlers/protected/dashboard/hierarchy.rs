use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension,
};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::stats::{Hierarchy, RollupStats, RowFilter};

/// GET /api/dashboard/hierarchy?pole_id=&axis_id= - axis → sector → objective tree
pub async fn hierarchy_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<RowFilter>, QueryRejection>,
) -> ApiResult<Hierarchy> {
    let Query(filter) = query?;
    let scope = user.scope()?;
    let hierarchy = state.dashboard.hierarchy(&scope, &filter).await;
    Ok(ApiResponse::success(hierarchy))
}

/// GET /api/stats - project count, cost, jobs and beneficiaries in scope
pub async fn stats_get(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<RollupStats> {
    let scope = user.scope()?;
    Ok(ApiResponse::success(state.dashboard.totals(&scope).await))
}
