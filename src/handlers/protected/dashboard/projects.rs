use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension,
};

use crate::app::AppState;
use crate::database::models::{PageRequest, ProjectPage};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/dashboard/projects?page=&limit= - paginated projects in the caller's scope
pub async fn projects_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<ProjectPage> {
    let Query(request) = query?;
    let scope = user.scope()?;
    Ok(ApiResponse::success(state.dashboard.projects_page(&scope, &request).await))
}
