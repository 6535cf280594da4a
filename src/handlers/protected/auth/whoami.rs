use axum::Extension;
use serde::Serialize;

use crate::auth::{DashboardKind, Scope};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub user: AuthUser,
    pub dashboard: DashboardKind,
    /// `None` when the account lacks the pole or circle its role requires.
    pub scope: Option<Scope>,
}

/// GET /api/auth/whoami - current user, landing dashboard and data scope
pub async fn whoami(Extension(user): Extension<AuthUser>) -> ApiResult<WhoAmI> {
    let scope = user.scope().ok();

    Ok(ApiResponse::success(WhoAmI {
        dashboard: user.dashboard(),
        scope,
        user,
    }))
}
