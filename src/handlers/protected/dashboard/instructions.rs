use axum::{extract::State, Extension};

use crate::app::AppState;
use crate::database::models::InstructionStats;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/dashboard/instructions - instruction counters
///
/// Governor and secretary general get the instructions they issued, other
/// roles the whole register.
pub async fn instructions_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<InstructionStats> {
    Ok(ApiResponse::success(state.dashboard.instruction_stats(&user).await))
}
