use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::middleware::ApiResponse;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "PDTI Safi statistics API",
            "version": version,
            "endpoints": {
                "health": "/health (public)",
                "whoami": "/api/auth/whoami (protected)",
                "stats": "/api/stats (protected)",
                "dashboard": "/api/dashboard[/hierarchy|/axes|/axes/:axis_id/projects|/projects|/instructions] (protected)",
            }
        }
    }))
}

/// GET /health - liveness plus database reachability
pub async fn health(State(state): State<AppState>) -> ApiResponse<Value> {
    let now = chrono::Utc::now();

    match state.dashboard.database_ok().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            ApiResponse::unavailable(json!({
                "status": "degraded",
                "timestamp": now,
                "database": "unavailable"
            }))
        }
    }
}
