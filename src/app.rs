use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::StatsRepository;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::DashboardService;

/// Shared handler state. Configuration travels here rather than through a
/// global so that tests can run several apps side by side.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn new(config: AppConfig, repository: Arc<dyn StatsRepository>) -> Self {
        Self {
            config: Arc::new(config),
            dashboard: DashboardService::new(repository),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected API
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(cors_layer(&state.config.security));

    let router = if state.config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{auth, dashboard};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        .route("/api/stats", get(dashboard::stats_get))
        .route("/api/dashboard", get(dashboard::summary_get))
        .route("/api/dashboard/hierarchy", get(dashboard::hierarchy_get))
        .route("/api/dashboard/axes", get(dashboard::axes_get))
        .route("/api/dashboard/axes/:axis_id/projects", get(dashboard::axis_projects_get))
        .route("/api/dashboard/projects", get(dashboard::projects_get))
        .route("/api/dashboard/instructions", get(dashboard::instructions_get))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
