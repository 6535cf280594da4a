use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::{validate_jwt, AccessError, Claims, DashboardKind, Role, Scope};
use crate::error::ApiError;

/// Name of the cookie the browser front-end stores its token in.
pub const JWT_COOKIE: &str = "jwt";

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    pub pole_id: Option<i64>,
    pub code_cercle: Option<String>,
}

impl AuthUser {
    pub fn from_claims(claims: Claims) -> Result<Self, AccessError> {
        Ok(Self {
            user_id: claims.id,
            email: claims.email,
            role: Role::from_profile_id(claims.profile_id)?,
            pole_id: claims.pole_id,
            code_cercle: claims.code_cercle,
        })
    }

    pub fn scope(&self) -> Result<Scope, AccessError> {
        self.role.scope(self.pole_id, self.code_cercle.as_deref())
    }

    pub fn dashboard(&self) -> DashboardKind {
        self.role.dashboard()
    }

    /// Issuer filter for the instruction counters.
    pub fn instruction_issuer(&self) -> Option<i64> {
        self.role.tracks_own_instructions().then_some(self.user_id)
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt(request.headers()).map_err(ApiError::unauthorized)?;
    let claims = validate_jwt(&token, &state.config.security.jwt_secret)?;
    let auth_user = AuthUser::from_claims(claims)?;

    tracing::debug!(user_id = auth_user.user_id, role = ?auth_user.role, "Authenticated request");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Bearer token from the Authorization header, else the `jwt` cookie.
fn extract_jwt(headers: &HeaderMap) -> Result<String, String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| "Invalid Authorization header format".to_string())?;

        return match auth_str.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            Some(_) => Err("Empty JWT token".to_string()),
            None => Err("Authorization header must use Bearer token format".to_string()),
        };
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == JWT_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| "Missing Authorization header".to_string())
}
