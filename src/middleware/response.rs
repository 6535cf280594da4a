//! `{ "success": bool, "data": ... }` envelope returned by every JSON handler.
//!
//! Errors never go through here: `ApiError` renders its own
//! `{ "error": true, "message", "code" }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

#[derive(Debug)]
pub struct ApiResponse<T> {
    data: T,
    status: StatusCode,
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    success: bool,
    data: &'a T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
        }
    }

    /// 503 that still carries a payload, for `/health` when the database is
    /// down. The envelope reports `success: false`.
    pub fn unavailable(data: T) -> Self {
        Self {
            data,
            status: StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            success: self.status.is_success(),
            data: &self.data,
        };
        (self.status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
