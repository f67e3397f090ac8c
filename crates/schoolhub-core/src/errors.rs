//! Application error type.
//!
//! Every failure a handler can produce is an [`AppError`]: an HTTP status, the
//! underlying [`anyhow::Error`] and the shape of the JSON body. Three body shapes
//! exist on the wire:
//!
//! - `{"message": "..."}` for authentication, authorization, not-found, store
//!   rejections and handler failures
//! - `{"errors": [{"field": "...", "message": "..."}]}` for field validation
//! - `{"error": "..."}` for the generic fallback (unparseable bodies, panics)

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

pub const AUTHENTICATION_FAILED: &str = "Authentication failed!";
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action";

/// A single broken field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FallbackErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyShape {
    Message,
    Fields,
    Fallback,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub field_errors: Vec<FieldError>,
    shape: BodyShape,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            field_errors: Vec::new(),
            shape: BodyShape::Message,
        }
    }

    /// 401 with the fixed message. The cause is never part of the response.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(AUTHENTICATION_FAILED))
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(PERMISSION_DENIED))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// 400 carrying every broken field rule.
    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!("{} field(s) failed validation", field_errors.len()),
            field_errors,
            shape: BodyShape::Fields,
        }
    }

    /// Error rendered as `{"error": ...}`, used where the request never reached a handler.
    pub fn fallback<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            shape: BodyShape::Fallback,
            ..Self::new(status, err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = match self.shape {
            BodyShape::Message => json!({ "message": self.error.to_string() }),
            BodyShape::Fields => json!({ "errors": self.field_errors }),
            BodyShape::Fallback => json!({ "error": self.error.to_string() }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
