//! HTTP error responses for the facade.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::registry::RegistryError;

/// Errors returned by facade endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No route or capability with that name.
    #[error("Not Found")]
    NotFound,

    /// The request does not match the capability's parameters.
    #[error("{message}")]
    Validation {
        location: &'static str,
        message: String,
    },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Convert a registry error, tagging validation failures with where the
    /// arguments came from (`body`, `query` or `path`).
    pub fn from_registry(err: RegistryError, location: &'static str) -> Self {
        match err {
            RegistryError::NotFound { .. } => Self::NotFound,
            RegistryError::InvalidArguments { reason, .. } => Self::Validation {
                location,
                message: reason,
            },
            other => Self::Internal(other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        Self::from_registry(err, "body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::NotFound => json!({ "detail": "Not Found" }),
            Self::Validation { location, message } => json!({
                "detail": [{
                    "loc": [location],
                    "msg": message,
                    "type": "value_error"
                }]
            }),
            Self::Internal(message) => {
                warn!("Internal error: {}", message);
                json!({ "detail": message })
            }
        };
        (status, Json(body)).into_response()
    }
}
