//! Mapping of storefront errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{ErrorKind, StorefrontError};

/// Handler error: a [`StorefrontError`] rendered as a JSON body
#[derive(Debug)]
pub struct ApiError(pub StorefrontError);

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0.root() {
            StorefrontError::InvalidAccountId { .. }
            | StorefrontError::InvalidAmount { .. }
            | StorefrontError::UnknownMethod { .. }
            | StorefrontError::WrongMethodKind { .. } => StatusCode::BAD_REQUEST,
            err => match err.kind() {
                ErrorKind::Network => StatusCode::BAD_GATEWAY,
                ErrorKind::Remote => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::Io | ErrorKind::Local => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self.0.kind() {
            ErrorKind::Io => "io_error",
            ErrorKind::Network => "network_error",
            ErrorKind::Remote => "remote_error",
            ErrorKind::Local => "local_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = json!({
            "error": self.error_type(),
            "message": self.0.to_string(),
        });
        if let StorefrontError::Remote { payload, .. } = self.0.root() {
            if !payload.is_null() {
                body["payload"] = payload.clone();
            }
        }
        if let StorefrontError::PipelineAborted { deployed, .. } = &self.0 {
            body["deployed"] = json!(deployed);
        }
        (status, Json(body)).into_response()
    }
}
