//! HTTP-facing error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::tco::{CalculationError, CatalogError, ValidationError};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration failed validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<CalculationError> for AppError {
    fn from(error: CalculationError) -> Self {
        match error {
            CalculationError::Validation(errors) => Self::Validation(errors),
            CalculationError::Catalog(error) => Self::Catalog(error),
        }
    }
}

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            AppError::Validation(errors) => {
                tracing::debug!(count = errors.len(), "rejecting invalid configuration");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error_type: "validation_error".to_string(),
                        message,
                        details: Some(serde_json::json!({ "errors": errors })),
                    },
                )
            }
            AppError::Catalog(error) => {
                tracing::warn!("catalog lookup failed: {}", error);
                let (section, key) = error.reference();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error_type: "catalog_error".to_string(),
                        message,
                        details: Some(serde_json::json!({
                            "section": section,
                            "key": key,
                        })),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
