use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum InventoryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity} `{key}` not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("QR encoding error: {0}")]
    QrEncode(#[from] qrcode::types::QrError),

    #[error("Image encoding error: {0}")]
    ImageEncode(#[from] image::ImageError),

    #[error("Stored QR payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Config error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        InventoryError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn bin_not_found(id: i64) -> Self {
        Self::not_found("bin", id)
    }

    pub fn item_not_found(id: i64) -> Self {
        Self::not_found("item", id)
    }

    /// Reject empty or whitespace-only required fields.
    pub fn require(field: &str, value: &str) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(InventoryError::Validation(format!("`{field}` is required")));
        }
        Ok(())
    }
}

impl From<figment::Error> for InventoryError {
    fn from(e: figment::Error) -> Self {
        InventoryError::Config(Box::new(e))
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            InventoryError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".to_string(),
                    message: msg,
                },
            ),
            InventoryError::QrEncode(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".to_string(),
                    message: format!("bin number cannot be encoded as a QR code: {e}"),
                },
            ),
            err @ InventoryError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: err.to_string(),
                },
            ),
            err @ (InventoryError::DatabaseError(_)
            | InventoryError::ImageEncode(_)
            | InventoryError::Base64(_)
            | InventoryError::Config(_)
            | InventoryError::Io(_)) => {
                error!(error = %err, "request failed with internal error");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
