use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ShelfError {
    #[error("Missing DATABASE_URL environment variable")]
    MissingDatabaseUrl,

    #[error("Invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ShelfError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ShelfError::MissingDatabaseUrl | ShelfError::InvalidDatabaseUrl(_)
        )
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Client-facing body. Database and serialization internals stay in the logs.
    pub fn body(&self) -> ApiErrorBody {
        match self {
            ShelfError::MissingDatabaseUrl | ShelfError::InvalidDatabaseUrl(_) => ApiErrorBody {
                code: "CONFIG_ERROR".to_string(),
                message: self.to_string(),
            },
            ShelfError::DatabaseError(_) | ShelfError::JsonError(_) => ApiErrorBody {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred.".to_string(),
            },
        }
    }
}

impl IntoResponse for ShelfError {
    fn into_response(self) -> axum::response::Response {
        if self.is_config_error() {
            tracing::error!(error = %self, "request rejected by configuration");
        } else {
            tracing::error!(error = %self, "request failed");
        }
        let status = self.status();
        (status, Json(ApiErrorResponse { error: self.body() })).into_response()
    }
}

/// Standardized API error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
