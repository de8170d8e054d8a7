use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::common::models::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    StorageUnavailable(String),

    #[error("Sqlx failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Lock was poisoned")]
    PoisonError,

    #[error("{0}")]
    Internal(String),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::InvalidInput(rejection.body_text())
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::StorageUnavailable(_)
            | ServerError::Sqlx(_)
            | ServerError::PoisonError
            | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ServerError::InvalidInput(_) => "Invalid input",
            ServerError::NotFound(_) => "Not found",
            ServerError::StorageUnavailable(_) | ServerError::Sqlx(_) => "Storage unavailable",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = self.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", details);
        } else {
            warn!("Request rejected: {} - {}", status, details);
        }

        let body = ErrorResponse {
            error: self.label().to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
