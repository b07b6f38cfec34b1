use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use referrals_core::rules::FraudRejection;
use referrals_store::RegisterError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor.";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Rejected(FraudRejection),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Rejected(rejection) => ApiError::Rejected(rejection),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Validation(message) => message,
            ApiError::Rejected(rejection) => rejection.to_string(),
            ApiError::Internal(cause) => {
                error!(error = %cause, "referral request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
