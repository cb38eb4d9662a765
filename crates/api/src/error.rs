//! Mapping from wallet errors to HTTP responses.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error, warn};
use wallet_core::WalletError;
use wallet_shared::AppError;

/// A wallet error rendered as `{"error": CODE, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub WalletError);

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = self.0.error_code();
        let retryable = self.0.is_retryable();
        let body = Json(json!({
            "error": code,
            "message": self.0.to_string(),
        }));

        let category = AppError::from(self.0);
        match &category {
            AppError::Internal(_) | AppError::Config(_) => {
                error!(code, category = category.error_code(), error = %category, "Request failed");
            }
            AppError::ExternalService(_) => {
                warn!(code, category = category.error_code(), error = %category, "Upstream unavailable");
            }
            AppError::Validation(_) | AppError::BusinessRule(_) => {
                debug!(code, category = category.error_code(), "Request rejected");
            }
        }

        let mut response = (status, body).into_response();
        if retryable {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from_static("5"));
        }
        response
    }
}
