//! Mapping of application errors onto HTTP responses.
//!
//! Every failure leaves the service as the status from [`ErrorKind::status_code`]
//! and a JSON body:
//!
//! ```json
//! { "code": "not_found", "message": "coupon not found" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Json};
use serde::{Deserialize, Serialize};
use tower::timeout::error::Elapsed;

use crate::domain::foundation::{AppError, Canceled, ErrorKind};

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Wire name of the error kind.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.kind().as_str().to_string(),
            message: err.message().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match self.kind() {
            ErrorKind::Internal => tracing::error!(error = %self, "request failed"),
            ErrorKind::Unauthorized | ErrorKind::Forbidden => {
                tracing::warn!(error = %self, "request rejected")
            }
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Turns errors raised by tower middleware into application errors.
///
/// A request that runs past its deadline is abandoned and reported as
/// `canceled`. Other errors keep any application error in their source chain
/// and are `internal` otherwise.
pub async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        tracing::warn!("request exceeded its deadline");
        return AppError::from_dyn(Canceled);
    }
    AppError::from_boxed(err)
}
