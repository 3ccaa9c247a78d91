//! API error type with HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use domain::DomainError;
use serde::Serialize;

/// Error envelope returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: ErrorDetail,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API-level error, convertible from domain failures.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request data caught at the boundary (bad dates, bad status
    /// names, bad ids).
    #[error("{0}")]
    BadRequest(String),
    /// Domain failure, mapped per its taxonomy.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg),
            ApiError::Domain(err) => match &err {
                DomainError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
                }
                DomainError::InvalidInput(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", err.to_string())
                }
                DomainError::InvalidTransition { .. } => {
                    (StatusCode::BAD_REQUEST, "INVALID_TRANSITION", err.to_string())
                }
                DomainError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
                DomainError::Store(inner) => {
                    // Storage details are logged, never surfaced.
                    tracing::error!(error = %inner, "storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "internal server error".to_string(),
                    )
                }
            },
        };

        let body = ErrorBody {
            success: false,
            error: ErrorDetail {
                code,
                message,
                details: None,
            },
            timestamp: Utc::now(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(
            status_of(ApiError::Domain(DomainError::not_found("order", 1i64))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::Domain(DomainError::invalid_input("bad"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Domain(DomainError::Conflict("dup".to_string()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::BadRequest("bad date".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn transition_errors_are_client_errors() {
        use domain::OrderStatus;
        let err = ApiError::Domain(DomainError::InvalidTransition {
            from: OrderStatus::Entregue,
            to: OrderStatus::Cancelado,
        });
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }
}
