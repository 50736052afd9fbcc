use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Request-level errors for the reporting endpoints.
///
/// Every failure is terminal for its request: the client gets either the
/// full payload or one of these, never both.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The required state code was missing, non-numeric, or not positive.
    #[error("Invalid state code")]
    InvalidStateCode,

    /// The query succeeded but matched no rows, on an endpoint that
    /// treats an empty result as an error.
    #[error("No data found for the state")]
    NoData,

    /// Any failure from the database collaborator. `message` is the
    /// client-visible domain message; the sqlx error stays server-side.
    #[error("{message}")]
    Query {
        message: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    /// Adapter for `map_err`: wraps a sqlx failure with the domain's
    /// client-visible message.
    pub fn query(message: &'static str) -> impl FnOnce(sqlx::Error) -> ApiError {
        move |source| ApiError::Query { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidStateCode => StatusCode::BAD_REQUEST,
            ApiError::NoData => StatusCode::NOT_FOUND,
            ApiError::Query { message, source } => {
                tracing::error!(error = %source, "{message}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
