//! fincalc server
//!
//! HTTP API over the calculators, formatters and saved-results log.

pub mod http;
pub mod state;
pub mod telemetry;

pub use http::create_router;
pub use state::AppState;
pub use telemetry::init_metrics;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use fincalc_core::CalculationError;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

impl ServerError {
    fn code(&self) -> &'static str {
        match self {
            ServerError::NotFound(_) => "not_found",
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::Conflict(_) => "conflict",
            ServerError::Calculation(CalculationError::InvalidInput { .. }) => "invalid_input",
            ServerError::Calculation(CalculationError::Unresolved { .. }) => "unresolved",
        }
    }
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::Calculation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        let body = match &self {
            ServerError::Calculation(e) => json!({
                "error": self.code(),
                "message": e.user_message(),
                "field": e.field(),
            }),
            _ => json!({
                "error": self.code(),
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<fincalc_core::Error> for ServerError {
    fn from(err: fincalc_core::Error) -> Self {
        match err {
            fincalc_core::Error::UnknownCalculator(_) => ServerError::NotFound(err.to_string()),
        }
    }
}
