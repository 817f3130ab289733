//! Request-level errors for the web front end.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use catalog::CatalogError;

/// Errors a handler can end a request with.
///
/// Duplicate titles and missing movies are normal outcomes and are
/// answered directly by the handlers; only bad input and predictor
/// failures travel through here.
#[derive(Error, Debug)]
pub enum AppError {
    /// The form input cannot be acted on
    #[error("{0}")]
    BadRequest(String),

    /// The catalog could not complete the operation
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Catalog(_) => {
                error!("Request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}
