//! Error types for the catalog crate.
//!
//! Duplicate titles and missing movies are not errors: `add` and `delete`
//! report them as `false` and the searches as `None` or an empty list.
//! The only real failure is the rating predictor, which is an external
//! collaborator and can be unavailable or misbehave.

use thiserror::Error;

/// Errors reported by a [`RatingPredictor`](crate::RatingPredictor).
#[derive(Error, Debug)]
pub enum PredictorError {
    /// The predictor backend could not be reached
    #[error("Failed to connect to rating predictor: {0}")]
    Connection(String),

    /// The backend was reached but the prediction call failed
    #[error("Prediction request failed: {0}")]
    Request(String),

    /// The backend answered with something we cannot use
    #[error("Invalid response from rating predictor: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur while mutating the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The predictor failed while rating a new movie
    #[error("Failed to predict rating for '{title}': {source}")]
    Prediction {
        title: String,
        #[source]
        source: PredictorError,
    },

    /// The predictor returned NaN or an infinite score
    #[error("Predictor returned a non-finite rating ({score}) for '{title}'")]
    InvalidPrediction { title: String, score: f64 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
