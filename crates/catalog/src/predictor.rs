//! The rating predictor seam.
//!
//! The catalog never knows how a rating is produced. It builds a single
//! text feature from the title and genres and hands it to whatever
//! [`RatingPredictor`] it was constructed with.

use async_trait::async_trait;

use crate::error::PredictorError;

/// Maps a text feature to a numeric rating.
///
/// Implementations are built once at start-up and shared for the life of
/// the process, so they must be `Send + Sync`.
#[async_trait]
pub trait RatingPredictor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Predict a rating for the given text feature.
    async fn predict(&self, text: &str) -> Result<f64, PredictorError>;
}

/// Build the text feature for a movie.
///
/// The title comes first, then a single space, then the genres joined by
/// single spaces. An empty genre list still leaves the separating space.
pub fn combined_feature(title: &str, genres: &[String]) -> String {
    format!("{} {}", title, genres.join(" "))
}
