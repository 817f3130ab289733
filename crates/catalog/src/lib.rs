//! # Catalog Crate
//!
//! The in-memory movie store behind CineMatch.
//!
//! ## Main Components
//!
//! - **types**: The `Movie` record and title normalization
//! - **catalog**: `Catalog`, owning the movies and answering queries
//! - **predictor**: The `RatingPredictor` seam and the text feature it is fed
//! - **error**: Error types for predictor and catalog failures
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::sync::Arc;
//!
//! let mut catalog = Catalog::new(Arc::new(predictor));
//!
//! catalog.add("The Matrix", vec!["Action".into(), "Sci-Fi".into()]).await?;
//! let movie = catalog.search_by_title("the matrix").unwrap();
//! let top = catalog.recommend_top_n(10);
//! ```

pub mod catalog;
pub mod error;
pub mod predictor;
pub mod types;

pub use catalog::Catalog;
pub use error::{CatalogError, PredictorError, Result};
pub use predictor::{combined_feature, RatingPredictor};
pub use types::{round_rating, title_key, Movie};
