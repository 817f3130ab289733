//! The in-memory movie catalog.
//!
//! Movies live in a `Vec` in insertion order. A second map from the
//! normalized title to the movie's position answers every title lookup,
//! which keeps duplicate checks and title searches O(1) while behaving
//! exactly like a case-insensitive linear scan.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::predictor::{combined_feature, RatingPredictor};
use crate::types::{round_rating, title_key, Movie};

/// Owns every known movie and the predictor used to rate new ones.
pub struct Catalog {
    movies: Vec<Movie>,
    /// Normalized title -> index into `movies`
    title_index: HashMap<String, usize>,
    predictor: Arc<dyn RatingPredictor>,
}

impl Catalog {
    /// Create an empty catalog that rates new movies with `predictor`.
    pub fn new(predictor: Arc<dyn RatingPredictor>) -> Self {
        Self {
            movies: Vec::new(),
            title_index: HashMap::new(),
            predictor,
        }
    }

    /// Add a movie, predicting its rating.
    ///
    /// Returns `Ok(false)` without touching the catalog or the predictor
    /// when a movie with the same title (ignoring case) already exists.
    /// Otherwise the predictor is called exactly once, the score is
    /// rounded to one decimal place and the movie is appended.
    ///
    /// # Errors
    /// Fails if the predictor fails or returns a non-finite score. The
    /// catalog is left unchanged in both cases.
    pub async fn add(&mut self, title: &str, genres: Vec<String>) -> Result<bool> {
        let key = title_key(title);
        if self.title_index.contains_key(&key) {
            debug!("Rejected duplicate title '{}'", title);
            return Ok(false);
        }

        let feature = combined_feature(title, &genres);
        let score = self
            .predictor
            .predict(&feature)
            .await
            .map_err(|source| CatalogError::Prediction {
                title: title.to_string(),
                source,
            })?;

        if !score.is_finite() {
            warn!(
                "Predictor {} returned non-finite score {} for '{}'",
                self.predictor.name(),
                score,
                title
            );
            return Err(CatalogError::InvalidPrediction {
                title: title.to_string(),
                score,
            });
        }

        let movie = Movie::new(title.to_string(), genres, round_rating(score));
        info!(
            "Added '{}' with predicted rating {:.1} ({} movies in catalog)",
            movie.title(),
            movie.rating(),
            self.movies.len() + 1
        );
        self.title_index.insert(key, self.movies.len());
        self.movies.push(movie);
        Ok(true)
    }

    /// Find the movie whose title matches `title`, ignoring case.
    pub fn search_by_title(&self, title: &str) -> Option<&Movie> {
        let found = self
            .title_index
            .get(&title_key(title))
            .map(|&idx| &self.movies[idx]);
        debug!("Title search for '{}': found={}", title, found.is_some());
        found
    }

    /// All movies having `genre` (ignoring case), in insertion order.
    pub fn search_by_genre(&self, genre: &str) -> Vec<&Movie> {
        let matches: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|movie| movie.has_genre(genre))
            .collect();
        debug!("Genre search for '{}': {} matches", genre, matches.len());
        matches
    }

    /// The `n` highest rated movies, best first.
    ///
    /// Movies with equal ratings keep their insertion order. Asking for
    /// more movies than the catalog holds returns all of them.
    pub fn recommend_top_n(&self, n: usize) -> Vec<&Movie> {
        let mut ranked: Vec<&Movie> = self.movies.iter().collect();
        // sort_by is stable, which is what preserves insertion order on ties
        ranked.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
        ranked.truncate(n);
        debug!("Top {} recommendation returned {} movies", n, ranked.len());
        ranked
    }

    /// Remove the movie whose title matches `title`, ignoring case.
    ///
    /// Returns `true` if a movie was removed.
    pub fn delete(&mut self, title: &str) -> bool {
        let key = title_key(title);
        let initial_count = self.movies.len();
        self.movies.retain(|movie| title_key(movie.title()) != key);

        let removed = self.movies.len() < initial_count;
        if removed {
            self.rebuild_index();
            info!(
                "Deleted '{}' ({} movies in catalog)",
                title,
                self.movies.len()
            );
        } else {
            debug!("Delete found no movie titled '{}'", title);
        }
        removed
    }

    /// All movies in insertion order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Name of the injected predictor
    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    fn rebuild_index(&mut self) {
        self.title_index = self
            .movies
            .iter()
            .enumerate()
            .map(|(idx, movie)| (title_key(movie.title()), idx))
            .collect();
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("movies", &self.movies)
            .field("predictor", &self.predictor.name())
            .finish()
    }
}
