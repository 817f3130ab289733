//! Core domain types for the movie catalog.

/// A movie stored in the catalog.
///
/// Movies are only ever created by [`Catalog::add`](crate::Catalog::add),
/// so the fields are private and read through accessors. The rating is
/// fixed at creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    title: String,
    genres: Vec<String>,
    rating: f64,
}

impl Movie {
    pub(crate) fn new(title: String, genres: Vec<String>, rating: f64) -> Self {
        Self {
            title,
            genres,
            rating,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Genres in the order they were given, duplicates included
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Predicted rating, rounded to one decimal place
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Whether any of this movie's genres equals `genre`, ignoring case.
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genres.iter().any(|g| g.to_lowercase() == wanted)
    }
}

/// Normalized lookup key for a title.
///
/// Two titles are the same catalog entry iff their keys are equal.
pub fn title_key(title: &str) -> String {
    title.to_lowercase()
}

/// Round a predicted score to one decimal place.
///
/// Rounds the exact binary value, so 0.15 (stored as 0.1499...) goes down
/// and exact ties such as 2.25 go to the even digit.
pub fn round_rating(score: f64) -> f64 {
    format!("{:.1}", score).parse().unwrap_or(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_key_ignores_case() {
        assert_eq!(title_key("The Matrix"), title_key("THE MATRIX"));
        assert_ne!(title_key("The Matrix"), title_key("The Matrix "));
    }

    #[test]
    fn test_round_rating() {
        assert_eq!(round_rating(3.14159), 3.1);
        assert_eq!(round_rating(3.96), 4.0);
        assert_eq!(round_rating(4.0), 4.0);
        assert_eq!(round_rating(-1.04), -1.0);
    }

    #[test]
    fn test_round_rating_near_ties() {
        // Decimal literals that sit just below the tie, or exactly on it
        assert_eq!(round_rating(0.15), 0.1);
        assert_eq!(round_rating(0.35), 0.3);
        assert_eq!(round_rating(2.25), 2.2);
        assert_eq!(round_rating(2.65), 2.6);
        assert_eq!(round_rating(4.05), 4.0);
        // Just above the tie still rounds up
        assert_eq!(round_rating(3.85), 3.9);
    }

    #[test]
    fn test_has_genre_is_case_insensitive() {
        let movie = Movie::new(
            "Alien".to_string(),
            vec!["Horror".to_string(), "Sci-Fi".to_string()],
            4.2,
        );

        assert!(movie.has_genre("horror"));
        assert!(movie.has_genre("SCI-FI"));
        assert!(!movie.has_genre("Comedy"));
    }

    #[test]
    fn test_has_genre_does_not_trim() {
        // Genres are stored exactly as split from the form input
        let movie = Movie::new(
            "Heat".to_string(),
            vec!["Crime".to_string(), " Drama".to_string()],
            4.0,
        );

        assert!(!movie.has_genre("Drama"));
        assert!(movie.has_genre(" drama"));
    }
}
