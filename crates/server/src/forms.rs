//! Form payloads and the small amount of input parsing the routes need.

use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct AddMovieForm {
    pub title: String,
    /// Comma-separated genres, split verbatim
    pub genres: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    pub title: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendForm {
    pub top_n: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteMovieForm {
    pub title: String,
}

/// Split raw genre input on commas.
///
/// No trimming happens: `"Action, Drama"` yields `" Drama"` with its
/// leading space, and consecutive commas yield empty genres.
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Treat an empty field the same as a missing one.
pub fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Parse the Top N field as a non-negative integer.
pub fn parse_top_n(raw: &str) -> Result<usize, AppError> {
    raw.trim().parse::<usize>().map_err(|_| {
        AppError::BadRequest(format!(
            "Top N must be a non-negative whole number, got '{}'.",
            raw
        ))
    })
}

/// Require a non-empty title.
pub fn require_title(title: String) -> Result<String, AppError> {
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required.".to_string()));
    }
    Ok(title)
}
