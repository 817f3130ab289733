//! Route handlers.
//!
//! Every POST handler locks the catalog, performs exactly one catalog
//! operation and renders the outcome while still holding the lock, so the
//! borrowed results never outlive it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use tracing::debug;

use catalog::Movie;

use crate::app::AppState;
use crate::error::AppError;
use crate::forms::{
    non_empty, parse_top_n, require_title, split_genres, AddMovieForm, DeleteMovieForm,
    RecommendForm, SearchForm,
};
use crate::views::{self, RecommendMode};

pub const MOVIE_EXISTS: &str = "Movie already exists!";
pub const MOVIE_NOT_FOUND: &str = "Movie not found!";
pub const RECOMMEND_INPUT_MISSING: &str =
    "Please provide either Top N or Genre for recommendations.";

pub async fn index() -> Html<&'static str> {
    Html(views::INDEX_PAGE)
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn add_form() -> Html<&'static str> {
    Html(views::ADD_MOVIE_PAGE)
}

pub async fn add_movie(
    State(state): State<AppState>,
    Form(form): Form<AddMovieForm>,
) -> Result<Response, AppError> {
    let title = require_title(form.title)?;
    let genres = split_genres(&form.genres);

    let mut catalog = state.catalog.lock().await;
    if catalog.add(&title, genres).await? {
        Ok(Redirect::to("/").into_response())
    } else {
        Ok((StatusCode::CONFLICT, MOVIE_EXISTS).into_response())
    }
}

pub async fn search_form() -> Html<String> {
    views::search_page(None)
}

/// Title and genre together keep the title match only if it has the genre.
pub async fn search_movies(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    let title = non_empty(form.title);
    let genre = non_empty(form.genre);
    debug!("Search request: title={:?} genre={:?}", title, genre);

    let catalog = state.catalog.lock().await;
    let results: Vec<&Movie> = match (title.as_deref(), genre.as_deref()) {
        (Some(title), Some(genre)) => catalog
            .search_by_title(title)
            .filter(|movie| movie.has_genre(genre))
            .into_iter()
            .collect(),
        (Some(title), None) => catalog.search_by_title(title).into_iter().collect(),
        (None, Some(genre)) => catalog.search_by_genre(genre),
        (None, None) => Vec::new(),
    };
    views::search_page(Some(results.as_slice()))
}

pub async fn recommend_form() -> Html<String> {
    views::recommend_page(None)
}

/// Top N wins when both fields are filled in.
pub async fn recommend_movies(
    State(state): State<AppState>,
    Form(form): Form<RecommendForm>,
) -> Result<Html<String>, AppError> {
    let top_n = non_empty(form.top_n);
    let genre = non_empty(form.genre);

    if let Some(raw) = top_n {
        let n = parse_top_n(&raw)?;
        let catalog = state.catalog.lock().await;
        let movies = catalog.recommend_top_n(n);
        Ok(views::recommend_page(Some((RecommendMode::TopN, movies.as_slice()))))
    } else if let Some(genre) = genre {
        let catalog = state.catalog.lock().await;
        let movies = catalog.search_by_genre(&genre);
        Ok(views::recommend_page(Some((RecommendMode::Genre, movies.as_slice()))))
    } else {
        Err(AppError::BadRequest(RECOMMEND_INPUT_MISSING.to_string()))
    }
}

pub async fn delete_form() -> Html<&'static str> {
    Html(views::DELETE_MOVIE_PAGE)
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Form(form): Form<DeleteMovieForm>,
) -> Result<Response, AppError> {
    let title = require_title(form.title)?;

    let mut catalog = state.catalog.lock().await;
    if catalog.delete(&title) {
        Ok(Redirect::to("/").into_response())
    } else {
        Ok((StatusCode::NOT_FOUND, MOVIE_NOT_FOUND).into_response())
    }
}
