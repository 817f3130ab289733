//! HTML rendering for result pages.
//!
//! Static pages live in `static/` and are embedded at compile time. The
//! search and recommendation pages carry results, so they are built here.

use std::fmt::Write;

use axum::response::Html;

use catalog::Movie;

pub const INDEX_PAGE: &str = include_str!("../static/index.html");
pub const ADD_MOVIE_PAGE: &str = include_str!("../static/add_movie.html");
pub const DELETE_MOVIE_PAGE: &str = include_str!("../static/delete_movie.html");

const SEARCH_FORM: &str = r#"<form method="post" action="/search">
  <label>Title <input type="text" name="title"></label>
  <label>Genre <input type="text" name="genre"></label>
  <button type="submit">Search</button>
</form>"#;

const RECOMMEND_FORM: &str = r#"<form method="post" action="/recommend">
  <label>Top N <input type="number" name="top_n" min="0"></label>
  <label>or Genre <input type="text" name="genre"></label>
  <button type="submit">Recommend</button>
</form>"#;

/// Which recommendation strategy produced a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendMode {
    TopN,
    Genre,
}

impl RecommendMode {
    pub fn label(self) -> &'static str {
        match self {
            RecommendMode::TopN => "Top N",
            RecommendMode::Genre => "Genre",
        }
    }
}

/// Search page; `results` is `None` before anything was searched.
pub fn search_page(results: Option<&[&Movie]>) -> Html<String> {
    let mut body = String::from(SEARCH_FORM);
    if let Some(movies) = results {
        body.push_str("\n<h2>Results</h2>\n");
        body.push_str(&movie_list(movies));
    }
    Html(layout("Search Movies", &body))
}

/// Recommendation page; `results` is `None` before a request was made.
pub fn recommend_page(results: Option<(RecommendMode, &[&Movie])>) -> Html<String> {
    let mut body = String::from(RECOMMEND_FORM);
    if let Some((mode, movies)) = results {
        let _ = write!(body, "\n<h2>Recommendations ({})</h2>\n", mode.label());
        body.push_str(&movie_list(movies));
    }
    Html(layout("Recommend Movies", &body))
}

fn movie_list(movies: &[&Movie]) -> String {
    if movies.is_empty() {
        return "<p>No movies found.</p>\n".to_string();
    }

    let mut list = String::from("<ul class=\"movies\">\n");
    for movie in movies {
        let _ = writeln!(
            list,
            "  <li><strong>{}</strong> <span class=\"genres\">{}</span> <span class=\"rating\">{:.1}</span></li>",
            escape_html(movie.title()),
            escape_html(&movie.genres().join(", ")),
            movie.rating()
        );
    }
    list.push_str("</ul>\n");
    list
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title} - CineMatch</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n<p><a href=\"/\">Home</a></p>\n</body>\n</html>\n"
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
