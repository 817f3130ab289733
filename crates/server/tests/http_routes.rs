//! End-to-end tests for the web front end.
//!
//! Each test starts the router on a random local port with a stub
//! predictor and talks to it over real HTTP.

use async_trait::async_trait;
use catalog::{Catalog, PredictorError, RatingPredictor};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use server::{CatalogServer, SharedCatalog};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

// ============================================================================
// Test Fixtures
// ============================================================================

/// Rates a movie by the number of words in its text feature
struct WordCountPredictor;

#[async_trait]
impl RatingPredictor for WordCountPredictor {
    fn name(&self) -> &str {
        "word-count"
    }

    async fn predict(&self, text: &str) -> Result<f64, PredictorError> {
        Ok(text.split_whitespace().count() as f64 + 0.04)
    }
}

struct BrokenPredictor;

#[async_trait]
impl RatingPredictor for BrokenPredictor {
    fn name(&self) -> &str {
        "broken"
    }

    async fn predict(&self, _text: &str) -> Result<f64, PredictorError> {
        Err(PredictorError::Connection("model unavailable".to_string()))
    }
}

/// Slow enough that concurrent requests overlap inside `add`
struct SleepingPredictor;

#[async_trait]
impl RatingPredictor for SleepingPredictor {
    fn name(&self) -> &str {
        "sleeping"
    }

    async fn predict(&self, _text: &str) -> Result<f64, PredictorError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(3.5)
    }
}

struct TestServer {
    base: String,
    client: Client,
    catalog: SharedCatalog,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(predictor: Arc<dyn RatingPredictor>) -> Self {
        let server = CatalogServer::new(Catalog::new(predictor));
        let catalog = server.catalog();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            server
                .serve(listener, std::future::pending())
                .await
                .expect("Test server failed");
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to build client");

        Self {
            base: format!("http://{}", addr),
            client,
            catalog,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Request failed")
    }

    async fn add(&self, title: &str, genres: &str) -> reqwest::Response {
        self.post("/add", &[("title", title), ("genres", genres)]).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ============================================================================
// Static pages
// ============================================================================

#[tokio::test]
async fn test_get_pages() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;

    for path in ["/", "/add", "/search", "/recommend", "/delete"] {
        let response = server.client.get(server.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
        assert!(response.text().await.unwrap().contains("<html"));
    }

    let health = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(health.text().await.unwrap(), "OK");
}

// ============================================================================
// Add
// ============================================================================

#[tokio::test]
async fn test_add_redirects_and_stores_literal_genres() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;

    let response = server.add("Heat", "Crime, Drama").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let catalog = server.catalog.lock().await;
    let movie = catalog.search_by_title("heat").expect("movie should be stored");
    assert_eq!(movie.genres(), &["Crime".to_string(), " Drama".to_string()]);
    // "Heat Crime  Drama" has 3 words
    assert_eq!(movie.rating(), 3.0);
}

#[tokio::test]
async fn test_add_duplicate_is_rejected() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;

    server.add("Matrix", "Action").await;
    let response = server.add("MATRIX", "Sci-Fi").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(response.text().await.unwrap(), "Movie already exists!");
    assert_eq!(server.catalog.lock().await.len(), 1);
}

#[tokio::test]
async fn test_add_requires_title() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;

    let response = server.add("", "Drama").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(server.catalog.lock().await.is_empty());
}

#[tokio::test]
async fn test_add_reports_predictor_failure() {
    let server = TestServer::start(Arc::new(BrokenPredictor)).await;

    let response = server.add("Heat", "Crime").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().await.unwrap().contains("model unavailable"));
    assert!(server.catalog.lock().await.is_empty());

    // The server keeps serving after a failed prediction
    let health = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_of_same_title() {
    let server = TestServer::start(Arc::new(SleepingPredictor)).await;

    let mut tasks = Vec::new();
    for title in ["Matrix", "MATRIX", "matrix", "MaTrIx"] {
        let client = server.client.clone();
        let url = server.url("/add");
        tasks.push(tokio::spawn(async move {
            client
                .post(url)
                .form(&[("title", title), ("genres", "Action")])
                .send()
                .await
                .expect("Request failed")
                .status()
        }));
    }

    let mut accepted = 0;
    let mut conflicts = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::SEE_OTHER => accepted += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(conflicts, 3);
    assert_eq!(server.catalog.lock().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_on_shared_catalog() {
    let server = TestServer::start(Arc::new(SleepingPredictor)).await;

    let mut tasks = Vec::new();
    for title in ["Alien", "ALIEN", "alien", "AlIeN"] {
        let catalog = server.catalog.clone();
        tasks.push(tokio::spawn(async move {
            let mut catalog = catalog.lock().await;
            catalog.add(title, vec!["Horror".to_string()]).await.unwrap()
        }));
    }

    let mut accepted = 0;
    for task in tasks {
        if task.await.unwrap() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(server.catalog.lock().await.len(), 1);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_combinations() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;
    server.add("Alien", "Horror,Sci-Fi").await;
    server.add("Heat", "Crime,Drama").await;
    server.add("Up", "Animation,Drama").await;

    let by_title = server.post("/search", &[("title", "alien")]).await;
    let page = by_title.text().await.unwrap();
    assert!(page.contains("Alien"));
    assert!(!page.contains("Heat"));

    let by_genre = server.post("/search", &[("genre", "drama")]).await;
    let page = by_genre.text().await.unwrap();
    assert!(page.contains("Heat") && page.contains("Up"));
    assert!(page.find("Heat").unwrap() < page.find("Up</strong>").unwrap());

    let both_matching = server
        .post("/search", &[("title", "ALIEN"), ("genre", "sci-fi")])
        .await;
    assert!(both_matching.text().await.unwrap().contains("Alien"));

    let both_mismatched = server
        .post("/search", &[("title", "Alien"), ("genre", "Drama")])
        .await;
    assert!(both_mismatched.text().await.unwrap().contains("No movies found."));

    let empty_fields = server
        .post("/search", &[("title", ""), ("genre", "")])
        .await;
    assert!(empty_fields.text().await.unwrap().contains("No movies found."));
}

#[tokio::test]
async fn test_search_escapes_titles() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;
    server.add("<script>x</script>", "Drama").await;

    let page = server
        .post("/search", &[("genre", "Drama")])
        .await
        .text()
        .await
        .unwrap();

    assert!(page.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!page.contains("<script>x"));
}

// ============================================================================
// Recommend
// ============================================================================

#[tokio::test]
async fn test_recommend_top_n_orders_by_rating() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;
    server.add("Short", "Drama").await; // 2 words
    server.add("Long", "Drama,Crime,War").await; // 4 words
    server.add("Mid", "Drama,Crime").await; // 3 words

    let page = server
        .post("/recommend", &[("top_n", "2")])
        .await
        .text()
        .await
        .unwrap();

    assert!(page.contains("Recommendations (Top N)"));
    let long = page.find("Long").unwrap();
    let mid = page.find("Mid").unwrap();
    assert!(long < mid);
    assert!(!page.contains("Short"));
}

#[tokio::test]
async fn test_recommend_by_genre() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;
    server.add("Alien", "Horror").await;
    server.add("Heat", "Crime").await;

    let page = server
        .post("/recommend", &[("top_n", ""), ("genre", "HORROR")])
        .await
        .text()
        .await
        .unwrap();

    assert!(page.contains("Recommendations (Genre)"));
    assert!(page.contains("Alien"));
    assert!(!page.contains("Heat"));
}

#[tokio::test]
async fn test_recommend_rejects_bad_input() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;

    let missing = server.post("/recommend", &[]).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        missing.text().await.unwrap(),
        "Please provide either Top N or Genre for recommendations."
    );

    let not_a_number = server.post("/recommend", &[("top_n", "many")]).await;
    assert_eq!(not_a_number.status(), StatusCode::BAD_REQUEST);

    let negative = server.post("/recommend", &[("top_n", "-3")]).await;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_then_not_found() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;
    server.add("X", "").await;
    server.add("Y", "").await;

    let first = server.post("/delete", &[("title", "x")]).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(server.catalog.lock().await.len(), 1);

    let second = server.post("/delete", &[("title", "x")]).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert_eq!(second.text().await.unwrap(), "Movie not found!");
    assert!(server.catalog.lock().await.search_by_title("Y").is_some());
}

#[tokio::test]
async fn test_delete_requires_title() {
    let server = TestServer::start(Arc::new(WordCountPredictor)).await;
    server.add("Heat", "Crime").await;

    let response = server.post("/delete", &[("title", "")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Title is required.");
    assert_eq!(server.catalog.lock().await.len(), 1);
}
