//! Router construction and the HTTP server loop.

use std::future::Future;
use std::io;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use catalog::Catalog;

use crate::config::ServerConfig;
use crate::handlers;

/// The catalog, shared between requests.
///
/// Each request holds the lock for one whole catalog operation, including
/// the predictor call made by `add`.
pub type SharedCatalog = Arc<Mutex<Catalog>>;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
}

/// Build the web front end's router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/add", get(handlers::add_form).post(handlers::add_movie))
        .route("/search", get(handlers::search_form).post(handlers::search_movies))
        .route(
            "/recommend",
            get(handlers::recommend_form).post(handlers::recommend_movies),
        )
        .route("/delete", get(handlers::delete_form).post(handlers::delete_movie))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The CineMatch web server.
pub struct CatalogServer {
    state: AppState,
}

impl CatalogServer {
    /// Create a server around an already constructed catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            state: AppState {
                catalog: Arc::new(Mutex::new(catalog)),
            },
        }
    }

    /// Handle to the catalog this server operates on
    pub fn catalog(&self) -> SharedCatalog {
        self.state.catalog.clone()
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind the configured address and serve until `shutdown` completes.
    pub async fn run<F>(self, config: &ServerConfig, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(config.bind_addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` completes.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        let predictor = self.state.catalog.lock().await.predictor_name().to_string();
        info!(
            "CineMatch listening on http://{} (rating predictor: {})",
            addr, predictor
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("CineMatch server stopped");
        Ok(())
    }
}
