use anyhow::{Context, Result, anyhow};
use catalog::{Catalog, RatingPredictor};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ml_client::{GrpcRatingPredictor, LinearTextModel};
use server::forms::split_genres;
use server::{CatalogServer, ServerConfig, DEFAULT_BIND_ADDR};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// CineMatch - keep a list of movies rated by a prediction model
#[derive(Parser, Debug)]
#[command(name = "cinematch")]
#[command(about = "Movie catalog with model-predicted ratings", long_about = None)]
struct Cli {
    /// Address of the gRPC rating service
    #[arg(long, env = "CINEMATCH_ML_SERVICE", default_value = "http://localhost:50051")]
    ml_service: String,

    /// Load a linear model artifact (JSON) instead of calling the rating service
    #[arg(long, env = "CINEMATCH_MODEL_ARTIFACT")]
    model_artifact: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web front end
    Serve {
        /// Address to listen on
        #[arg(long, env = "CINEMATCH_BIND", default_value = DEFAULT_BIND_ADDR)]
        bind: SocketAddr,
    },

    /// Predict the rating a movie would get when added
    Predict {
        /// Movie title
        #[arg(long)]
        title: String,

        /// Comma-separated genres, split exactly as the web form does
        #[arg(long, default_value = "")]
        genres: String,
    },
}

/// Where ratings come from
#[derive(Debug, Clone, PartialEq, Eq)]
enum PredictorSource {
    Service(String),
    Artifact(PathBuf),
}

impl PredictorSource {
    /// A model artifact, when given, takes precedence over the service.
    fn from_cli(cli: &Cli) -> Self {
        match &cli.model_artifact {
            Some(path) => PredictorSource::Artifact(path.clone()),
            None => PredictorSource::Service(cli.ml_service.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // The predictor is built once and shared for the life of the process
    let start = Instant::now();
    let predictor = build_predictor(&PredictorSource::from_cli(&cli)).await?;
    info!(
        "Rating predictor '{}' ready in {:?}",
        predictor.name(),
        start.elapsed()
    );

    match cli.command {
        Commands::Serve { bind } => handle_serve(predictor, bind).await?,
        Commands::Predict { title, genres } => handle_predict(predictor, title, genres).await?,
    }

    Ok(())
}

async fn build_predictor(source: &PredictorSource) -> Result<Arc<dyn RatingPredictor>> {
    match source {
        PredictorSource::Service(addr) => {
            let client = GrpcRatingPredictor::connect(addr.clone())
                .await
                .with_context(|| format!("Failed to connect to rating service at {}", addr))?;
            Ok(Arc::new(client))
        }
        PredictorSource::Artifact(path) => {
            let model = LinearTextModel::load(path).with_context(|| {
                format!("Failed to load model artifact {}", path.display())
            })?;
            Ok(Arc::new(model))
        }
    }
}

/// Handle the 'serve' command
async fn handle_serve(predictor: Arc<dyn RatingPredictor>, bind: SocketAddr) -> Result<()> {
    let config = ServerConfig::new(bind);
    let server = CatalogServer::new(Catalog::new(predictor));

    server
        .run(&config, shutdown_signal())
        .await
        .with_context(|| format!("Server on {} failed", config.bind_addr))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}

/// Handle the 'predict' command
async fn handle_predict(
    predictor: Arc<dyn RatingPredictor>,
    title: String,
    genres: String,
) -> Result<()> {
    if title.is_empty() {
        return Err(anyhow!("Title must not be empty"));
    }

    let mut catalog = Catalog::new(predictor);
    catalog
        .add(&title, split_genres(&genres))
        .await
        .context("Failed to predict rating")?;

    let movie = catalog
        .search_by_title(&title)
        .ok_or_else(|| anyhow!("Movie {} was not added", title))?;

    println!(
        "{} {} [{}] - Predicted rating: {} (via {})",
        "✓".green(),
        movie.title().bold(),
        movie.genres().join(", "),
        format!("{:.1}", movie.rating()).cyan(),
        catalog.predictor_name()
    );
    Ok(())
}
