//! Server crate for CineMatch.
//!
//! This crate contains the web front end: an axum router whose handlers
//! translate form submissions into catalog operations and render the
//! results as HTML.

pub mod app;
pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod views;

pub use app::{build_router, AppState, CatalogServer, SharedCatalog};
pub use config::{ServerConfig, DEFAULT_BIND_ADDR};
pub use error::AppError;
