//! Server configuration.

use std::net::SocketAddr;

/// Address the web front end listens on unless configured otherwise
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Settings for the HTTP front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}
