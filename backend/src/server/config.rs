//! Server configuration loaded via OrthoConfig, plus the assembled
//! [`ServerConfig`] handed to [`super::create_server`].

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_IDENTITY_TIMEOUT_SECONDS: u64 = 5;

/// Application settings sourced from environment, CLI, and config files.
///
/// All fields are optional; accessors supply the defaults so a bare
/// environment boots a self-contained in-memory deployment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TELECARE")]
pub struct AppSettings {
    /// Bind host.
    pub host: Option<String>,
    /// Bind port.
    pub port: Option<u16>,
    /// Base URL of a hosted GoTrue-style identity API. When unset the
    /// in-memory provider is used instead.
    pub identity_url: Option<String>,
    /// API key sent to the hosted identity API.
    pub identity_api_key: Option<String>,
    /// Per-request timeout for identity API calls, in seconds.
    pub identity_timeout_seconds: Option<u64>,
}

impl AppSettings {
    /// The configured bind host, defaulting to `0.0.0.0`.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// The configured bind port, defaulting to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// The configured identity API base URL and key, when both present.
    pub fn identity_api(&self) -> Option<(&str, &str)> {
        match (&self.identity_url, &self.identity_api_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }

    /// The per-request identity timeout, defaulting to five seconds.
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(
            self.identity_timeout_seconds
                .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECONDS),
        )
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration for the given bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
