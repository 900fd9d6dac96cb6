//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.
//! The configuration is an explicit value handed to each component at
//! construction time; nothing reads the environment after startup.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default base URL of the Financial Modeling Prep stable API.
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Default upstream request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Upstream API credentials and endpoint configuration.
    pub api: ApiConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the upstream Financial Modeling Prep API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key. When absent the server runs in demo mode, which the
    /// upstream restricts to a small set of symbols.
    pub api_key: Option<String>,

    /// Base URL that endpoint names are appended to.
    pub base_url: String,

    /// Bound on each upstream round trip, in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact the API key from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "fmp-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            api: ApiConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server and transport settings use the `MCP_` prefix; upstream API
    /// settings use the `FMP_` prefix.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        // Load upstream API settings
        if let Ok(api_key) = std::env::var("FMP_API_KEY") {
            if api_key.is_empty() {
                warn!("FMP_API_KEY is set but empty - ignoring it");
            } else {
                config.api.api_key = Some(api_key);
                info!("FMP API key loaded from environment");
            }
        } else {
            warn!(
                "FMP_API_KEY not set - running in demo mode with limited data \
                 (get a key at https://site.financialmodelingprep.com/developer/docs)"
            );
        }

        if let Ok(base_url) = std::env::var("FMP_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("FMP_TIMEOUT_SECS") {
            config.api.timeout_secs = timeout.parse().unwrap_or(DEFAULT_TIMEOUT_SECS);
        }

        config
    }
}
