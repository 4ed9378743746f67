use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single endpoint the runner compares across environments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub path: String,
    pub method: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Environments under comparison
    pub production_base_url: Option<String>,
    pub integration_base_url: Option<String>,
    pub endpoints: Vec<EndpointConfig>,

    // HTTP client
    pub http_timeout_seconds: Option<u64>,

    // Runner
    pub runner_interval_seconds: u64,

    // Server
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,

            // Environments
            production_base_url: non_empty_var("PRODUCTION_BASE_URL"),
            integration_base_url: non_empty_var("INTEGRATION_BASE_URL"),
            endpoints: load_endpoints()?,

            // HTTP client
            http_timeout_seconds: match non_empty_var("HTTP_TIMEOUT_SECONDS") {
                Some(raw) => Some(
                    raw.parse()
                        .map_err(|_| ConfigError::Invalid("HTTP_TIMEOUT_SECONDS"))?,
                ),
                None => None,
            },

            // Runner
            runner_interval_seconds: env::var("RUNNER_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("RUNNER_INTERVAL_SECONDS"))?,

            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Per-request timeout, if one was configured
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_seconds.map(Duration::from_secs)
    }

    pub fn runner_interval(&self) -> Duration {
        Duration::from_secs(self.runner_interval_seconds)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// `API_ENDPOINTS` (inline JSON) wins over `API_ENDPOINTS_FILE`.
fn load_endpoints() -> Result<Vec<EndpointConfig>, ConfigError> {
    if let Some(raw) = non_empty_var("API_ENDPOINTS") {
        return parse_endpoints(&raw).ok_or(ConfigError::Invalid("API_ENDPOINTS"));
    }

    if let Some(path) = non_empty_var("API_ENDPOINTS_FILE") {
        let raw = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::Invalid("API_ENDPOINTS_FILE"))?;
        return parse_endpoints(&raw).ok_or(ConfigError::Invalid("API_ENDPOINTS_FILE"));
    }

    Ok(Vec::new())
}

pub fn parse_endpoints(raw: &str) -> Option<Vec<EndpointConfig>> {
    serde_json::from_str(raw).ok()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
