//! Configuration management for Focus Timer
//!
//! Handles environment variables and application settings. Timer durations
//! are fixed and deliberately absent here.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// CORS origins (empty means allow all)
    pub cors_origins: Vec<String>,

    /// Enable request logging
    pub enable_request_logging: bool,

    /// Maximum completed sessions kept in memory (0 keeps none)
    pub session_history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            cors_origins: vec![],
            enable_request_logging: true,
            session_history_limit: 1000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server configuration
        if let Ok(host) = env::var("FOCUS_TIMER_HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("FOCUS_TIMER_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }

        // Environment
        if let Ok(environment) = env::var("FOCUS_TIMER_ENVIRONMENT") {
            config.environment = environment;
        }

        // Logging
        if let Ok(log_level) = env::var("FOCUS_TIMER_LOG_LEVEL") {
            config.log_level = log_level;
        }

        // CORS origins
        if let Ok(cors_origins) = env::var("FOCUS_TIMER_CORS_ORIGINS") {
            config.cors_origins = cors_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Feature flags
        if let Ok(enable_logging) = env::var("FOCUS_TIMER_ENABLE_REQUEST_LOGGING") {
            config.enable_request_logging = enable_logging
                .parse()
                .map_err(|_| ConfigError::InvalidBool(enable_logging))?;
        }

        if let Ok(limit) = env::var("FOCUS_TIMER_SESSION_HISTORY_LIMIT") {
            config.session_history_limit = limit
                .parse()
                .map_err(|_| ConfigError::InvalidHistoryLimit(limit))?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }

        if !matches!(self.environment.as_str(), "development" | "production" | "test") {
            return Err(ConfigError::UnknownEnvironment(self.environment.clone()));
        }

        if !matches!(
            self.log_level.to_ascii_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }

        Ok(())
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get server URL
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Log configuration
    pub fn log_config(&self) {
        info!("Configuration loaded:");
        info!("  Environment: {}", self.environment);
        info!("  Bind address: {}", self.bind_address());
        info!("  Log level: {}", self.log_level);
        info!("  CORS origins: {:?}", self.cors_origins);
        info!("  Request logging: {}", self.enable_request_logging);
        info!("  Session history limit: {}", self.session_history_limit);
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid boolean value: {0}")]
    InvalidBool(String),

    #[error("Invalid session history limit: {0}")]
    InvalidHistoryLimit(String),

    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Empty host")]
    EmptyHost,
}
