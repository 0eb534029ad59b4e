//! Settings for the stock form client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with the STOCK_LOGIC prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{EnvelopeMode, SubmissionMapper, Vocabulary};

/// Main client configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Script endpoint configuration
    pub endpoint: EndpointConfig,

    /// Submission request shape
    pub submission: SubmissionConfig,

    /// Simulated latency when no endpoint is configured
    pub demo: DemoConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    /// Deployed script URL; empty runs against built-in data
    pub url: String,

    /// Append `?t=<millis>` to configuration fetches
    pub cache_bust: bool,

    /// Client-side request timeout in seconds, 0 for the transport default
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct SubmissionConfig {
    pub envelope: EnvelopeMode,
    pub vocabulary: Vocabulary,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    pub config_delay_ms: u64,
    pub submit_delay_ms: u64,
}

impl Config {
    /// Load configuration from .env, files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment =
            std::env::var("STOCK_LOGIC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("endpoint.url", "")?
            .set_default("endpoint.cache_bust", true)?
            .set_default("endpoint.timeout_secs", 0)?
            .set_default("submission.envelope", "action")?
            .set_default("submission.vocabulary", "v2")?
            .set_default("demo.config_delay_ms", 800)?
            .set_default("demo.submit_delay_ms", 1500)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOCK_LOGIC prefix)
            .add_source(
                Environment::with_prefix("STOCK_LOGIC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl EndpointConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn timeout(&self) -> Option<std::time::Duration> {
        (self.timeout_secs > 0).then(|| std::time::Duration::from_secs(self.timeout_secs))
    }
}

impl SubmissionConfig {
    pub fn mapper(&self) -> SubmissionMapper {
        SubmissionMapper::new(self.vocabulary, self.envelope)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            cache_bust: true,
            timeout_secs: 0,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            config_delay_ms: 800,
            submit_delay_ms: 1500,
        }
    }
}
