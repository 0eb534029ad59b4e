//! Transports to the remote sheet script

pub mod demo;
pub mod script;

pub use demo::DemoScriptClient;
pub use script::HttpScriptClient;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::error::ClientResult;

/// The two calls the form makes against the script endpoint
#[async_trait]
pub trait ScriptTransport: Send + Sync {
    /// Short label for logs
    fn name(&self) -> &'static str;

    /// GET the configuration document
    async fn fetch_document(&self) -> ClientResult<Value>;

    /// POST an already encoded JSON body; the response body is not read
    async fn post_text(&self, body: String) -> ClientResult<()>;
}

/// HTTP when an endpoint URL is set, otherwise the demo transport
pub fn connect(config: &Config) -> ClientResult<Arc<dyn ScriptTransport>> {
    if config.endpoint.is_configured() {
        tracing::info!("Using script endpoint {}", config.endpoint.url.trim());
        Ok(Arc::new(HttpScriptClient::from_config(&config.endpoint)?))
    } else {
        tracing::warn!("No script endpoint configured, running on built-in data");
        Ok(Arc::new(DemoScriptClient::from_config(&config.demo)))
    }
}
