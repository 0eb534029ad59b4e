//! Stand-in transport used when no endpoint URL is configured

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::ScriptTransport;
use crate::config::DemoConfig;
use crate::error::{ClientError, ClientResult};

/// Simulates network latency. Fetches report [`ClientError::NotConfigured`]
/// so the loader serves built-in data; posts always succeed.
#[derive(Debug, Clone)]
pub struct DemoScriptClient {
    config_delay: Duration,
    submit_delay: Duration,
}

impl DemoScriptClient {
    pub fn new(config_delay: Duration, submit_delay: Duration) -> Self {
        Self {
            config_delay,
            submit_delay,
        }
    }

    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(
            Duration::from_millis(config.config_delay_ms),
            Duration::from_millis(config.submit_delay_ms),
        )
    }
}

#[async_trait]
impl ScriptTransport for DemoScriptClient {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn fetch_document(&self) -> ClientResult<Value> {
        tokio::time::sleep(self.config_delay).await;
        Err(ClientError::NotConfigured)
    }

    async fn post_text(&self, body: String) -> ClientResult<()> {
        tokio::time::sleep(self.submit_delay).await;
        tracing::info!("Demo submission accepted ({} bytes)", body.len());
        Ok(())
    }
}
