//! Loads and normalizes the event configuration

use shared::{fallback_config, normalize_document, AppConfig};
use std::sync::Arc;

use crate::error::{ClientError, ClientResult};
use crate::external::ScriptTransport;

/// Fetches the configuration document and fails closed to built-in data
#[derive(Clone)]
pub struct ConfigLoader {
    transport: Arc<dyn ScriptTransport>,
}

impl ConfigLoader {
    pub fn new(transport: Arc<dyn ScriptTransport>) -> Self {
        Self { transport }
    }

    /// Never fails: any transport, status or shape problem yields the fallback dataset
    pub async fn load(&self) -> AppConfig {
        match self.try_load().await {
            Ok(config) => {
                tracing::info!(
                    "Loaded configuration via {}: {} products, {} locations, {} staff",
                    self.transport.name(),
                    config.products.len(),
                    config.locations.len(),
                    config.staff.len()
                );
                config
            }
            Err(ClientError::NotConfigured) => {
                tracing::warn!("Using built-in configuration (no endpoint configured)");
                fallback_config()
            }
            Err(e) => {
                tracing::warn!(code = e.code(), "Failed to fetch configuration, using built-in data: {}", e);
                fallback_config()
            }
        }
    }

    /// The raw outcome, for callers that want to know why a fallback happened
    pub async fn try_load(&self) -> ClientResult<AppConfig> {
        let raw = self.transport.fetch_document().await?;
        Ok(normalize_document(raw)?)
    }
}
