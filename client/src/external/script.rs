//! HTTP client for the deployed sheet script

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde_json::Value;

use super::ScriptTransport;
use crate::config::EndpointConfig;
use crate::error::{ClientError, ClientResult};

/// A CORS "simple" content type. The script parses the raw body as JSON
/// whatever the header says, and it cannot answer a preflight.
pub const SIMPLE_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Script endpoint client
#[derive(Clone)]
pub struct HttpScriptClient {
    client: Client,
    endpoint: String,
    cache_bust: bool,
}

impl HttpScriptClient {
    /// Create a client with default settings for an endpoint
    pub fn new(endpoint: impl Into<String>) -> ClientResult<Self> {
        Self::from_config(&EndpointConfig {
            url: endpoint.into(),
            ..EndpointConfig::default()
        })
    }

    pub fn from_config(config: &EndpointConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.url.trim().to_string(),
            cache_bust: config.cache_bust,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn ensure_success(response: Response) -> ClientResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ScriptTransport for HttpScriptClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_document(&self) -> ClientResult<Value> {
        let mut request = self.client.get(&self.endpoint);
        if self.cache_bust {
            request = request.query(&[("t", Utc::now().timestamp_millis())]);
        }

        let response = Self::ensure_success(request.send().await?).await?;
        let text = response.text().await?;

        serde_json::from_str(&text)
            .map_err(|e| ClientError::MalformedResponse(format!("invalid JSON: {}", e)))
    }

    async fn post_text(&self, body: String) -> ClientResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SIMPLE_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}
