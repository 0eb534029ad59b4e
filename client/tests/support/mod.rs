//! Test doubles for the script endpoint
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stock_logic_client::{ClientError, ClientResult, ScriptTransport};

// ============================================================================
// In-memory transport
// ============================================================================

/// Serves a fixed document (or a 503 when `None`) and records posts
pub struct FakeTransport {
    pub document: Mutex<Option<Value>>,
    pub posts: Mutex<Vec<String>>,
    pub fetches: AtomicUsize,
    pub accept_posts: bool,
    pub post_delay: Duration,
}

impl FakeTransport {
    pub fn serving(document: Value) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            posts: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
            accept_posts: true,
            post_delay: Duration::ZERO,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            document: Mutex::new(None),
            ..Self::serving(Value::Null)
        }
    }

    pub fn rejecting_posts(mut self) -> Self {
        self.accept_posts = false;
        self
    }

    pub fn with_post_delay(mut self, delay: Duration) -> Self {
        self.post_delay = delay;
        self
    }

    pub fn set_document(&self, document: Option<Value>) {
        *self.document.lock().unwrap() = document;
    }

    pub fn posted(&self) -> Vec<Value> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .map(|body| serde_json::from_str(body).unwrap())
            .collect()
    }
}

#[async_trait]
impl ScriptTransport for FakeTransport {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn fetch_document(&self) -> ClientResult<Value> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let document = self.document.lock().unwrap().clone();
        document.ok_or(ClientError::Status {
            status: 503,
            body: "Service Unavailable".to_string(),
        })
    }

    async fn post_text(&self, body: String) -> ClientResult<()> {
        self.posts.lock().unwrap().push(body);
        if !self.post_delay.is_zero() {
            tokio::time::sleep(self.post_delay).await;
        }
        if self.accept_posts {
            Ok(())
        } else {
            Err(ClientError::Status {
                status: 500,
                body: "Script error".to_string(),
            })
        }
    }
}

/// A festival configuration in the enveloped shape
pub fn event_document() -> Value {
    json!({
        "status": "success",
        "data": {
            "products": [
                { "id": "p1", "category": "Spirits", "name": "Bombay Sapphire Gin", "caseSize": 6 },
                { "id": "p5", "category": "Soft Drinks", "name": "Coke 330ml", "caseSize": 24 },
                { "category": "Soft Drinks", "name": "RedBull", "caseSize": "24" }
            ],
            "locations": [
                { "id": "l1", "name": "Bar 1A", "type": "Bar" },
                { "id": "l6", "name": "Main Storage", "type": "Storage" }
            ],
            "staff": [
                { "id": "s1", "name": "Manager Dave", "role": "Admin" },
                { "id": "s2", "name": "Sarah Lead", "role": "Staff", "pin": 2580 }
            ],
            "openingSnapshot": {
                "Bar 1A": { "Coke 330ml": 48, "RedBull": 24 }
            }
        }
    })
}

// ============================================================================
// Loopback HTTP endpoint
// ============================================================================

/// What the loopback endpoint saw
#[derive(Clone, Default)]
pub struct Recorded {
    pub queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    /// (content type, body) per POST
    pub posts: Arc<Mutex<Vec<(String, String)>>>,
}

/// How the loopback endpoint answers
#[derive(Clone)]
pub struct EndpointBehaviour {
    pub config_status: StatusCode,
    pub config_body: String,
    pub config_delay: Duration,
    pub post_status: StatusCode,
}

impl EndpointBehaviour {
    pub fn serving(document: &Value) -> Self {
        Self {
            config_status: StatusCode::OK,
            config_body: document.to_string(),
            config_delay: Duration::ZERO,
            post_status: StatusCode::OK,
        }
    }
}

#[derive(Clone)]
struct EndpointState {
    behaviour: EndpointBehaviour,
    recorded: Recorded,
}

/// Start a script-like endpoint on 127.0.0.1 and return its `/exec` URL
pub async fn spawn_endpoint(behaviour: EndpointBehaviour) -> (String, Recorded) {
    let recorded = Recorded::default();
    let state = EndpointState {
        behaviour,
        recorded: recorded.clone(),
    };

    let app = Router::new()
        .route("/exec", get(serve_config).post(record_post))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/exec", addr), recorded)
}

/// A URL nothing is listening on
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/exec", addr)
}

async fn serve_config(
    State(state): State<EndpointState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.recorded.queries.lock().unwrap().push(params);
    if !state.behaviour.config_delay.is_zero() {
        tokio::time::sleep(state.behaviour.config_delay).await;
    }
    (
        state.behaviour.config_status,
        [(header::CONTENT_TYPE, "application/json")],
        state.behaviour.config_body.clone(),
    )
}

async fn record_post(State(state): State<EndpointState>, headers: HeaderMap, body: String) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.recorded.posts.lock().unwrap().push((content_type, body));
    state.behaviour.post_status
}
