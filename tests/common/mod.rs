//! Mock DeepLX server for integration tests

#![allow(dead_code)]

use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock answers on `POST /translate`
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::raw(status, body.to_string())
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Request seen by the mock
#[derive(Clone, Debug)]
pub struct Captured {
    pub body: serde_json::Value,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    captured: Arc<Mutex<Vec<Captured>>>,
    checks: Arc<Mutex<usize>>,
}

/// Running mock server bound to an ephemeral port
pub struct MockServer {
    pub url: String,
    captured: Arc<Mutex<Vec<Captured>>>,
    checks: Arc<Mutex<usize>>,
}

impl MockServer {
    /// Start serving `reply` on the current tokio runtime
    pub async fn start(reply: Reply) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let checks = Arc::new(Mutex::new(0));
        let state = MockState {
            reply,
            captured: captured.clone(),
            checks: checks.clone(),
        };

        let app = Router::new()
            .route("/", get(root))
            .route("/translate", post(translate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            captured,
            checks,
        }
    }

    /// Translation requests received so far
    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }

    /// Number of `GET /` reachability checks received
    pub fn checks(&self) -> usize {
        *self.checks.lock().unwrap()
    }
}

async fn root(axum::extract::State(state): axum::extract::State<MockState>) -> &'static str {
    *state.checks.lock().unwrap() += 1;
    "DeepLX API"
}

async fn translate(
    axum::extract::State(state): axum::extract::State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.captured.lock().unwrap().push(Captured {
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
        authorization: header("authorization"),
        content_type: header("content-type"),
        user_agent: header("user-agent"),
    });

    if !state.reply.delay.is_zero() {
        tokio::time::sleep(state.reply.delay).await;
    }

    (
        state.reply.status,
        [("content-type", "application/json")],
        state.reply.body.clone(),
    )
}

/// An address nothing listens on
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
