/*!
Stub HTTP server for tests without network access

Serves canned responses on an ephemeral localhost port and records every
request it receives (path, query string, Accept header), so tests can point
the refresher or the search client at it and assert on what was sent.
*/

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub accept: Option<String>,
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    content_type: String,
    body: String,
    delay: Option<Duration>,
}

#[derive(Clone)]
struct StubState {
    routes: Arc<HashMap<String, CannedResponse>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Declares the routes of a [`StubServer`] before it starts listening
#[derive(Default)]
pub struct StubServerBuilder {
    routes: HashMap<String, CannedResponse>,
}

impl StubServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves a Turtle identity document at `path` with the given status
    pub fn document(mut self, path: &str, status: u16) -> Self {
        self.routes.insert(path.to_string(), CannedResponse {
            status: status_code(status),
            content_type: "text/turtle".to_string(),
            body: crate::fixtures::turtle_profile("Stub Person"),
            delay: None,
        });
        self
    }

    /// Serves a document that only answers after `delay`
    pub fn slow_document(mut self, path: &str, delay: Duration) -> Self {
        self.routes.insert(path.to_string(), CannedResponse {
            status: StatusCode::OK,
            content_type: "text/turtle".to_string(),
            body: crate::fixtures::turtle_profile("Slow Person"),
            delay: Some(delay),
        });
        self
    }

    /// Serves a JSON body at `path`
    pub fn json(mut self, path: &str, status: u16, body: Value) -> Self {
        self.routes.insert(path.to_string(), CannedResponse {
            status: status_code(status),
            content_type: "application/json".to_string(),
            body: body.to_string(),
            delay: None,
        });
        self
    }

    /// Serves an arbitrary text body at `path`
    pub fn text(mut self, path: &str, status: u16, content_type: &str, body: &str) -> Self {
        self.routes.insert(path.to_string(), CannedResponse {
            status: status_code(status),
            content_type: content_type.to_string(),
            body: body.to_string(),
            delay: None,
        });
        self
    }

    /// Binds 127.0.0.1 on an ephemeral port and starts serving in the background
    pub async fn start(self) -> Result<StubServer> {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            routes: Arc::new(self.routes),
            requests: requests.clone(),
        };

        let app = Router::new().fallback(dispatch).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                log::warn!("⚠️ [STUB] server stopped: {}", e);
            }
        });

        log::info!("🧪 [STUB] listening on http://{}", addr);
        Ok(StubServer { addr, requests, handle })
    }
}

/// Running stub server; stops serving when dropped
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub fn builder() -> StubServerBuilder {
        StubServerBuilder::new()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// All requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn dispatch(State(state): State<StubState>, req: Request) -> Response {
    let path = req.uri().path().to_string();
    let recorded = RecordedRequest {
        path: path.clone(),
        query: req.uri().query().map(str::to_string),
        accept: req
            .headers()
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    log::info!("📨 [STUB] {} {:?}", recorded.path, recorded.query);
    state.requests.lock().unwrap().push(recorded);

    let Some(canned) = state.routes.get(&path).cloned() else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };

    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    (canned.status, [(header::CONTENT_TYPE, canned.content_type)], canned.body).into_response()
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Returns a localhost URL on which nothing is listening
pub async fn unreachable_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/profile/card#me", addr))
}
