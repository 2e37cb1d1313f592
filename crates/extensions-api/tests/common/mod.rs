//! Mock Runtime API shared by the integration tests.
//!
//! Serves the two Extensions API routes with canned replies and records every
//! request it sees. The server runs on its own current-thread tokio runtime in
//! a background thread so the blocking client under test can call it directly.

#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use lifecycle::{Config, LogFormat, LogLevel, RuntimeApiAddress};

pub const REGISTER_PATH: &str = "/2020-01-01/extension/register";
pub const NEXT_PATH: &str = "/2020-01-01/extension/event/next";

/// A canned reply for one route.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::status(StatusCode::OK, body)
    }

    pub fn status(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        for (name, value) in self.headers {
            response.headers_mut().insert(
                HeaderName::from_bytes(name.as_bytes()).expect("valid header name"),
                HeaderValue::from_str(&value).expect("valid header value"),
            );
        }
        response
    }
}

/// A request as received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: &'static str,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct MockState {
    register: Reply,
    next: Reply,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    fn record(&self, method: Method, path: &'static str, headers: HeaderMap, body: Bytes) {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(RecordedRequest {
                method,
                path,
                headers,
                body: body.to_vec(),
            });
    }
}

async fn register(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Reply {
    state.record(Method::POST, REGISTER_PATH, headers, body);
    state.register.clone()
}

async fn next(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Reply {
    state.record(Method::GET, NEXT_PATH, headers, body);
    state.next.clone()
}

/// Handle to a running mock Runtime API.
pub struct MockRuntimeApi {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockRuntimeApi {
    pub fn start(register_reply: Reply, next_reply: Reply) -> Self {
        let state = Arc::new(MockState {
            register: register_reply,
            next: next_reply,
            requests: Mutex::new(Vec::new()),
        });

        let router = Router::new()
            .route(REGISTER_PATH, post(register))
            .route(NEXT_PATH, get(next))
            .with_state(Arc::clone(&state));

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("mock runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind mock Runtime API");
                tx.send(listener.local_addr().expect("local addr"))
                    .expect("report mock address");
                axum::serve(listener, router).await.expect("serve mock Runtime API");
            });
        });

        let addr = rx.recv().expect("mock Runtime API address");
        Self { addr, state }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("request log poisoned").clone()
    }

    pub fn config(&self) -> Config {
        config_for(self.addr)
    }
}

pub fn config_for(addr: SocketAddr) -> Config {
    Config {
        runtime_api: RuntimeApiAddress::new(addr.to_string()).expect("non-empty address"),
        log_level: LogLevel::Info,
        log_format: LogFormat::Text,
    }
}

/// Address nothing is listening on.
pub fn unreachable_addr() -> SocketAddr {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("bind probe port");
    listener.local_addr().expect("probe addr")
}
