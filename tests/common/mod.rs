//! Shared utilities for integration testing.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// In-process stand-in for one backend record service.
///
/// Implements the backend interface the gateway depends on: JSON CRUD over
/// one resource, a 404 on missing ids, exactly one required field enforced
/// at creation, and no cross-entity checks. Counts every call it receives
/// so tests can assert that no upstream traffic happened.
#[derive(Clone)]
pub struct MockBackend {
    resource: &'static str,
    required_field: &'static str,
    items: Arc<Mutex<BTreeMap<i64, Value>>>,
    next_id: Arc<AtomicI64>,
    calls: Arc<AtomicU32>,
}

impl MockBackend {
    pub fn new(resource: &'static str, required_field: &'static str) -> Self {
        Self {
            resource,
            required_field,
            items: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Total requests this backend has served.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of one stored item.
    pub fn item(&self, id: i64) -> Option<Value> {
        self.items.lock().unwrap().get(&id).cloned()
    }

    fn router(&self) -> Router {
        let collection = format!("/{}", self.resource);
        let item = format!("/{}/{{id}}", self.resource);
        Router::new()
            .route(&collection, get(list).post(create))
            .route(&item, get(fetch).put(update).delete(remove))
            .with_state(self.clone())
    }
}

async fn list(State(backend): State<MockBackend>) -> Json<Value> {
    backend.calls.fetch_add(1, Ordering::SeqCst);
    let items: Vec<Value> = backend.items.lock().unwrap().values().cloned().collect();
    Json(Value::Array(items))
}

async fn create(
    State(backend): State<MockBackend>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    backend.calls.fetch_add(1, Ordering::SeqCst);
    if payload.get(backend.required_field).map_or(true, Value::is_null) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": format!("{} is required", backend.required_field)})),
        );
    }
    let id = backend.next_id.fetch_add(1, Ordering::SeqCst);
    let mut stored = payload;
    stored["id"] = json!(id);
    backend.items.lock().unwrap().insert(id, stored.clone());
    (StatusCode::OK, Json(stored))
}

async fn fetch(State(backend): State<MockBackend>, Path(id): Path<i64>) -> impl IntoResponse {
    backend.calls.fetch_add(1, Ordering::SeqCst);
    match backend.items.lock().unwrap().get(&id) {
        Some(item) => (StatusCode::OK, Json(item.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))),
    }
}

async fn update(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    backend.calls.fetch_add(1, Ordering::SeqCst);
    let mut items = backend.items.lock().unwrap();
    if !items.contains_key(&id) {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"})));
    }
    // Full replacement of all mutable fields.
    let mut stored = payload;
    stored["id"] = json!(id);
    items.insert(id, stored.clone());
    (StatusCode::OK, Json(stored))
}

async fn remove(State(backend): State<MockBackend>, Path(id): Path<i64>) -> impl IntoResponse {
    backend.calls.fetch_add(1, Ordering::SeqCst);
    match backend.items.lock().unwrap().remove(&id) {
        Some(_) => (StatusCode::OK, Json(json!({"message": "deleted"}))),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))),
    }
}

/// Start a mock backend on an ephemeral port; returns its handle and base URL.
pub async fn start_backend(resource: &'static str, required_field: &'static str) -> (MockBackend, String) {
    let backend = MockBackend::new(resource, required_field);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = backend.router();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    (backend, format!("http://{addr}"))
}

/// Start a backend that sleeps before answering every request.
#[allow(dead_code)]
pub async fn start_slow_backend(delay: Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        Json(json!([]))
    });
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

/// Wait until a TCP endpoint accepts connections.
#[allow(dead_code)]
pub async fn wait_ready(addr: SocketAddr) {
    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("endpoint {addr} never became ready");
}
