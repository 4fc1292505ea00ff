//! Mock PostgREST endpoint shared by the user store tests

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub table: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
pub struct MockPostgrest {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status: StatusCode,
    error_body: Option<Value>,
}

impl MockPostgrest {
    /// Starts a mock that answers every upsert with `status` and, on failure, `error_body`.
    pub async fn start(status: StatusCode, error_body: Option<Value>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            status,
            error_body,
        };

        let app = Router::new()
            .route("/rest/v1/{table}", post(upsert))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock PostgREST");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

async fn upsert(
    State(state): State<MockState>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().expect("lock").push(RecordedRequest {
        table,
        query,
        headers,
        body,
    });
    (
        state.status,
        Json(state.error_body.clone().unwrap_or(Value::Null)),
    )
}
