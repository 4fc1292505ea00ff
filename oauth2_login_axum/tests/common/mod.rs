//! Test harness: a mock Google endpoint, stub user stores and a cookie-keeping client

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Body,
    extract::{Form, State},
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};
use tower::ServiceExt;

use oauth2_login::{
    AuthService, Config, GoogleClient, InMemoryUserStore, SingleSlotSessionStore,
    StoredUserRecord, UserError, UserStore,
};
use oauth2_login_axum::app_router_no_trace;

/// What the mock provider answers with.
#[derive(Clone)]
pub struct MockGoogleBehavior {
    pub token_status: StatusCode,
    pub token_body: Value,
    pub userinfo_status: StatusCode,
    pub userinfo_body: Value,
    /// How long the token endpoint stalls before answering.
    pub token_delay: Duration,
}

impl Default for MockGoogleBehavior {
    fn default() -> Self {
        Self {
            token_status: StatusCode::OK,
            token_body: json!({"access_token": "t1", "token_type": "Bearer", "expires_in": 3599}),
            userinfo_status: StatusCode::OK,
            userinfo_body: json!({"id": "1", "email": "a@b.com", "name": "A", "picture": "p"}),
            token_delay: Duration::ZERO,
        }
    }
}

#[derive(Clone)]
struct MockGoogleState {
    behavior: MockGoogleBehavior,
    token_calls: Arc<AtomicUsize>,
    userinfo_calls: Arc<AtomicUsize>,
    last_token_form: Arc<Mutex<Option<HashMap<String, String>>>>,
    last_bearer: Arc<Mutex<Option<String>>>,
}

/// Handle to a running mock provider.
pub struct MockGoogle {
    pub base_url: String,
    token_calls: Arc<AtomicUsize>,
    userinfo_calls: Arc<AtomicUsize>,
    last_token_form: Arc<Mutex<Option<HashMap<String, String>>>>,
    last_bearer: Arc<Mutex<Option<String>>>,
}

impl MockGoogle {
    pub async fn start(behavior: MockGoogleBehavior) -> Self {
        let state = MockGoogleState {
            behavior,
            token_calls: Arc::new(AtomicUsize::new(0)),
            userinfo_calls: Arc::new(AtomicUsize::new(0)),
            last_token_form: Arc::new(Mutex::new(None)),
            last_bearer: Arc::new(Mutex::new(None)),
        };

        let app = Router::new()
            .route("/token", post(token))
            .route("/userinfo", get(userinfo))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock Google server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            token_calls: state.token_calls,
            userinfo_calls: state.userinfo_calls,
            last_token_form: state.last_token_form,
            last_bearer: state.last_bearer,
        }
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn userinfo_calls(&self) -> usize {
        self.userinfo_calls.load(Ordering::SeqCst)
    }

    pub fn last_token_form(&self) -> Option<HashMap<String, String>> {
        self.last_token_form.lock().expect("lock").clone()
    }

    pub fn last_bearer(&self) -> Option<String> {
        self.last_bearer.lock().expect("lock").clone()
    }
}

async fn token(
    State(state): State<MockGoogleState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.token_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_token_form.lock().expect("lock") = Some(form);
    if !state.behavior.token_delay.is_zero() {
        tokio::time::sleep(state.behavior.token_delay).await;
    }
    (
        state.behavior.token_status,
        Json(state.behavior.token_body.clone()),
    )
        .into_response()
}

async fn userinfo(State(state): State<MockGoogleState>, headers: HeaderMap) -> Response {
    state.userinfo_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_bearer.lock().expect("lock") = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (
        state.behavior.userinfo_status,
        Json(state.behavior.userinfo_body.clone()),
    )
        .into_response()
}

/// In-memory user store that can be switched to reject upserts the way PostgREST does.
pub struct SwitchableUserStore {
    pub inner: InMemoryUserStore,
    reject: AtomicBool,
    pub calls: AtomicUsize,
}

impl SwitchableUserStore {
    pub fn new(reject: bool) -> Self {
        Self {
            inner: InMemoryUserStore::new(),
            reject: AtomicBool::new(reject),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_reject(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for SwitchableUserStore {
    async fn upsert_user(&self, record: StoredUserRecord) -> Result<(), UserError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject.load(Ordering::SeqCst) {
            return Err(UserError::Rejected {
                message: "relation \"public.users\" does not exist (code 42P01)".to_string(),
                hint: Some("Create the users table with a unique email column.".to_string()),
            });
        }
        self.inner.upsert_user(record).await
    }
}

pub fn test_config(google_base_url: &str) -> Config {
    let token_url = format!("{google_base_url}/token");
    let userinfo_url = format!("{google_base_url}/userinfo");
    Config::from_lookup(move |name| match name {
        "GOOGLE_CLIENT_ID" => Some("test-client".to_string()),
        "GOOGLE_CLIENT_SECRET" => Some("test-secret".to_string()),
        "SUPABASE_URL" => Some("http://127.0.0.1:9".to_string()),
        "SUPABASE_KEY" => Some("test-key".to_string()),
        "GOOGLE_TOKEN_URL" => Some(token_url.clone()),
        "GOOGLE_USERINFO_URL" => Some(userinfo_url.clone()),
        _ => None,
    })
    .expect("test config")
}

pub fn build_app(config: Config, users: Arc<dyn UserStore>) -> Router {
    let google = GoogleClient::new(&config).expect("google client");
    let auth = AuthService::new(
        Arc::new(config),
        google,
        users,
        Arc::new(SingleSlotSessionStore::new()),
    );
    app_router_no_trace(auth)
}

pub fn default_app(google: &MockGoogle) -> (Router, Arc<InMemoryUserStore>) {
    let users = Arc::new(InMemoryUserStore::new());
    let app = build_app(test_config(&google.base_url), users.clone());
    (app, users)
}

/// A response with its body already read.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("JSON body")
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// Drives the router like a browser: remembers cookies between requests.
pub struct TestBrowser {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl TestBrowser {
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
        }
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let mut request = Request::builder().method("GET").uri(uri);
        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            request = request.header(header::COOKIE, cookie_header);
        }
        let request = request.body(Body::empty()).expect("request");

        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");

        for set_cookie in headers.get_all(header::SET_COOKIE) {
            self.store_cookie(set_cookie.to_str().expect("ascii cookie"));
        }

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn store_cookie(&mut self, set_cookie: &str) {
        let mut parts = set_cookie.split(';').map(str::trim);
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let expired = parts.any(|attr| attr.eq_ignore_ascii_case("Max-Age=0"));
        if expired || value.is_empty() {
            self.cookies.remove(name);
        } else {
            self.cookies.insert(name.to_string(), value.to_string());
        }
    }

    /// Starts sign-in and returns the `state` the provider would echo back.
    pub async fn begin_login(&mut self) -> String {
        let response = self.get("/auth/google").await;
        assert_eq!(response.status, StatusCode::FOUND);
        let location = response.location().expect("Location header").to_string();
        url_state(&location).expect("state in authorization URL")
    }

    /// Runs the whole redirect and callback dance with authorization code `code`.
    pub async fn login(&mut self, code: &str) -> TestResponse {
        let state = self.begin_login().await;
        self.get(&format!("/auth/google/callback?code={code}&state={state}"))
            .await
    }
}

fn url_state(location: &str) -> Option<String> {
    let (_, query) = location.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == "state")
        .map(|(_, v)| v.to_string())
}
