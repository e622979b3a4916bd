// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock gateway and helpers shared by the integration tests.

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use todo_client::config::Config;
use todo_client::services::BackendClient;
use todo_client::session::SessionStore;
use todo_client::App;

/// The only credential the mock gateway accepts.
pub const TEST_ID_TOKEN: &str = "test-id-token";
#[allow(dead_code)]
pub const TEST_ACCESS_TOKEN: &str = "test-access-token";
pub const TEST_USER: &str = "alice";

/// A request as seen by the mock gateway.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

/// Shared state of the mock gateway.
#[derive(Default)]
pub struct GatewayState {
    todos: Mutex<Vec<Value>>,
    next_id: AtomicU64,
    /// When set, every request fails with 500.
    pub fail: AtomicBool,
    pub logged_out: AtomicBool,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

#[allow(dead_code)]
impl GatewayState {
    /// Seed a to-do directly, bypassing the API.
    pub fn seed(&self, title: &str, complete: bool) -> String {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.todos.lock().unwrap().push(json!({
            "id": id.to_string(),
            "user": TEST_USER,
            "title": title,
            "description": "",
            "complete": complete,
        }));
        id.to_string()
    }

    pub fn todos(&self) -> Vec<Value> {
        self.todos.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

/// Start the mock gateway on an ephemeral port.
///
/// Returns the base URL and the shared state.
#[allow(dead_code)]
pub async fn spawn_gateway() -> (String, Arc<GatewayState>) {
    let state = Arc::new(GatewayState::default());

    let app = Router::new()
        .route("/auth/check-auth", get(check_auth))
        .route("/auth/user", get(user))
        .route("/auth/logout", get(logout))
        .route("/todo", get(list_todos).post(create_todo))
        .route("/todo/{id}", put(complete_todo).delete(delete_todo))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock gateway");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock gateway failed");
    });

    (format!("http://{}", addr), state)
}

/// Configuration pointing at a running mock gateway.
#[allow(dead_code)]
pub fn test_config(gateway: &str) -> Config {
    Config {
        gateway: gateway.to_string(),
        ..Config::test_default()
    }
}

/// Put a session the mock gateway accepts into `session`.
#[allow(dead_code)]
pub fn login(session: &SessionStore) {
    session.set(
        TEST_ACCESS_TOKEN,
        TEST_ID_TOKEN,
        Utc::now() + Duration::hours(2),
    );
}

/// A backend client with an accepted session.
#[allow(dead_code)]
pub fn logged_in_backend(gateway: &str) -> (BackendClient, SessionStore) {
    let session = SessionStore::new();
    login(&session);
    (BackendClient::new(gateway, session.clone()), session)
}

/// A fully wired application pointing at the mock gateway, logged out.
#[allow(dead_code)]
pub fn test_app(gateway: &str) -> App {
    App::new(test_config(gateway)).expect("Failed to build test app")
}

/// Callback fragment as the provider would send it.
#[allow(dead_code)]
pub fn callback_fragment(state: Option<&str>) -> String {
    let mut fragment = format!(
        "access_token={}&id_token={}&token_type=Bearer&expires_in=7200",
        TEST_ACCESS_TOKEN, TEST_ID_TOKEN
    );
    if let Some(state) = state {
        fragment.push_str("&state=");
        fragment.push_str(state);
    }
    fragment
}

/// Extract a query parameter from a URL.
#[allow(dead_code)]
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| urlencoding::decode(value).unwrap().into_owned())
    })
}

async fn record(State(state): State<Arc<GatewayState>>, req: Request, next: Next) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        authorization: req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if state.fail.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    next.run(req).await
}

fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", TEST_ID_TOKEN);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn check_auth(headers: HeaderMap) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;
    Ok(StatusCode::OK)
}

async fn user(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    Ok(Json(json!({
        "name": TEST_USER,
        "nickname": "ali",
        "picture": "https://example.com/alice.png",
        "updated_at": "2026-10-01T12:00:00.000Z",
    })))
}

async fn logout(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;
    state.logged_out.store(true, Ordering::SeqCst);
    Ok(StatusCode::OK)
}

async fn list_todos(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Value>>, StatusCode> {
    authorize(&headers)?;
    Ok(Json(state.todos()))
}

#[derive(Deserialize)]
struct CreateTodo {
    title: String,
    #[serde(default)]
    description: String,
}

async fn create_todo(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Json(body): Json<CreateTodo>,
) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;
    if body.title.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    state.todos.lock().unwrap().push(json!({
        "id": id.to_string(),
        "user": TEST_USER,
        "title": body.title,
        "description": body.description,
        "complete": false,
    }));
    Ok(StatusCode::CREATED)
}

async fn complete_todo(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;
    let mut todos = state.todos.lock().unwrap();
    let todo = todos
        .iter_mut()
        .find(|t| t["id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    todo["complete"] = Value::Bool(true);
    Ok(StatusCode::OK)
}

async fn delete_todo(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;
    let mut todos = state.todos.lock().unwrap();
    let before = todos.len();
    todos.retain(|t| t["id"] != id.as_str());
    if todos.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}
