#![allow(dead_code)]

use std::{
    net::{SocketAddr, TcpListener},
    path::Path,
    sync::Arc,
};

use axum::{
    body::StreamBody,
    extract::Extension,
    headers::{authorization::Bearer, Authorization},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router, TypedHeader,
};
use parking_lot::Mutex;
use rand::Rng;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use coowner_client::{
    config,
    storage::{MemoryStorage, Storage},
    ApiClient, Config, ForbiddenPolicy, History, Session, View,
};

/// In-process backend standing in for the co-ownership service.
pub struct Stub {
    pub addr: SocketAddr,
    pub state: Arc<StubState>,
}

#[derive(Default)]
pub struct StubState {
    /// Issued token and the email it was issued to.
    issued: Mutex<Vec<(String, String)>>,
    hits: Mutex<Vec<String>>,
}

impl StubState {
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().clone()
    }

    fn hit(&self, path: &str) {
        self.hits.lock().push(path.to_string());
    }

    fn email_for(&self, bearer: Option<TypedHeader<Authorization<Bearer>>>) -> Option<String> {
        let TypedHeader(Authorization(bearer)) = bearer?;
        self.issued
            .lock()
            .iter()
            .find(|(token, _)| token == bearer.token())
            .map(|(_, email)| email.clone())
    }
}

pub async fn spawn() -> Stub {
    let state = Arc::new(StubState::default());
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/users/register", post(register))
        .route("/api/echo", get(echo))
        .route("/api/expired", get(expired))
        .route("/api/no-content", get(no_content))
        .route("/api/no-content-json", get(no_content_json))
        .route("/api/blank-json", get(blank_json))
        .route("/api/malformed-json", get(malformed_json))
        .route("/api/forbidden-html", get(forbidden_html))
        .route("/api/forbidden-json", get(forbidden_json))
        .route("/api/forbidden-blank-json", get(forbidden_blank_json))
        .route("/api/groups", get(groups))
        .route("/api/bookings", get(bookings))
        .route("/api/expenses/my-shares", get(shares))
        .route("/api/payments/my-payments", get(empty_list))
        .route("/api/usage-history/my-history", get(hang_up))
        .route("/api/admin/users", get(admin_users))
        .route("/api/admin/groups", get(groups))
        .route("/api/admin/vehicles", get(forbidden_json))
        .route("/api/admin/bookings", get(empty_list))
        .route("/api/admin/expenses", get(empty_list))
        .layer(Extension(state.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    Stub { addr, state }
}

/// Serves `reply` verbatim to every connection, then closes it.
pub async fn spawn_raw(reply: &'static str) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            // Drain the request head so closing does not reset the socket.
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket.write_all(reply.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    addr
}

/// Address nothing listens on.
pub fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn mint_token() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}.{}.{}",
        hex::encode(rng.gen::<[u8; 8]>()),
        hex::encode(rng.gen::<[u8; 16]>()),
        hex::encode(rng.gen::<[u8; 24]>())
    )
}

impl Stub {
    pub fn config(&self, state_dir: &Path) -> Config {
        Config::new(format!("http://{}", self.addr), state_dir)
    }

    /// Client over in-memory storage, optionally holding `token`.
    pub fn client(&self, token: Option<&str>, at: View) -> (ApiClient, Arc<History>) {
        self.client_with_policy(token, at, ForbiddenPolicy::Strict)
    }

    pub fn client_with_policy(
        &self,
        token: Option<&str>,
        at: View,
        policy: ForbiddenPolicy,
    ) -> (ApiClient, Arc<History>) {
        let storage: Arc<dyn Storage> = match token {
            Some(token) => Arc::new(MemoryStorage::with_entry(config::STORAGE_TOKEN_KEY, token)),
            None => Arc::new(MemoryStorage::new()),
        };
        let mut config = self.config(Path::new("unused"));
        config.forbidden_policy = policy;
        client_for(&config, storage, at)
    }

    /// Issues a token the stub will accept, as if `email` had signed in.
    pub fn issue(&self, email: &str) -> String {
        let token = mint_token();
        self.state
            .issued
            .lock()
            .push((token.clone(), email.to_string()));
        token
    }
}

pub fn client_for(config: &Config, storage: Arc<dyn Storage>, at: View) -> (ApiClient, Arc<History>) {
    let history = Arc::new(History::starting_at(at));
    let session = Arc::new(Session::new(storage, history.clone()));
    (ApiClient::new(config, session).unwrap(), history)
}

fn user_json(email: &str) -> Value {
    let roles = if email.starts_with("admin") {
        vec![config::ROLE_ADMIN]
    } else {
        vec!["USER"]
    };
    json!({"id": 1, "email": email, "fullName": "Nguyen Van A", "roles": roles})
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "expired"})))
}

async fn login(
    Extension(state): Extension<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hit("/auth/login");
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password"})),
        );
    }

    let token = mint_token();
    state.issued.lock().push((token.clone(), email.clone()));
    (
        StatusCode::OK,
        Json(json!({"token": token, "user": user_json(&email)})),
    )
}

async fn me(
    Extension(state): Extension<Arc<StubState>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> (StatusCode, Json<Value>) {
    state.hit("/auth/me");
    match state.email_for(bearer) {
        Some(email) => (StatusCode::OK, Json(user_json(&email))),
        None => unauthorized(),
    }
}

async fn register(
    Extension(state): Extension<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hit("/users/register");
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Validation failed", "details": {"email": "Email already in use"}})),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({"id": 7, "email": body["email"], "fullName": body["fullName"], "roles": ["USER"]})),
    )
}

async fn echo(headers: HeaderMap) -> Json<Value> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    Json(json!({ "authorization": authorization }))
}

async fn expired() -> (StatusCode, Json<Value>) {
    unauthorized()
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn no_content_json() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::CONTENT_TYPE, "application/json")],
    )
}

async fn malformed_json() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        "{\"broken\"",
    )
}

async fn forbidden_blank_json() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        [(header::CONTENT_TYPE, "application/json")],
        "",
    )
}

/// Starts a JSON array and fails the body stream, dropping the connection.
async fn hang_up() -> impl IntoResponse {
    let chunks: Vec<Result<&'static str, std::io::Error>> = vec![
        Ok("[{\"id\": 1"),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "hang up")),
    ];
    (
        [(header::CONTENT_TYPE, "application/json")],
        StreamBody::new(futures_util::stream::iter(chunks)),
    )
}

async fn blank_json() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        "",
    )
}

async fn forbidden_html() -> impl IntoResponse {
    (StatusCode::FORBIDDEN, Html("<h1>Forbidden</h1>"))
}

async fn forbidden_json() -> (StatusCode, Json<Value>) {
    (StatusCode::FORBIDDEN, Json(json!({"message": "nope"})))
}

async fn groups(
    Extension(state): Extension<Arc<StubState>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> (StatusCode, Json<Value>) {
    state.hit("/groups");
    if state.email_for(bearer).is_none() {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!([{"id": 1, "name": "Family car", "ownershipShares": []}])),
    )
}

async fn bookings() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "database down"})),
    )
}

async fn shares() -> Json<Value> {
    Json(json!([
        {"id": 3, "amount": 500000, "paidAmount": 200000, "status": "PENDING"}
    ]))
}

async fn admin_users() -> Json<Value> {
    Json(json!([user_json("admin@example.com"), user_json("a@example.com")]))
}

async fn empty_list() -> Json<Value> {
    Json(json!([]))
}
