//! The authenticated request chokepoint. Every API call goes through
//! [`ApiClient::request`], which attaches the bearer token, classifies the
//! response and hands it to the session observer.

use std::sync::Arc;

use headers::{Authorization, HeaderMapExt};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    auth::Session,
    config::{self, Config, ForbiddenPolicy},
    error::ClientError,
    extract,
    navigation::Navigator,
    result::{ApiResponse, ApiResult, Outcome},
    storage::FileStorage,
};

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn put() -> Self {
        Self::with_method(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    session: Arc<Session>,
    forbidden_policy: ForbiddenPolicy,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<Session>) -> ApiResult<Self> {
        let base = config.api_base();
        reqwest::Url::parse(&base).map_err(|err| ClientError::InvalidUrl(format!("{base}: {err}")))?;

        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base,
            session,
            forbidden_policy: config.forbidden_policy,
        })
    }

    /// Client over the file-backed session store named by `config`.
    pub fn open(config: &Config, navigator: Arc<dyn Navigator>) -> ApiResult<Self> {
        let storage = FileStorage::open(config.session_file())?;
        let session = Arc::new(Session::new(Arc::new(storage), navigator));
        Self::new(config, session)
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub async fn get(&self, path: &str) -> ApiResult<ApiResponse> {
        self.request(path, RequestOptions::get()).await
    }

    pub async fn request(&self, path: &str, options: RequestOptions) -> ApiResult<ApiResponse> {
        let token = self.session.token();
        if token.is_none() {
            tracing::warn!("API call to {} without token, request may fail with 401", path);
        }

        let headers = merge_headers(token.as_deref(), &options.headers)?;
        let url = if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        };

        tracing::debug!("{} {}", options.method, url);
        let mut builder = self.http.request(options.method, &url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(|err| {
            tracing::error!("API call error for {}: {}", path, err);
            ClientError::Transport(err)
        })?;

        let api_response = self.classify(path, response).await?;
        self.session.observe(&api_response, token.is_some())?;
        Ok(api_response)
    }

    async fn classify(&self, path: &str, response: reqwest::Response) -> ApiResult<ApiResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        if !status.is_success() {
            tracing::warn!("API call failed: {} for {}", status, path);
        }

        let (payload, outcome) = match status {
            StatusCode::UNAUTHORIZED => {
                let body = read_json_or_none(path, &headers, response).await;
                let payload = body.unwrap_or_else(|| {
                    json!({"message": config::SESSION_EXPIRED_MESSAGE, "code": "UNAUTHORIZED"})
                });
                (Some(payload), Outcome::Unauthorized)
            }
            StatusCode::FORBIDDEN => {
                tracing::error!("403 Forbidden for {}", path);
                let json_body = extract::is_json(&headers);
                match read_json_or_none(path, &headers, response).await {
                    Some(body) => (Some(body), Outcome::Forbidden),
                    None if !json_body
                        && self.forbidden_policy == ForbiddenPolicy::Legacy
                        && self.session.token().is_none() =>
                    (
                        Some(json!({"message": config::AUTH_REQUIRED_MESSAGE, "code": "UNAUTHORIZED"})),
                        Outcome::Unauthorized,
                    ),
                    None => (
                        Some(json!({"message": config::FORBIDDEN_MESSAGE})),
                        Outcome::Forbidden,
                    ),
                }
            }
            StatusCode::NO_CONTENT => (None, Outcome::NoContent),
            status => {
                let body = read_json(path, &headers, response).await?;
                let outcome = if status.is_success() {
                    Outcome::Success
                } else {
                    Outcome::Failed
                };
                (body, outcome)
            }
        };

        Ok(ApiResponse {
            path: path.to_string(),
            status,
            headers,
            payload,
            outcome,
        })
    }
}

async fn read_json(
    path: &str,
    headers: &HeaderMap,
    response: reqwest::Response,
) -> ApiResult<Option<Value>> {
    if !extract::is_json(headers) {
        return Ok(None);
    }
    let text = response.text().await?;
    Ok(extract::parse_body(path, &text))
}

/// Body of a 401/403. A body that cannot be read counts as no body so the
/// session observer still runs.
async fn read_json_or_none(
    path: &str,
    headers: &HeaderMap,
    response: reqwest::Response,
) -> Option<Value> {
    read_json(path, headers, response)
        .await
        .unwrap_or_else(|err| swallow!(format!("unreadable body from {path}"), err))
}

/// Default JSON content type, then caller headers, then the bearer token.
/// A stored token always wins over a caller-supplied `Authorization`.
pub fn merge_headers(token: Option<&str>, caller: &HeaderMap) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for name in caller.keys() {
        headers.remove(name);
        for value in caller.get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }

    if let Some(token) = token {
        let bearer = Authorization::bearer(token)
            .map_err(|_| ClientError::InvalidHeader("stored token is not a valid bearer credential".to_string()))?;
        if headers.contains_key(AUTHORIZATION) {
            tracing::warn!("replacing caller-supplied Authorization header with the session token");
        }
        headers.typed_insert(bearer);
    }

    Ok(headers)
}
