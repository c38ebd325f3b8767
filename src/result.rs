use reqwest::{header::HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{error::ClientError, extract};

pub type ApiResult<T> = Result<T, ClientError>;

/// What happened to a request, as seen by the session observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx other than 204.
    Success,
    /// 204.
    NoContent,
    /// 401, or a token-less 403 under the legacy policy. The session is gone.
    Unauthorized,
    /// 403 with the session left intact.
    Forbidden,
    /// Any other non-2xx status.
    Failed,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub path: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub payload: Option<Value>,
    pub outcome: Outcome,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Best human-readable message for a failed response.
    pub fn error_message(&self) -> String {
        let fallback = self
            .status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", self.status.as_u16()));
        extract::error_message(self.payload(), &fallback)
    }

    fn ensure_ok(&self) -> ApiResult<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ClientError::api(self.status, self.error_message()))
        }
    }

    /// Accepts any 2xx, with or without a body.
    pub fn into_unit(self) -> ApiResult<()> {
        self.ensure_ok()
    }

    /// Deserializes the payload of a 2xx response.
    pub fn into_json<T: DeserializeOwned>(self) -> ApiResult<T> {
        self.ensure_ok()?;
        match self.payload {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(ClientError::EmptyBody(self.path)),
        }
    }

    /// Deserializes a collection. A 2xx payload that is not an array is an
    /// empty collection.
    pub fn into_list<T: DeserializeOwned>(self) -> ApiResult<Vec<T>> {
        self.ensure_ok()?;
        match self.payload {
            Some(value @ Value::Array(_)) => Ok(serde_json::from_value(value)?),
            _ => Ok(Vec::new()),
        }
    }
}
