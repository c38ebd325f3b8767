use std::path::PathBuf;

pub const BASE_URL: &str = "http://localhost:8080";
pub const API_ROUTE: &str = "/api";

pub const STORAGE_TOKEN_KEY: &str = "jwt_token";
pub const STORAGE_EMAIL_KEY: &str = "user_email";
pub const SESSION_FILE: &str = "session.json";

pub const ROLE_ADMIN: &str = "ADMIN";

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please sign in again.";
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required. Please login first.";
pub const FORBIDDEN_MESSAGE: &str =
    "Forbidden - You do not have permission to access this resource";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

pub const DASHBOARD_RECENT_BOOKINGS: usize = 5;
pub const DASHBOARD_RECENT_USAGE: usize = 10;

/// How a 403 carrying no JSON body is treated when no token is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForbiddenPolicy {
    /// Report it as a plain permission failure.
    #[default]
    Strict,
    /// Treat it as a missing login: clear the session and send the user to
    /// the login view.
    Legacy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub state_dir: PathBuf,
    pub forbidden_policy: ForbiddenPolicy,
}

impl Config {
    pub fn new(base_url: impl Into<String>, state_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            state_dir: state_dir.into(),
            forbidden_policy: ForbiddenPolicy::default(),
        }
    }

    /// Reads `COOWNER_API_URL`, `COOWNER_STATE_DIR` and
    /// `COOWNER_LEGACY_FORBIDDEN`. Call `dotenv().ok()` first to pick up a
    /// `.env` file.
    pub fn from_env() -> Self {
        let base_url = std::env::var("COOWNER_API_URL").unwrap_or_else(|_| BASE_URL.to_string());
        let state_dir = std::env::var("COOWNER_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_state_dir());
        let forbidden_policy = match std::env::var("COOWNER_LEGACY_FORBIDDEN") {
            Ok(value) if parse_flag(&value) => ForbiddenPolicy::Legacy,
            _ => ForbiddenPolicy::Strict,
        };

        Self {
            base_url,
            state_dir,
            forbidden_policy,
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join(SESSION_FILE)
    }

    /// Origin plus API route, without a trailing slash.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), API_ROUTE)
    }
}

fn default_state_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".coowner")
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
