//! Session lifecycle: the stored bearer token, the authentication guard and
//! the observer that reacts to classified responses.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    config,
    navigation::{Navigator, View},
    result::{ApiResponse, ApiResult, Outcome},
    storage::Storage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token stored.
    Anonymous,
    /// A token is stored but no protected call has confirmed it yet.
    Authenticated,
    /// A protected call made with the stored token succeeded.
    Verified,
}

/// Syntactic credential check: exactly three dot-separated segments.
pub fn has_token_shape(token: &str) -> bool {
    token.split('.').count() == 3
}

pub struct Session {
    storage: Arc<dyn Storage>,
    navigator: Arc<dyn Navigator>,
    verified: AtomicBool,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            storage,
            navigator,
            verified: AtomicBool::new(false),
        }
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(config::STORAGE_TOKEN_KEY)
    }

    pub fn email(&self) -> Option<String> {
        self.storage.get(config::STORAGE_EMAIL_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        match self.token() {
            Some(token) if has_token_shape(&token) => true,
            Some(_) => {
                tracing::warn!("stored token has an invalid format");
                false
            }
            None => false,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.token().is_none() {
            SessionState::Anonymous
        } else if self.verified.load(Ordering::Acquire) {
            SessionState::Verified
        } else {
            SessionState::Authenticated
        }
    }

    /// Stores a freshly issued token. Any previous token is replaced.
    pub fn begin(&self, token: &str, email: &str) -> ApiResult<()> {
        self.storage.set(config::STORAGE_TOKEN_KEY, token)?;
        self.storage.set(config::STORAGE_EMAIL_KEY, email)?;
        self.verified.store(false, Ordering::Release);
        Ok(())
    }

    /// Pre-navigation check for protected views. On failure the stale
    /// token is dropped and the login view is shown.
    pub fn guard(&self) -> ApiResult<bool> {
        if self.is_authenticated() {
            return Ok(true);
        }
        self.clear()?;
        self.redirect_to_login();
        Ok(false)
    }

    /// Logs out. Safe to call with no session.
    pub fn end_session(&self) -> ApiResult<()> {
        self.clear()?;
        self.navigator.redirect(View::Login);
        Ok(())
    }

    /// Applies the side effects of a classified response.
    pub fn observe(&self, response: &ApiResponse, sent_token: bool) -> ApiResult<()> {
        match response.outcome {
            Outcome::Unauthorized => {
                tracing::warn!(
                    "{} rejected the session (HTTP {}), signing out",
                    response.path,
                    response.status.as_u16()
                );
                self.clear()?;
                self.redirect_to_login();
            }
            Outcome::Success | Outcome::NoContent if sent_token => {
                self.verified.store(true, Ordering::Release);
            }
            _ => {}
        }
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        self.verified.store(false, Ordering::Release);
        self.storage.remove(config::STORAGE_TOKEN_KEY)?;
        self.storage.remove(config::STORAGE_EMAIL_KEY)?;
        Ok(())
    }

    fn redirect_to_login(&self) {
        if self.navigator.current() != View::Login {
            self.navigator.redirect(View::Login);
        }
    }
}
