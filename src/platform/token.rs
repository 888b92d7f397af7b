use std::error::Error;
use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

/// Error type returned by async token providers when token acquisition fails.
#[derive(Debug, Clone)]
pub struct TokenError {
    message: String,
}

impl TokenError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn from_error(err: impl Error) -> Self {
        Self::new(err.to_string())
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for TokenError {}

/// Supplies the bearer token attached to every API request.
///
/// `Ok(None)` means the caller is anonymous and no `Authorization` header is
/// sent.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AsyncTokenProvider: Send + Sync {
    async fn get_token(&self, force_refresh: bool) -> Result<Option<String>, TokenError>;
}

pub type TokenProviderArc = Arc<dyn AsyncTokenProvider>;

/// Holds a token set by the application after sign-in.
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    token: RwLock<Option<String>>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    /// Replaces the stored token; `None` clears it.
    pub fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AsyncTokenProvider for StaticTokenProvider {
    async fn get_token(&self, _force_refresh: bool) -> Result<Option<String>, TokenError> {
        self.token
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| TokenError::new("token store poisoned"))
    }
}
