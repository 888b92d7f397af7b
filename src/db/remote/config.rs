use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::db::error::{invalid_argument, EcomResult};

/// Environment variable consulted by [`ClientOptions::from_env`].
pub const ENDPOINT_ENV_VAR: &str = "ECOM_ENDPOINT";

/// Endpoint used when nothing else is configured (local API server).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Connection settings for the HTTP transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    pub endpoint: String,
    #[serde(default)]
    pub request_timeout: Option<Duration>,
}

impl ClientOptions {
    /// Validates and constructs options for the API at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> EcomResult<Self> {
        let options = Self {
            endpoint: endpoint.into(),
            request_timeout: None,
        };
        options.validate()?;
        Ok(options)
    }

    /// Reads the endpoint from `ECOM_ENDPOINT`, falling back to
    /// [`DEFAULT_ENDPOINT`].
    pub fn from_env() -> EcomResult<Self> {
        let endpoint = std::env::var(ENDPOINT_ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Ensures the endpoint is an absolute `http` or `https` URL.
    pub fn validate(&self) -> EcomResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(invalid_argument("endpoint is required"));
        }
        let url = Url::parse(&self.endpoint)
            .map_err(|err| invalid_argument(format!("invalid endpoint `{}`: {err}", self.endpoint)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid_argument(format!(
                "Unsupported protocol '{other}' in endpoint"
            ))),
        }
    }

    /// Endpoint without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_endpoints() {
        let options = ClientOptions::new("https://api.example.com/v1/").unwrap();
        assert_eq!(options.base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn rejects_invalid_endpoints() {
        assert_eq!(
            ClientOptions::new("").unwrap_err().code_str(),
            "ecom/invalid-argument"
        );
        assert!(ClientOptions::new("not a url").is_err());
        assert!(ClientOptions::new("ftp://example.com").is_err());
    }

    #[test]
    fn timeout_builder() {
        let options = ClientOptions::new(DEFAULT_ENDPOINT)
            .unwrap()
            .with_request_timeout(Duration::from_secs(5));
        assert_eq!(options.request_timeout, Some(Duration::from_secs(5)));
    }
}
