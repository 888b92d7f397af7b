use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value as JsonValue;

use crate::db::error::{internal_error, EcomResult};

/// Raw response handed back by a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    status: u16,
    body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Builds a response whose body is the serialized JSON value.
    pub fn json_body(status: u16, body: &JsonValue) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn empty(status: u16) -> Self {
        Self::new(status, String::new())
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON. An empty body decodes to `None`.
    pub fn json(&self) -> EcomResult<Option<JsonValue>> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body)
            .map(Some)
            .map_err(|err| internal_error(format!("Response body is not valid JSON: {err}")))
    }
}

/// The HTTP capability consumed by references and the catalog.
///
/// `path` is relative to the API endpoint and may carry a query string.
/// Implementations report 4xx/5xx statuses as ordinary responses; only
/// failures of the HTTP layer itself are returned as errors.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync + 'static {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> EcomResult<TransportResponse>;

    async fn get(&self, path: &str) -> EcomResult<TransportResponse> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Option<JsonValue>) -> EcomResult<TransportResponse> {
        self.request(Method::POST, path, body).await
    }

    async fn put(&self, path: &str, body: Option<JsonValue>) -> EcomResult<TransportResponse> {
        self.request(Method::PUT, path, body).await
    }

    async fn patch(&self, path: &str, body: Option<JsonValue>) -> EcomResult<TransportResponse> {
        self.request(Method::PATCH, path, body).await
    }

    async fn delete(&self, path: &str) -> EcomResult<TransportResponse> {
        self.request(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_decoding() {
        let response = TransportResponse::json_body(200, &json!({ "id": "p1" }));
        assert!(response.is_success());
        assert_eq!(response.json().unwrap(), Some(json!({ "id": "p1" })));

        let empty = TransportResponse::empty(204);
        assert_eq!(empty.json().unwrap(), None);

        let garbage = TransportResponse::new(200, "<html>");
        assert_eq!(garbage.json().unwrap_err().code_str(), "ecom/internal");
    }

    #[test]
    fn status_classes() {
        assert!(TransportResponse::empty(404).is_error());
        assert!(!TransportResponse::empty(304).is_success());
        assert!(!TransportResponse::empty(304).is_error());
    }
}
