use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value as JsonValue;

use crate::db::error::{internal_error, EcomError, EcomResult};
use crate::db::remote::{Transport, TransportResponse};

/// A request observed by [`ScriptedTransport`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<JsonValue>,
}

/// In-memory transport that replays queued responses in order and records
/// every request it receives.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<EcomResult<TransportResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: TransportResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn respond_json(&self, status: u16, body: JsonValue) {
        self.respond(TransportResponse::json_body(status, &body));
    }

    /// Queues a failure of the HTTP layer itself.
    pub fn fail(&self, error: EcomError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for ScriptedTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> EcomResult<TransportResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            path: path.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(internal_error(format!("no scripted response for {method} {path}"))))
    }
}
