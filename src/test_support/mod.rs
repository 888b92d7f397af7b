//! Test utilities shared across crate-level unit tests.

pub mod catalog;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;
pub mod scripted;

#[cfg(not(target_arch = "wasm32"))]
pub use http::start_mock_server;
pub use scripted::{RecordedRequest, ScriptedTransport};
