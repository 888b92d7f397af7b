pub mod config;
pub mod http;
pub mod transport;

pub use config::{ClientOptions, DEFAULT_ENDPOINT, ENDPOINT_ENV_VAR};
pub use http::{HttpTransport, HttpTransportBuilder};
pub use transport::{Transport, TransportResponse};

pub type TransportArc = std::sync::Arc<dyn Transport>;
