use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value as JsonValue;

use crate::db::error::{internal_error, transport_error, EcomResult};
use crate::platform::token::TokenProviderArc;

use super::config::ClientOptions;
use super::transport::{Transport, TransportResponse};

/// [`Transport`] backed by `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    options: ClientOptions,
    token_provider: Option<TokenProviderArc>,
}

#[derive(Clone)]
pub struct HttpTransportBuilder {
    options: ClientOptions,
    client: Option<Client>,
    token_provider: Option<TokenProviderArc>,
}

impl HttpTransportBuilder {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            options,
            client: None,
            token_provider: None,
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_token_provider(mut self, provider: TokenProviderArc) -> Self {
        self.token_provider = Some(provider);
        self
    }

    pub fn build(self) -> EcomResult<HttpTransport> {
        self.options.validate()?;
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .build()
                .map_err(|err| internal_error(err.to_string()))?,
        };
        Ok(HttpTransport {
            client,
            options: self.options,
            token_provider: self.token_provider,
        })
    }
}

impl HttpTransport {
    pub fn builder(options: ClientOptions) -> HttpTransportBuilder {
        HttpTransportBuilder::new(options)
    }

    pub fn new(options: ClientOptions) -> EcomResult<Self> {
        Self::builder(options).build()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.options.base_url(),
            path.trim_start_matches('/')
        )
    }

    async fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> EcomResult<RequestBuilder> {
        let is_post = method == Method::POST;
        let mut builder = self
            .client
            .request(method, self.url_for(path))
            .header(ACCEPT, "application/json");

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(timeout) = self.options.request_timeout {
                builder = builder.timeout(timeout);
            }
        }

        if let Some(provider) = &self.token_provider {
            let token = provider
                .get_token(false)
                .await
                .map_err(|err| transport_error(format!("failed to obtain auth token: {err}")))?;
            if let Some(token) = token.filter(|token| !token.is_empty()) {
                builder = builder.bearer_auth(token);
            }
        }

        builder = match body {
            Some(body) => builder.header(CONTENT_TYPE, "application/json").json(body),
            None if is_post => builder.header(CONTENT_LENGTH, "0"),
            None => builder,
        };
        Ok(builder)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> EcomResult<TransportResponse> {
        let label = format!("{method} {path}");
        let request = self.build_request(method, path, body.as_ref()).await?;
        let response = request
            .send()
            .await
            .map_err(|err| transport_error(err.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| transport_error(err.to_string()))?;
        log::debug!("{label} -> {status}");
        Ok(TransportResponse::new(status, text))
    }
}
