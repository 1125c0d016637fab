//! HTTP backend speaking the hosted agent chat contract

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use crate::logging::{Logger, NoOpLogger};

use super::error::{BackendError, BackendResult};
use super::traits::ChatBackend;
use super::types::{ChatRequest, ChatResponse};

/// Bearer token supplier for the `Authorization` header
///
/// Host applications hand over either a fixed token or a zero-argument
/// supplier (for rotating JWTs). The supplier is consulted fresh on
/// every request; `None` or an empty token suppresses the header.
#[derive(Clone, Default)]
pub enum AuthToken {
    /// No authentication
    #[default]
    None,
    /// A fixed token
    Static(String),
    /// A supplier consulted per request
    Provider(Arc<dyn Fn() -> Option<String> + Send + Sync>),
}

impl AuthToken {
    /// Create a static token
    pub fn new(token: impl Into<String>) -> Self {
        AuthToken::Static(token.into())
    }

    /// Create a per-request token supplier
    pub fn provider<F>(supplier: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        AuthToken::Provider(Arc::new(supplier))
    }

    /// Resolve the token to send right now
    pub fn token(&self) -> Option<String> {
        match self {
            AuthToken::None => None,
            AuthToken::Static(token) => Some(token.clone()).filter(|t| !t.is_empty()),
            AuthToken::Provider(supplier) => supplier().filter(|t| !t.is_empty()),
        }
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthToken::None => write!(f, "AuthToken::None"),
            AuthToken::Static(_) => write!(f, "AuthToken::Static(..)"),
            AuthToken::Provider(_) => write!(f, "AuthToken::Provider(..)"),
        }
    }
}

/// HTTP implementation of [`ChatBackend`]
///
/// `POST {endpoint}/{agent_id}/chat` and `GET {endpoint}/{agent_id}/health`,
/// JSON bodies, optional bearer auth. A non-2xx status is a hard
/// failure for that request.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
    agent_id: String,
    auth: AuthToken,
    logger: Arc<dyn Logger>,
}

impl HttpBackend {
    /// Create a backend for one agent
    pub fn new(endpoint: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            agent_id: agent_id.into(),
            auth: AuthToken::None,
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Set the auth token
    pub fn with_auth(mut self, auth: AuthToken) -> Self {
        self.auth = auth;
        self
    }

    /// Set the logger
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Use a pre-configured reqwest client (timeouts, proxies, ...)
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.agent_id,
            path
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.auth.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn chat(&self, request: ChatRequest) -> BackendResult<ChatResponse> {
        let url = self.url("chat");
        self.logger
            .debug(&format!("[HttpBackend] POST {} ({} bytes of message)", url, request.message.len()));

        let response = self
            .authorize(self.client.post(&url).json(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                "Failed to get response".to_string()
            } else {
                body
            };
            self.logger
                .error(&format!("[HttpBackend] Chat failed with status {}", status));
            return Err(BackendError::api(status.as_u16(), message));
        }

        Ok(response.json::<ChatResponse>().await?)
    }

    async fn health(&self) -> BackendResult<()> {
        let url = self.url("health");
        let response = self.authorize(self.client.get(&url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::api(status.as_u16(), "Backend not responding"));
        }
        Ok(())
    }
}
