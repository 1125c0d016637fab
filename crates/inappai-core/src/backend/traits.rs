//! Backend trait definition

use async_trait::async_trait;

use super::error::BackendResult;
use super::types::{ChatRequest, ChatResponse};

/// One agent backend the widget can talk to
///
/// Implementations are expected to treat any non-success outcome of a
/// single request as a hard failure for that request; retry policy
/// belongs to the caller.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one chat request and return the parsed response
    async fn chat(&self, request: ChatRequest) -> BackendResult<ChatResponse>;

    /// Probe the backend's health endpoint
    async fn health(&self) -> BackendResult<()>;
}
