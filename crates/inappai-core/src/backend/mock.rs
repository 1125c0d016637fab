//! Mock backend for tests and demos
//!
//! Deterministic, scripted responses without network dependencies.
//! Records every request so tests can assert on what was sent.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{BackendError, BackendResult};
use super::traits::ChatBackend;
use super::types::{ChatRequest, ChatResponse};

/// Scripted [`ChatBackend`] implementation
///
/// Responses are consumed front-to-back from a queue; once the queue is
/// empty the backend echoes the request's message, so simple demos work
/// without scripting at all.
pub struct MockBackend {
    responses: Mutex<VecDeque<BackendResult<ChatResponse>>>,
    requests: Mutex<Vec<ChatRequest>>,
    delay_ms: u64,
    healthy: AtomicBool,
}

impl MockBackend {
    /// Create a mock backend with an empty script (echo behavior)
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay_ms: 0,
            healthy: AtomicBool::new(true),
        }
    }

    /// Delay every call, to exercise in-flight behavior
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Queue a response
    pub fn push_response(&self, response: ChatResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queue a plain text response
    pub fn push_message(&self, message: impl Into<String>) {
        self.push_response(ChatResponse::text(message));
    }

    /// Queue an error
    pub fn push_error(&self, error: BackendError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Set the health probe outcome
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().clone()
    }

    /// Number of chat requests received
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn chat(&self, request: ChatRequest) -> BackendResult<ChatResponse> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let echo = format!("Echo: {}", request.message);
        self.requests.lock().push(request);

        match self.responses.lock().pop_front() {
            Some(scripted) => scripted,
            None => Ok(ChatResponse::text(echo)),
        }
    }

    async fn health(&self) -> BackendResult<()> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BackendError::api(503, "Backend not responding"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ToolCall;

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            conversation_id: "test".to_string(),
            context: None,
            tools: None,
            disable_cache: false,
        }
    }

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let backend = MockBackend::new();
        backend.push_message("first");
        backend.push_message("second");

        let a = backend.chat(request("1")).await.unwrap();
        let b = backend.chat(request("2")).await.unwrap();
        assert_eq!(a.message.as_deref(), Some("first"));
        assert_eq!(b.message.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_echo_when_script_exhausted() {
        let backend = MockBackend::new();
        let response = backend.chat(request("hello")).await.unwrap();
        assert_eq!(response.message.as_deref(), Some("Echo: hello"));
    }

    #[tokio::test]
    async fn test_records_requests() {
        let backend = MockBackend::new();
        backend.push_response(ChatResponse::with_tool_calls(vec![ToolCall::function(
            "getWeather",
            "{}",
        )]));

        backend.chat(request("what's the weather?")).await.unwrap();

        assert_eq!(backend.request_count(), 1);
        assert_eq!(backend.requests()[0].message, "what's the weather?");
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let backend = MockBackend::new();
        backend.push_error(BackendError::api(500, "boom"));

        assert!(backend.chat(request("hi")).await.is_err());
    }

    #[tokio::test]
    async fn test_health_toggle() {
        let backend = MockBackend::new();
        assert!(backend.health().await.is_ok());

        backend.set_healthy(false);
        assert!(backend.health().await.is_err());
    }
}
