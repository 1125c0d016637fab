//! Chat turn orchestration
//!
//! Drives one user-initiated chat turn against the agent backend,
//! including nested tool-execution rounds: send the message, execute
//! whatever tools the response requests, report the results back, and
//! repeat until the backend answers with plain text or the round limit
//! forces one.
//!
//! The conversation store only ever sees the original user message and
//! one final assistant message per turn; tool results travel exclusively
//! in request payloads.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use parking_lot::RwLock;
use serde_json::{json, Value};

use crate::backend::{
    BackendError, ChatBackend, ChatRequest, ChatResponse, ErrorKind, HttpBackend, ToolCall,
};
use crate::logging::{Logger, NoOpLogger};
use crate::tools::ToolSource;
use crate::types::{ContextSource, Message, Tool, ToolDefinition};

use super::config::{ChatConfig, DEFAULT_MAX_TOOL_ROUNDS};
use super::conversation::ConversationHandle;

/// Fallback assistant text when the backend ends a tool turn without prose
const TOOL_COMPLETION_FALLBACK: &str = "I executed the tools successfully.";

/// Prefix marking error-flavored assistant messages
const ERROR_MESSAGE_PREFIX: &str = "⚠️ ";

/// Turn failure surfaced for the dismissible error banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    /// Failure category
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
}

impl ErrorState {
    /// Banner title for this failure
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// The chat turn state machine
///
/// One instance per widget. Holds no conversation history of its own:
/// messages live in the host-owned [`ConversationHandle`], which the
/// orchestrator mutates at exactly two points per turn (the optimistic
/// user append and the final assistant append).
pub struct ChatOrchestrator {
    backend: Arc<dyn ChatBackend>,
    conversation: ConversationHandle,
    tools: Option<Arc<dyn ToolSource>>,
    context: ContextSource,
    conversation_id: String,
    max_tool_rounds: u32,
    /// A turn in flight suppresses re-entrant sends
    in_flight: AtomicBool,
    connected: AtomicBool,
    error: RwLock<Option<ErrorState>>,
    logger: Arc<dyn Logger>,
}

impl ChatOrchestrator {
    /// Create an orchestrator over any backend
    pub fn new(backend: Arc<dyn ChatBackend>, conversation: ConversationHandle) -> Self {
        Self {
            backend,
            conversation,
            tools: None,
            context: ContextSource::None,
            conversation_id: default_conversation_id(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            in_flight: AtomicBool::new(false),
            connected: AtomicBool::new(false),
            error: RwLock::new(None),
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Wire an orchestrator to a hosted agent over HTTP
    pub fn connect(config: ChatConfig, conversation: ConversationHandle) -> Self {
        let backend = HttpBackend::new(config.resolve_endpoint(), config.agent_id.clone())
            .with_auth(config.auth_token.clone());
        let mut orchestrator = Self::new(Arc::new(backend), conversation);
        orchestrator.max_tool_rounds = config.max_tool_rounds;
        if let Some(conversation_id) = config.conversation_id {
            orchestrator.conversation_id = conversation_id;
        }
        orchestrator
    }

    /// Set the tool source consulted at send time
    pub fn with_tools(mut self, tools: Arc<dyn ToolSource>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set the context supplier
    pub fn with_context(mut self, context: ContextSource) -> Self {
        self.context = context;
        self
    }

    /// Override the conversation id
    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = conversation_id.into();
        self
    }

    /// Override the tool-round cap
    pub fn with_max_tool_rounds(mut self, max_tool_rounds: u32) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    /// Set the logger
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Whether a turn is currently in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Whether the last health probe succeeded
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Current error banner state, if any
    pub fn error(&self) -> Option<ErrorState> {
        self.error.read().clone()
    }

    /// Dismiss the error banner
    pub fn clear_error(&self) {
        *self.error.write() = None;
    }

    /// The conversation correlation key sent with every request
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Probe the backend health endpoint and update the connected flag
    pub async fn check_connection(&self) -> bool {
        match self.backend.health().await {
            Ok(()) => {
                self.connected.store(true, Ordering::SeqCst);
                self.clear_error();
                true
            }
            Err(err) => {
                self.connected.store(false, Ordering::SeqCst);
                let message = match err {
                    BackendError::Api { .. } => "Backend not responding",
                    _ => "Failed to connect to backend",
                };
                self.logger
                    .warn(&format!("[ChatOrchestrator] Health check failed: {}", err));
                *self.error.write() = Some(ErrorState {
                    kind: ErrorKind::classify(message),
                    message: message.to_string(),
                });
                false
            }
        }
    }

    /// Execute one chat turn
    ///
    /// Empty input and sends issued while a turn is in flight are
    /// silent no-ops. Failures never propagate: they become an
    /// error-flavored assistant message plus banner state.
    pub async fn send_message(&self, input: &str) {
        let message = input.trim();
        if message.is_empty() {
            return;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.logger
                .debug("[ChatOrchestrator] Send rejected: a turn is already in flight");
            return;
        }

        self.clear_error();
        // optimistic append, before any network call
        self.conversation.push(Message::user(message));

        match self.run_turn(message).await {
            Ok(response) => {
                let content = response
                    .message
                    .clone()
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| TOOL_COMPLETION_FALLBACK.to_string());
                let mut assistant = Message::assistant(content);
                assistant.usage = response.usage;
                self.conversation.push(assistant);
            }
            Err(err) => {
                let message = err.to_string();
                self.logger
                    .error(&format!("[ChatOrchestrator] Turn failed: {}", message));
                self.conversation
                    .push(Message::assistant(format!("{}{}", ERROR_MESSAGE_PREFIX, message)));
                *self.error.write() = Some(ErrorState {
                    kind: err.kind(),
                    message,
                });
            }
        }

        self.in_flight.store(false, Ordering::SeqCst);
    }

    /// The request/response loop of one turn
    async fn run_turn(&self, message: &str) -> Result<ChatResponse, BackendError> {
        // Tool set and schema list are fixed for the turn; handlers
        // never leave the process, the backend sees schemas only.
        let active_tools: Vec<Tool> = self
            .tools
            .as_ref()
            .map(|source| source.tools())
            .unwrap_or_default();
        let definitions: Vec<ToolDefinition> =
            active_tools.iter().map(ToolDefinition::from).collect();

        let mut data = self
            .backend
            .chat(self.build_request(message.to_string(), Some(&definitions)))
            .await?;

        // The backend may answer with tool calls whose results trigger
        // further calls; iterate until a text-only response or the
        // round limit.
        let mut round: u32 = 0;
        while data.has_tool_calls() && round < self.max_tool_rounds {
            round += 1;
            let calls = data.tool_calls.take().unwrap_or_default();
            let results = self.execute_round(&active_tools, &calls).await?;
            let follow_up = compose_tool_results_message(round, &calls, &results);

            // the round that reached the limit must get a text-only
            // reply, so its follow-up request omits the tool schemas
            let last_allowed_round = round >= self.max_tool_rounds;
            let tools = if last_allowed_round {
                None
            } else {
                Some(&definitions)
            };
            data = self.backend.chat(self.build_request(follow_up, tools)).await?;
        }

        Ok(data)
    }

    fn build_request(&self, message: String, tools: Option<&Vec<ToolDefinition>>) -> ChatRequest {
        ChatRequest {
            message,
            conversation_id: self.conversation_id.clone(),
            // dynamic context is re-read for every request, never cached
            context: self.context.snapshot(),
            tools: tools.filter(|defs| !defs.is_empty()).cloned(),
            disable_cache: false,
        }
    }

    /// Execute all of a round's tool calls: fire together, await all
    async fn execute_round(
        &self,
        tools: &[Tool],
        calls: &[ToolCall],
    ) -> Result<Vec<Value>, BackendError> {
        let executions = calls.iter().map(|call| self.execute_call(tools, call));
        join_all(executions).await.into_iter().collect()
    }

    /// Execute one tool call, containing handler and lookup failures
    async fn execute_call(&self, tools: &[Tool], call: &ToolCall) -> Result<Value, BackendError> {
        let name = call.tool_name().unwrap_or("unknown").to_string();
        // malformed arguments fail the turn, not just this tool
        let args = call.arguments()?;

        let Some(tool) = tools.iter().find(|t| t.name == name) else {
            return Ok(json!({
                "success": false,
                "error": format!("Tool '{}' not found", name),
            }));
        };
        let Some(handler) = tool.handler.clone() else {
            return Ok(json!({
                "success": false,
                "error": format!("Tool '{}' has no handler", name),
            }));
        };

        match handler(args).await {
            Ok(result) => Ok(result),
            Err(err) => {
                self.logger
                    .error(&format!("[ChatOrchestrator] Tool {:?} failed: {}", name, err));
                Ok(json!({ "success": false, "error": err }))
            }
        }
    }
}

impl std::fmt::Debug for ChatOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatOrchestrator")
            .field("conversation_id", &self.conversation_id)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .field("is_loading", &self.is_loading())
            .field("is_connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

/// Compose the synthetic follow-up message carrying a round's results
///
/// The completion markers discourage the model from re-executing calls
/// it already made.
fn compose_tool_results_message(round: u32, calls: &[ToolCall], results: &[Value]) -> String {
    let result_lines = calls
        .iter()
        .zip(results)
        .map(|(call, result)| {
            let name = call.tool_name().unwrap_or("unknown");
            format!("Tool \"{}\" result: {}", name, result)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "[TOOL EXECUTION COMPLETE - Round {round}]\n\
         The following {count} tool call(s) have been executed successfully. Do NOT re-execute them.\n\
         {result_lines}\n\
         If all requested actions are complete, respond to the user with a summary. \
         Only make additional tool calls if new/different actions are needed.",
        count = results.len(),
    )
}

/// Process-lifetime-unique conversation id for hosts that don't supply one
fn default_conversation_id() -> String {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    format!(
        "session-{}-{}",
        crate::types::now_millis(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conversation_ids_are_unique() {
        assert_ne!(default_conversation_id(), default_conversation_id());
    }

    #[test]
    fn test_compose_tool_results_message() {
        let calls = vec![
            ToolCall::function("addTodo", r#"{"task": "milk"}"#),
            ToolCall::named("getWeather", json!({})),
        ];
        let results = vec![
            json!({ "success": true }),
            json!({ "success": false, "error": "offline" }),
        ];

        let message = compose_tool_results_message(2, &calls, &results);
        assert!(message.starts_with("[TOOL EXECUTION COMPLETE - Round 2]"));
        assert!(message.contains("The following 2 tool call(s)"));
        assert!(message.contains("Tool \"addTodo\" result: {\"success\":true}"));
        assert!(message.contains("Tool \"getWeather\" result:"));
        assert!(message.contains("Do NOT re-execute them."));
    }
}
