//! Agent backend interface and implementations
//!
//! The orchestrator talks to the backend through the [`ChatBackend`]
//! seam. [`HttpBackend`] speaks the hosted agent's `/chat` + `/health`
//! contract; [`MockBackend`] scripts responses for tests and demos.

mod error;
mod http;
mod mock;
mod traits;
mod types;

pub use error::{BackendError, BackendResult, ErrorKind};
pub use http::{AuthToken, HttpBackend};
pub use mock::MockBackend;
pub use traits::ChatBackend;
pub use types::{ChatRequest, ChatResponse, FunctionCall, ToolCall};
