//! Minimal setup against a live agent backend
//!
//! The smallest embedding: a conversation handle, a config, and a send.
//! Point it at a running backend:
//!
//! ```sh
//! INAPPAI_ENDPOINT=http://localhost:3001/api cargo run --example basic_chat -- your-agent-id "hello"
//! ```

use inappai_core::{ChatConfig, ChatOrchestrator, ConversationHandle};

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1);
    let agent_id = args.next().unwrap_or_else(|| "your-agent-id".to_string());
    let message = args.next().unwrap_or_else(|| "Hello!".to_string());

    let conversation = ConversationHandle::new();
    let chat = ChatOrchestrator::connect(ChatConfig::new(agent_id), conversation.clone());

    if !chat.check_connection().await {
        if let Some(error) = chat.error() {
            eprintln!("{}: {}", error.title(), error.message);
        }
        return;
    }

    chat.send_message(&message).await;

    for msg in conversation.snapshot() {
        println!("[{}] {}", msg.role, msg.content);
    }
    if let Some(error) = chat.error() {
        eprintln!("{}: {}", error.title(), error.message);
    }
}
