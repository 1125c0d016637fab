//! Todo list with AI tools
//!
//! Complete example showing how to use tools (function calling) to let
//! the agent interact with application state through natural language.
//! Runs against a scripted `MockBackend`, so no server is needed.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;

use inappai_core::{
    ChatOrchestrator, ChatResponse, ConsoleLogger, ContextSource, ConversationHandle, MockBackend,
    Tool, ToolCall, ToolRegistry,
};

#[derive(Debug, Clone)]
struct Todo {
    id: String,
    text: String,
    completed: bool,
    priority: String,
}

#[tokio::main]
async fn main() {
    let todos: Arc<Mutex<Vec<Todo>>> = Arc::new(Mutex::new(vec![
        Todo {
            id: "1".to_string(),
            text: "Buy groceries".to_string(),
            completed: false,
            priority: "high".to_string(),
        },
        Todo {
            id: "2".to_string(),
            text: "Call dentist".to_string(),
            completed: false,
            priority: "medium".to_string(),
        },
    ]));

    let registry = Arc::new(ToolRegistry::with_logger(Arc::new(ConsoleLogger::new())));

    let add_list = todos.clone();
    let complete_list = todos.clone();
    registry
        .register(
            "todos",
            vec![
                Tool::new(
                    "addTodo",
                    "Create a new todo item when the user wants to add a task to their list.",
                )
                .with_parameters(json!({
                    "type": "object",
                    "properties": {
                        "text": { "type": "string", "description": "The task description" },
                        "priority": {
                            "type": "string",
                            "enum": ["low", "medium", "high"],
                            "description": "Task priority level"
                        }
                    },
                    "required": ["text"]
                }))
                .with_handler(move |args| {
                    let todos = add_list.clone();
                    async move {
                        let text = args["text"].as_str().unwrap_or_default().to_string();
                        let priority = args["priority"].as_str().unwrap_or("medium").to_string();
                        let mut todos = todos.lock();
                        let todo = Todo {
                            id: (todos.len() + 1).to_string(),
                            text,
                            completed: false,
                            priority,
                        };
                        todos.push(todo.clone());
                        Ok(json!({
                            "success": true,
                            "todo": { "id": todo.id, "text": todo.text, "priority": todo.priority }
                        }))
                    }
                }),
                Tool::new(
                    "completeTodo",
                    "Mark a todo as completed. Use keywords from the task text to identify it.",
                )
                .with_parameters(json!({
                    "type": "object",
                    "properties": {
                        "identifier": {
                            "type": "string",
                            "description": "Task ID or keyword from the task text"
                        }
                    },
                    "required": ["identifier"]
                }))
                .with_handler(move |args| {
                    let todos = complete_list.clone();
                    async move {
                        let identifier = args["identifier"].as_str().unwrap_or_default().to_lowercase();
                        let mut todos = todos.lock();
                        match todos
                            .iter_mut()
                            .find(|t| t.id == identifier || t.text.to_lowercase().contains(&identifier))
                        {
                            Some(todo) => {
                                todo.completed = true;
                                Ok(json!({ "success": true, "message": format!("Completed: {}", todo.text) }))
                            }
                            None => Ok(json!({ "success": false, "message": "Todo not found" })),
                        }
                    }
                }),
            ],
        )
        .expect("valid namespace");

    // Scripted backend: first asks for a tool call, then summarizes
    let backend = Arc::new(MockBackend::new());
    backend.push_response(ChatResponse::with_tool_calls(vec![ToolCall::function(
        "addTodo",
        r#"{"text": "Prepare presentation", "priority": "high"}"#,
    )]));
    backend.push_message("Done! I added \"Prepare presentation\" with high priority.");

    let conversation = ConversationHandle::new();
    conversation.on_change(|messages| {
        if let Some(last) = messages.last() {
            println!("[{}] {}", last.role, last.content);
        }
    });

    let context_list = todos.clone();
    let chat = ChatOrchestrator::new(backend, conversation.clone())
        .with_tools(registry)
        .with_context(ContextSource::dynamic(move || {
            let todos = context_list.lock();
            json!({
                "stats": {
                    "total": todos.len(),
                    "active": todos.iter().filter(|t| !t.completed).count(),
                    "completed": todos.iter().filter(|t| t.completed).count(),
                }
            })
        }))
        .with_logger(Arc::new(ConsoleLogger::new()));

    chat.send_message("Add a task to prepare presentation").await;

    println!("\nTasks:");
    for todo in todos.lock().iter() {
        let mark = if todo.completed { "x" } else { " " };
        println!("  [{}] [{}] {}", mark, todo.priority, todo.text);
    }
}
