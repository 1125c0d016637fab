//! Controlled conversation store
//!
//! The host application owns the message list (controlled mode); the
//! widget reads and appends through a shared handle. Appends update the
//! shared cell synchronously before the change listener runs, so no
//! asynchronous step in a turn ever acts on a stale snapshot.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::Message;

/// Callback invoked with the full message list after every change
pub type MessagesListener = Arc<dyn Fn(&[Message]) + Send + Sync>;

/// Cheaply clonable handle to a host-owned message list
///
/// Create one handle per conversation, keep a clone in the host
/// application (for rendering/persistence) and hand a clone to the
/// orchestrator. All clones see every change immediately.
#[derive(Clone)]
pub struct ConversationHandle {
    messages: Arc<RwLock<Vec<Message>>>,
    listener: Arc<RwLock<Option<MessagesListener>>>,
}

impl ConversationHandle {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::with_messages(Vec::new())
    }

    /// Create a conversation pre-populated with messages
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Arc::new(RwLock::new(messages)),
            listener: Arc::new(RwLock::new(None)),
        }
    }

    /// Register the change listener (replaces any previous one)
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(&[Message]) + Send + Sync + 'static,
    {
        *self.listener.write() = Some(Arc::new(listener));
    }

    /// Append one message and notify the listener
    pub fn push(&self, message: Message) {
        let snapshot = {
            let mut messages = self.messages.write();
            messages.push(message);
            messages.clone()
        };
        self.notify(&snapshot);
    }

    /// Replace the entire message list and notify the listener
    pub fn replace(&self, messages: Vec<Message>) {
        let snapshot = {
            let mut guard = self.messages.write();
            *guard = messages;
            guard.clone()
        };
        self.notify(&snapshot);
    }

    /// Remove all messages and notify the listener
    pub fn clear(&self) {
        self.replace(Vec::new());
    }

    /// Copy of the current message list
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Whether the conversation is empty
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    fn notify(&self, messages: &[Message]) {
        // take the Arc out of the lock before invoking, the listener
        // may call back into this handle
        let listener = self.listener.read().clone();
        if let Some(listener) = listener {
            listener(messages);
        }
    }
}

impl Default for ConversationHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConversationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationHandle")
            .field("len", &self.len())
            .field("has_listener", &self.listener.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_push_and_snapshot() {
        let conversation = ConversationHandle::new();
        assert!(conversation.is_empty());

        conversation.push(Message::user("hello"));
        conversation.push(Message::assistant("hi"));

        let messages = conversation.snapshot();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].content, "hi");
    }

    #[test]
    fn test_clones_share_state() {
        let conversation = ConversationHandle::new();
        let clone = conversation.clone();

        conversation.push(Message::user("hello"));
        assert_eq!(clone.len(), 1);

        clone.clear();
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_listener_sees_every_append() {
        let conversation = ConversationHandle::new();
        let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));

        let recorded = seen.clone();
        conversation.on_change(move |messages| {
            recorded.lock().push(messages.len());
        });

        conversation.push(Message::user("one"));
        conversation.push(Message::assistant("two"));

        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn test_listener_runs_after_cell_update() {
        let conversation = ConversationHandle::new();
        let inner = conversation.clone();
        let observed = Arc::new(Mutex::new(0usize));

        let observed_in_listener = observed.clone();
        conversation.on_change(move |_| {
            // the shared cell is already updated when the listener runs
            *observed_in_listener.lock() = inner.len();
        });

        conversation.push(Message::user("hello"));
        assert_eq!(*observed.lock(), 1);
    }

    #[test]
    fn test_replace() {
        let conversation = ConversationHandle::with_messages(vec![Message::user("old")]);
        conversation.replace(vec![Message::user("new"), Message::assistant("reply")]);

        let messages = conversation.snapshot();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "new");
    }
}
