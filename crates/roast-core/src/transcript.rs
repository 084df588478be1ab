//! Append-only transcript with change notification

use tokio::sync::broadcast;

use crate::{events::ChatEvent, message::Message};

/// Ordered, append-only history of exchanged messages.
///
/// Messages are never removed or edited once appended, so insertion order is
/// chronological order. Every append is broadcast to subscribers.
pub struct TranscriptStore {
    messages: Vec<Message>,
    event_tx: broadcast::Sender<ChatEvent>,
}

impl TranscriptStore {
    /// Create an empty transcript
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            messages: Vec::new(),
            event_tx,
        }
    }

    /// Subscribe to transcript events
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.event_tx.subscribe()
    }

    /// Append a message to the end of the transcript
    pub fn append(&mut self, message: Message) {
        let index = self.messages.len();
        self.messages.push(message.clone());
        // No subscribers is fine
        let _ = self.event_tx.send(ChatEvent::MessageAppended { index, message });
    }

    /// Read-only view of every message, oldest first
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Sender used by the exchange guard to announce pending changes
    pub(crate) fn event_sender(&self) -> broadcast::Sender<ChatEvent> {
        self.event_tx.clone()
    }

    pub(crate) fn notify(&self, event: ChatEvent) {
        let _ = self.event_tx.send(event);
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut store = TranscriptStore::new();
        store.append(Message::user("first"));
        store.append(Message::assistant("second"));
        store.append(Message::user("third"));

        let contents: Vec<&str> = store.snapshot().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.last().unwrap().content, "third");
    }

    #[test]
    fn test_no_deduplication() {
        let mut store = TranscriptStore::new();
        store.append(Message::user("same"));
        store.append(Message::user("same"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_new_is_empty() {
        let store = TranscriptStore::default();
        assert!(store.is_empty());
        assert!(store.last().is_none());
    }

    #[test]
    fn test_append_without_subscribers() {
        let mut store = TranscriptStore::new();
        store.append(Message::assistant("nobody listening"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_append_notifies_subscribers() {
        let mut store = TranscriptStore::new();
        let mut rx = store.subscribe();

        store.append(Message::user("hello"));
        store.append(Message::assistant("hi"));

        let first = rx.recv().await.unwrap();
        assert!(matches!(first, ChatEvent::MessageAppended { index: 0, .. }));
        assert_eq!(first.message().unwrap().content, "hello");

        let second = rx.recv().await.unwrap();
        assert!(matches!(second, ChatEvent::MessageAppended { index: 1, .. }));
    }
}
