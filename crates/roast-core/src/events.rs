//! Transcript change notifications

use crate::message::Message;

/// Events broadcast to transcript subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// A message was appended at `index`
    MessageAppended { index: usize, message: Message },

    /// An exchange entered or left the pending state
    PendingChanged { pending: bool },
}

impl ChatEvent {
    /// The appended message, if this is an append
    pub fn message(&self) -> Option<&Message> {
        match self {
            ChatEvent::MessageAppended { message, .. } => Some(message),
            ChatEvent::PendingChanged { .. } => None,
        }
    }
}
