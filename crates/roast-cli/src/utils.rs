//! Shared utilities

use roast_core::Message;
use roast_tui::widgets::message_list::{PUNDIT_LABEL, USER_LABEL};

/// Format a transcript message as one plain-text line
pub fn format_message(message: &Message) -> String {
    let author = if message.is_user {
        USER_LABEL
    } else {
        PUNDIT_LABEL
    };
    format!("[{}] {}: {}", message.local_time(), author, message.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pundit_line() {
        let message = Message::assistant("Offside by a nostril");
        let line = format_message(&message);
        assert!(line.starts_with('['));
        assert!(line.ends_with("] Pundit: Offside by a nostril"));
    }

    #[test]
    fn test_format_user_line() {
        let line = format_message(&Message::user("VAR was right"));
        assert!(line.ends_with("] You: VAR was right"));
    }
}
