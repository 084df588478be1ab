//! Message list widget for displaying the transcript

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use roast_core::Message;

/// Label for messages typed by the user
pub const USER_LABEL: &str = "You";
/// Label for replies and notices
pub const PUNDIT_LABEL: &str = "Pundit";

/// Shown in place of the transcript before anything is appended
pub const EMPTY_PLACEHOLDER: [&str; 2] = [
    "Start the roast.",
    "Your football takes can't be worse than Arsenal's trophy cabinet.",
];

/// Widget for displaying a list of transcript messages
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    scroll: usize,
}

impl<'a> MessageList<'a> {
    /// Create a new message list
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            scroll: 0,
        }
    }

    /// Set scroll offset (in lines from the top)
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

/// Widest a message body may grow, as in a chat bubble
fn bubble_width(width: usize) -> usize {
    (width * 4 / 5).max(10).min(width)
}

/// Lay out one message: author line, wrapped body, blank separator.
///
/// User messages hug the right edge, everything else the left.
pub fn message_lines(msg: &Message, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let author_style = theme.author_style(msg.is_user);
    let time = msg.local_time();
    let body_width = bubble_width(width).saturating_sub(2).max(1);

    let mut lines = Vec::new();

    let header = if msg.is_user {
        Line::from(vec![
            Span::styled(time, theme.dim_style()),
            Span::raw("  "),
            Span::styled(USER_LABEL, author_style),
            Span::raw(" ▸"),
        ])
        .right_aligned()
    } else {
        Line::from(vec![
            Span::raw("◂ "),
            Span::styled(PUNDIT_LABEL, author_style),
            Span::raw("  "),
            Span::styled(time, theme.dim_style()),
        ])
    };
    lines.push(header);

    for chunk in textwrap::wrap(&msg.content, body_width) {
        let line = if msg.is_user {
            Line::from(Span::styled(format!("{}  ", chunk), theme.base_style())).right_aligned()
        } else {
            Line::from(Span::styled(format!("  {}", chunk), theme.base_style()))
        };
        lines.push(line);
    }

    lines.push(Line::from(""));
    lines
}

/// Total rendered height of the transcript at `width`
pub fn calculate_message_height(messages: &[Message], width: usize) -> usize {
    let theme = Theme::default();
    messages
        .iter()
        .map(|m| message_lines(m, width, &theme).len())
        .sum()
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.messages.is_empty() {
            let top = area.height.saturating_sub(EMPTY_PLACEHOLDER.len() as u16) / 2;
            let mut lines: Vec<Line> = vec![Line::from(""); top as usize];
            lines.extend(
                EMPTY_PLACEHOLDER
                    .iter()
                    .map(|text| Line::from(Span::styled(*text, self.theme.dim_style())).centered()),
            );
            Paragraph::new(lines).render(area, buf);
            return;
        }

        let width = area.width as usize;
        let visible: Vec<Line> = self
            .messages
            .iter()
            .flat_map(|msg| message_lines(msg, width, self.theme))
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();

        Paragraph::new(visible).render(area, buf);
    }
}
