//! Title banner

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Title shown at the top of the screen
pub const TITLE: &str = "Football Roasting";
/// Tagline under the title
pub const TAGLINE: &str = "Where banter burns brighter than VAR screens";

/// Two-line banner with the app title and tagline
pub struct Header<'a> {
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Rows the header needs, including its bottom border
    pub const HEIGHT: u16 = 3;
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(vec![
                Span::styled(" 🔥 ", self.theme.accent_style()),
                Span::styled(TITLE, self.theme.accent_bold()),
            ]),
            Line::from(Span::styled(format!("    {}", TAGLINE), self.theme.dim_style())),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
