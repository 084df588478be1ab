//! Text input widget

use crate::input::Edit;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Single-line text input widget.
///
/// While disabled the box still accepts edits; it is only drawn dimmed so the
/// caller can refuse submission until the pending exchange settles.
#[derive(Debug, Default)]
pub struct InputBox {
    /// Current input text
    content: String,
    /// Cursor position (character index, not byte index)
    cursor: usize,
    /// Horizontal scroll offset (in display width)
    scroll: usize,
    /// Placeholder text
    placeholder: String,
    /// Whether the input is focused
    focused: bool,
    /// Whether submission is currently refused
    disabled: bool,
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

impl InputBox {
    /// Create a new input box
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set focus state
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Set disabled state
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether submission is currently refused
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Get the current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Take the content, leaving the box empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        self.scroll = 0;
        std::mem::take(&mut self.content)
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.take();
    }

    /// Byte offset of the character at `index` (or end of string)
    fn byte_offset(&self, index: usize) -> usize {
        self.content
            .char_indices()
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Remove characters in `[start, end)` (character indices)
    fn remove_range(&mut self, start: usize, end: usize) {
        let from = self.byte_offset(start);
        let to = self.byte_offset(end);
        self.content.drain(from..to);
    }

    /// Display width of text before the cursor
    fn cursor_display_width(&self) -> usize {
        self.content.chars().take(self.cursor).map(char_width).sum()
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Start of the word before the cursor, skipping trailing spaces first
    fn word_start(&self) -> usize {
        let chars: Vec<char> = self.content.chars().take(self.cursor).collect();
        let mut i = chars.len();
        while i > 0 && chars[i - 1] == ' ' {
            i -= 1;
        }
        while i > 0 && chars[i - 1] != ' ' {
            i -= 1;
        }
        i
    }

    /// Apply an edit. Returns true if anything changed.
    pub fn apply(&mut self, edit: &Edit, width: u16) -> bool {
        let consumed = match edit {
            Edit::Insert(c) => {
                self.insert_char(*c);
                true
            }
            Edit::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_range(self.cursor, self.cursor + 1);
                true
            }
            Edit::Delete if self.cursor < self.char_count() => {
                self.remove_range(self.cursor, self.cursor + 1);
                true
            }
            Edit::Left if self.cursor > 0 => {
                self.cursor -= 1;
                true
            }
            Edit::Right if self.cursor < self.char_count() => {
                self.cursor += 1;
                true
            }
            Edit::Home => {
                self.cursor = 0;
                true
            }
            Edit::End => {
                self.cursor = self.char_count();
                true
            }
            Edit::ClearLine => {
                self.clear();
                true
            }
            Edit::DeleteWord => {
                let start = self.word_start();
                self.remove_range(start, self.cursor);
                self.cursor = start;
                true
            }
            Edit::Paste(text) => {
                // Single-line input: fold line breaks into one space
                for c in text.chars() {
                    if c == '\n' || c == '\r' {
                        if self.cursor > 0 && !self.content.ends_with(' ') {
                            self.insert_char(' ');
                        }
                    } else {
                        self.insert_char(c);
                    }
                }
                true
            }
            _ => false,
        };

        if consumed {
            self.update_scroll(width as usize);
        }
        consumed
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    fn update_scroll(&mut self, width: usize) {
        let visible_width = width.saturating_sub(2).max(1); // left and right border
        let cursor_pos = self.cursor_display_width();

        if cursor_pos < self.scroll {
            self.scroll = cursor_pos;
        } else if cursor_pos >= self.scroll + visible_width {
            self.scroll = cursor_pos + 1 - visible_width;
        }
    }

    /// Slice of the content visible in `visible_width` columns after scrolling
    fn visible_text(&self, visible_width: usize) -> String {
        let mut skipped = 0;
        let mut used = 0;
        let mut visible = String::new();
        for c in self.content.chars() {
            let w = char_width(c);
            if skipped < self.scroll {
                skipped += w;
                continue;
            }
            if used + w > visible_width {
                break;
            }
            visible.push(c);
            used += w;
        }
        visible
    }

    /// Render the input box
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let border_style = if self.disabled {
            theme.dim_style()
        } else if self.focused {
            theme.accent_style()
        } else {
            theme.border_style()
        };
        let block = Block::default().borders(Borders::ALL).border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let (text, style) = if self.content.is_empty() {
            (self.placeholder.clone(), theme.dim_style())
        } else if self.disabled {
            (self.visible_text(inner.width as usize), theme.dim_style())
        } else {
            (self.visible_text(inner.width as usize), theme.base_style())
        };

        Paragraph::new(text).style(style).render(inner, buf);

        if self.focused && !self.disabled && inner.width > 0 {
            let cursor_x = self.cursor_display_width().saturating_sub(self.scroll);
            if cursor_x < inner.width as usize {
                let x = inner.x + cursor_x as u16;
                if let Some(cell) = buf.cell_mut((x, inner.y)) {
                    cell.set_style(Style::default().bg(theme.accent));
                }
            }
        }
    }
}
