//! Color theme support

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (title, focus, spinner)
    pub accent: Color,
    /// User message color
    pub user: Color,
    /// Pundit (remote) message color
    pub pundit: Color,
    /// Border color
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::matchday()
    }
}

impl Theme {
    /// Orange-and-red default theme
    pub fn matchday() -> Self {
        Self {
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Rgb(251, 146, 60),
            user: Color::Rgb(249, 115, 22),
            pundit: Color::Rgb(220, 38, 38),
            border: Color::Rgb(124, 45, 18),
        }
    }

    /// Get base style
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Get dimmed style
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Get accent style
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Get bold accent style
    pub fn accent_bold(&self) -> Style {
        self.accent_style().add_modifier(Modifier::BOLD)
    }

    /// Label style for the message author
    pub fn author_style(&self, is_user: bool) -> Style {
        let color = if is_user { self.user } else { self.pundit };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}
