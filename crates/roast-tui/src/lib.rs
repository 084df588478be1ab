//! roast-tui: Terminal UI components
//!
//! Widgets for rendering a roast transcript with ratatui and crossterm.

pub mod app;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
