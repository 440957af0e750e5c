//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Focused borders and the status bar.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Warning dialog background.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
