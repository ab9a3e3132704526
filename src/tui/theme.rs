//! Color themes and styling for TUI components.

use ratatui::style::{Color, Modifier, Style};

use crate::heatmap::Rgb;
use crate::prefs::ThemeMode;

/// Palette for one [`ThemeMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Accent for active elements and values
    pub primary: Color,
    /// Positive indicators (documented, public)
    pub success: Color,
    /// Labels, leaders and inactive elements
    pub muted: Color,
    /// Normal text
    pub text: Color,
    pub background: Color,
    /// Type names inside signatures
    pub type_name: Color,
    pub warning: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            success: Color::Green,
            muted: Color::Gray,
            text: Color::Black,
            background: Color::White,
            type_name: Color::Magenta,
            warning: Color::Red,
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            success: Color::Green,
            muted: Color::DarkGray,
            text: Color::White,
            background: Color::Reset,
            type_name: Color::LightMagenta,
            warning: Color::Yellow,
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Base style for a whole frame.
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Selected tab button or focused table title
    pub fn active_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Row under the cursor
    pub fn selection_style(&self) -> Style {
        Style::default()
            .fg(self.background_contrast())
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Check mark or cross in boolean columns.
    pub fn flag_style(&self, positive: bool) -> Style {
        if positive {
            Style::default().fg(self.success)
        } else {
            Style::default().fg(self.warning)
        }
    }

    fn background_contrast(&self) -> Color {
        match self.background {
            Color::White => Color::White,
            _ => Color::Black,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Terminal colour for a heatmap swatch.
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_for_mode() {
        assert_eq!(Theme::for_mode(ThemeMode::Light), Theme::light());
        assert_eq!(Theme::for_mode(ThemeMode::Dark).primary, Color::Cyan);
        assert_eq!(Theme::default(), Theme::light());
    }

    #[test]
    fn test_flag_styles_distinct() {
        let theme = Theme::dark();
        assert_ne!(theme.flag_style(true).fg, theme.flag_style(false).fg);
    }

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
