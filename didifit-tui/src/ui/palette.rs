// didifit-tui/src/ui/palette.rs
use didifit_lib::{Config, StandardColor, Theme};
use ratatui::style::{Color, Modifier, Style};

/// Terminal colors for one theme, with the configured accent and highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub bar_bg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

// crossterm names the bright variants plainly and the normal ones "Dark*"
pub fn to_color(color: StandardColor) -> Color {
    match color {
        StandardColor::Black => Color::Black,
        StandardColor::Red => Color::LightRed,
        StandardColor::Green => Color::LightGreen,
        StandardColor::Yellow => Color::LightYellow,
        StandardColor::Blue => Color::LightBlue,
        StandardColor::Magenta => Color::LightMagenta,
        StandardColor::Cyan => Color::LightCyan,
        StandardColor::White => Color::White,
        StandardColor::DarkGrey => Color::DarkGray,
        StandardColor::DarkRed => Color::Red,
        StandardColor::DarkGreen => Color::Green,
        StandardColor::DarkYellow => Color::Yellow,
        StandardColor::DarkBlue => Color::Blue,
        StandardColor::DarkMagenta => Color::Magenta,
        StandardColor::DarkCyan => Color::Cyan,
        StandardColor::Grey => Color::Gray,
    }
}

impl Palette {
    pub fn new(theme: Theme, config: &Config) -> Self {
        let accent = config.colors.accent_color().map_or(Color::Yellow, to_color);
        let highlight = config.colors.highlight_color().map_or(Color::DarkGray, to_color);
        match theme {
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::DarkGray,
                accent,
                highlight,
                bar_bg: Color::Gray,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
            },
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                muted: Color::Gray,
                accent,
                highlight,
                bar_bg: Color::DarkGray,
                success: Color::LightGreen,
                warning: Color::LightYellow,
                error: Color::LightRed,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn selection(&self) -> Style {
        Style::default()
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Reversed style for the input that owns the cursor.
    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.fg).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(self.fg)
        }
    }
}
