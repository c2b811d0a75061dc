//! UI presentation state - theme palettes

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Palette selection stored in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn toggle(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }
}

/// Colors used across all components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub kind: ThemeKind,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub header: Color,
    pub border: Color,
    pub selected_bg: Color,
    pub placeholder: Color,
    pub warning: Color,
    pub error: Color,
    pub ok: Color,
}

impl Theme {
    pub fn new(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self {
                kind,
                fg: Color::White,
                dim: Color::DarkGray,
                accent: Color::Cyan,
                header: Color::Cyan,
                border: Color::DarkGray,
                selected_bg: Color::Rgb(40, 44, 52),
                placeholder: Color::Rgb(70, 70, 70),
                warning: Color::Yellow,
                error: Color::Red,
                ok: Color::Green,
            },
            ThemeKind::Light => Self {
                kind,
                fg: Color::Black,
                dim: Color::Gray,
                accent: Color::Blue,
                header: Color::Blue,
                border: Color::Gray,
                selected_bg: Color::Rgb(220, 228, 240),
                placeholder: Color::Rgb(200, 200, 200),
                warning: Color::Rgb(180, 120, 0),
                error: Color::Red,
                ok: Color::Rgb(0, 130, 0),
            },
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeKind::default())
    }
}
