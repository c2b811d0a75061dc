//! Icon resolver
//!
//! Maps symbolic icon names used in table documents to terminal glyphs.

use ratatui::style::Color;
use std::str::FromStr;

/// Glyph used for names the resolver does not know
pub const UNKNOWN_ICON: &str = "•";

/// A resolved icon, ready to be styled into a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIcon {
    pub glyph: &'static str,
    /// Explicit color requested by the cell, if it parsed
    pub color: Option<Color>,
}

fn glyph_for(name: &str) -> &'static str {
    match name.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
        "check" | "done" | "success" => "✓",
        "close" | "cross" | "cancel" => "✗",
        "error" | "failed" => "✖",
        "warning" | "warn" => "⚠",
        "info" => "ℹ",
        "star" => "★",
        "star_outline" => "☆",
        "circle" | "dot" => "●",
        "circle_outline" => "○",
        "arrow_up" | "up" => "↑",
        "arrow_down" | "down" => "↓",
        "arrow_left" | "left" => "←",
        "arrow_right" | "right" => "→",
        "clock" | "pending" | "schedule" => "◷",
        "lock" => "⚿",
        "heart" | "favorite" => "♥",
        "flag" => "⚑",
        "folder" => "▤",
        "file" | "description" => "▯",
        _ => UNKNOWN_ICON,
    }
}

/// Parse a color name or `#rrggbb` value
pub fn parse_color(name: &str) -> Option<Color> {
    Color::from_str(name.trim()).ok()
}

/// Resolve an icon by name plus optional color
pub fn resolve(name: &str, color: Option<&str>) -> ResolvedIcon {
    ResolvedIcon {
        glyph: glyph_for(name),
        color: color.and_then(parse_color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_icon() {
        let icon = resolve("check", Some("green"));
        assert_eq!(icon.glyph, "✓");
        assert_eq!(icon.color, Some(Color::Green));
    }

    #[test]
    fn test_resolve_normalizes_name() {
        assert_eq!(resolve("Arrow-Up", None).glyph, "↑");
        assert_eq!(resolve("star outline", None).glyph, "☆");
    }

    #[test]
    fn test_resolve_unknown_icon() {
        let icon = resolve("does-not-exist", None);
        assert_eq!(icon.glyph, UNKNOWN_ICON);
        assert_eq!(icon.color, None);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(parse_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_color("not a color"), None);
    }
}
