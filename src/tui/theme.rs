//! Process-wide color scheme.
//!
//! Built once at startup from the resolved config and passed around
//! immutably; nothing mutates colors after that.

use log::warn;
use ratatui::style::Color;

use crate::core::config::ResolvedConfig;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub text: Color,
    pub text_light: Color,
    pub error: Color,
}

/// Fixed error red, matching the original mockups. Not configurable.
const ERROR_COLOR: Color = Color::Rgb(0xFF, 0x44, 0x44);

impl Theme {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            primary: parse_hex(&config.theme_primary, Color::Magenta),
            secondary: parse_hex(&config.theme_secondary, Color::LightMagenta),
            background: parse_hex(&config.theme_background, Color::White),
            text: parse_hex(&config.theme_text, Color::Black),
            text_light: parse_hex(&config.theme_text_light, Color::White),
            error: ERROR_COLOR,
        }
    }
}

/// Parses `#RRGGBB` into an RGB color; falls back on malformed input.
fn parse_hex(value: &str, fallback: Color) -> Color {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        warn!("Malformed theme color '{}', using fallback", value);
        return fallback;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => {
            warn!("Malformed theme color '{}', using fallback", value);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_with_and_without_hash() {
        assert_eq!(parse_hex("#800080", Color::Reset), Color::Rgb(0x80, 0x00, 0x80));
        assert_eq!(parse_hex("D8BFD8", Color::Reset), Color::Rgb(0xD8, 0xBF, 0xD8));
    }

    #[test]
    fn test_parse_hex_malformed_falls_back() {
        assert_eq!(parse_hex("purple", Color::Magenta), Color::Magenta);
        assert_eq!(parse_hex("#80", Color::Magenta), Color::Magenta);
        assert_eq!(parse_hex("#GGGGGG", Color::Magenta), Color::Magenta);
    }

    #[test]
    fn test_default_theme_matches_brand_colors() {
        let config = crate::core::config::resolve(&Default::default());
        let theme = Theme::from_config(&config);
        assert_eq!(theme.primary, Color::Rgb(0x80, 0x00, 0x80));
        assert_eq!(theme.secondary, Color::Rgb(0xD8, 0xBF, 0xD8));
    }
}
