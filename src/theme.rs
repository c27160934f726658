//! Theme colors for the UI.
//! Built-in palette with optional `[theme]` overrides from the config file.

use ratatui::style::Color;

use crate::config::ThemeConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,       // Focused borders, key hints
    pub danger: Color,       // Validation errors, delete actions
    pub success: Color,      // Add action, confirmations
    pub text: Color,         // Primary text
    pub text_dim: Color,     // Placeholders, timestamps, hints
    pub bg_selected: Color,  // Selected note background
    pub inactive: Color,     // Unfocused borders
    pub header: Color,       // Title banner
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(137, 180, 250),
        }
    }
}

impl Theme {
    /// Apply config overrides on top of the default palette.
    /// Unparsable colors are skipped with a warning.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        let overrides = [
            ("accent", &config.accent, &mut theme.accent),
            ("danger", &config.danger, &mut theme.danger),
            ("success", &config.success, &mut theme.success),
            ("text", &config.text, &mut theme.text),
            ("text_dim", &config.text_dim, &mut theme.text_dim),
            ("selection", &config.selection, &mut theme.bg_selected),
        ];

        for (name, value, slot) in overrides {
            let Some(value) = value else { continue };
            match parse_hex_color(value) {
                Some(color) => *slot = color,
                None => tracing::warn!("Ignoring theme.{} = {:?}: not a hex color", name, value),
            }
        }

        theme
    }
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');

    if !s.is_ascii() {
        return None;
    }

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
        let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
        let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}
