//! UI palette, optionally overridden per-user.
//! Reads hex colors from ~/.config/vernac/theme.toml when present.

use ratatui::style::Color;
use serde::Deserialize;

/// Theme colors for the form view
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,   // Active borders, highlights
    pub danger: Color,   // Error alert
    pub success: Color,  // Response card
    pub warning: Color,  // Loading indicator
    pub text: Color,     // Primary text
    pub text_dim: Color, // Placeholder and hint text
    pub inactive: Color, // Inactive borders
    pub header: Color,   // Section labels inside cards
}

/// Raw theme file: every key optional, hex strings like "#FFC107".
#[derive(Debug, Default, Deserialize)]
struct ThemeFile {
    accent: Option<String>,
    danger: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    text: Option<String>,
    text_dim: Option<String>,
    inactive: Option<String>,
    header: Option<String>,
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired fallback palette
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(249, 226, 175),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(137, 180, 250),
        }
    }
}

impl Theme {
    /// Load the user theme file, falling back to defaults per-key.
    pub fn load() -> Self {
        let Some(config_dir) = dirs::config_dir() else {
            return Self::default();
        };

        let path = config_dir.join("vernac").join("theme.toml");
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };

        match toml::from_str::<ThemeFile>(&content) {
            Ok(file) => Self::from_file(file),
            Err(e) => {
                tracing::warn!("Failed to parse theme file: {}", e);
                Self::default()
            }
        }
    }

    fn from_file(file: ThemeFile) -> Self {
        let defaults = Self::default();

        let pick = |value: Option<String>, fallback: Color| {
            value
                .as_deref()
                .and_then(Self::parse_hex_color)
                .unwrap_or(fallback)
        };

        Self {
            accent: pick(file.accent, defaults.accent),
            danger: pick(file.danger, defaults.danger),
            success: pick(file.success, defaults.success),
            warning: pick(file.warning, defaults.warning),
            text: pick(file.text, defaults.text),
            text_dim: pick(file.text_dim, defaults.text_dim),
            inactive: pick(file.inactive, defaults.inactive),
            header: pick(file.header, defaults.header),
        }
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_color_accepts_both_forms() {
        assert_eq!(
            Theme::parse_hex_color("#FFC107"),
            Some(Color::Rgb(255, 193, 7))
        );
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("zzzzzz"), None);
    }

    #[test]
    fn theme_file_overrides_only_given_keys() {
        let file: ThemeFile = toml::from_str(r##"accent = "#000000""##).unwrap();
        let theme = Theme::from_file(file);
        let defaults = Theme::default();

        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.danger, defaults.danger);
    }
}
