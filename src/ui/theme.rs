use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the preview.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Scheme colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

const TEXT: ColorSpec = ColorSpec::rgb(55, 65, 81); // Gray 700
const TEXT_MUTED: ColorSpec = ColorSpec::rgb(156, 163, 175); // Gray 400
const SUCCESS: ColorSpec = ColorSpec::rgb(22, 163, 74); // Green 600
const WARNING: ColorSpec = ColorSpec::rgb(202, 138, 4); // Yellow 600
const ERROR: ColorSpec = ColorSpec::rgb(239, 68, 68); // Red 500
const BORDER: ColorSpec = ColorSpec::rgb(209, 213, 219); // Gray 300

impl Default for Theme {
    fn default() -> Self {
        Theme::default_scheme()
    }
}

impl Theme {
    fn scheme(name: &str, primary: ColorSpec, secondary: ColorSpec) -> Self {
        Theme {
            name: name.to_string(),
            primary,
            secondary,
            text: TEXT,
            text_muted: TEXT_MUTED,
            success: SUCCESS,
            warning: WARNING,
            error: ERROR,
            border_active: primary,
            border_normal: BORDER,
        }
    }

    /// Blue scheme.
    ///
    pub fn default_scheme() -> Self {
        Self::scheme(
            "Default",
            ColorSpec::rgb(59, 130, 246),  // Blue 500
            ColorSpec::rgb(219, 234, 254), // Blue 100
        )
    }

    pub fn sunset() -> Self {
        Self::scheme(
            "Sunset",
            ColorSpec::rgb(249, 115, 22),  // Orange 500
            ColorSpec::rgb(254, 249, 195), // Yellow 100
        )
    }

    pub fn forest() -> Self {
        Self::scheme(
            "Forest",
            ColorSpec::rgb(34, 197, 94),   // Green 500
            ColorSpec::rgb(220, 252, 231), // Green 100
        )
    }

    pub fn ocean() -> Self {
        Self::scheme(
            "Ocean",
            ColorSpec::rgb(20, 184, 166),  // Teal 500
            ColorSpec::rgb(219, 234, 254), // Blue 100
        )
    }

    pub fn berry() -> Self {
        Self::scheme(
            "Berry",
            ColorSpec::rgb(168, 85, 247),  // Purple 500
            ColorSpec::rgb(252, 231, 243), // Pink 100
        )
    }

    /// Look up a scheme by name, ignoring case.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "default" => Some(Self::default_scheme()),
            "sunset" => Some(Self::sunset()),
            "forest" => Some(Self::forest()),
            "ocean" => Some(Self::ocean()),
            "berry" => Some(Self::berry()),
            _ => None,
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec![
            "Default".to_string(),
            "Sunset".to_string(),
            "Forest".to_string(),
            "Ocean".to_string(),
            "Berry".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("ocean").unwrap().name, "Ocean");
        assert_eq!(Theme::from_name(" Berry ").unwrap(), Theme::berry());
        assert!(Theme::from_name("Neon").is_none());
    }

    #[test]
    fn test_every_available_theme_resolves() {
        for name in Theme::available_themes() {
            assert_eq!(Theme::from_name(&name).unwrap().name, name);
        }
    }

    #[test]
    fn test_to_color() {
        let theme = Theme::default();
        assert_eq!(theme.primary.to_color(), Color::Rgb(59, 130, 246));
        assert_eq!(theme.border_active, theme.primary);
    }
}
