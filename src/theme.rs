//! Static design tokens shared by the app's screens.

use serde::{Serialize, Serializer};
use std::fmt;

/// An sRGB color. Serializes as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

#[derive(Debug, Clone, Serialize)]
pub struct Spacing {
    pub xs: u16,
    pub sm: u16,
    pub md: u16,
    pub lg: u16,
    pub xl: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextStyle {
    pub size: u16,
    pub weight: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct Typography {
    pub heading: TextStyle,
    pub title: TextStyle,
    pub body: TextStyle,
    pub caption: TextStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct Radii {
    pub sm: u16,
    pub md: u16,
    pub lg: u16,
    pub pill: u16,
}

/// Everything in [`Theme`], as one serializable table.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeTokens {
    pub colors: Palette,
    pub spacing: Spacing,
    pub typography: Typography,
    pub radii: Radii,
}

pub struct Theme;

impl Theme {
    pub fn primary() -> Color {
        Color::rgb(0x25, 0x63, 0xeb)
    }

    pub fn secondary() -> Color {
        Color::rgb(0x7c, 0x3a, 0xed)
    }

    pub fn background() -> Color {
        Color::rgb(0xf8, 0xfa, 0xfc)
    }

    pub fn surface() -> Color {
        Color::rgb(0xff, 0xff, 0xff)
    }

    pub fn text() -> Color {
        Color::rgb(0x0f, 0x17, 0x2a)
    }

    pub fn text_muted() -> Color {
        Color::rgb(0x64, 0x74, 0x8b)
    }

    pub fn border() -> Color {
        Color::rgb(0xe2, 0xe8, 0xf0)
    }

    pub fn success() -> Color {
        Color::rgb(0x16, 0xa3, 0x4a)
    }

    pub fn warning() -> Color {
        Color::rgb(0xf5, 0x9e, 0x0b)
    }

    pub fn error() -> Color {
        Color::rgb(0xdc, 0x26, 0x26)
    }

    pub fn palette() -> Palette {
        Palette {
            primary: Self::primary(),
            secondary: Self::secondary(),
            background: Self::background(),
            surface: Self::surface(),
            text: Self::text(),
            text_muted: Self::text_muted(),
            border: Self::border(),
            success: Self::success(),
            warning: Self::warning(),
            error: Self::error(),
        }
    }

    pub fn spacing() -> Spacing {
        Spacing {
            xs: 4,
            sm: 8,
            md: 16,
            lg: 24,
            xl: 32,
        }
    }

    pub fn typography() -> Typography {
        Typography {
            heading: TextStyle { size: 28, weight: 700 },
            title: TextStyle { size: 20, weight: 600 },
            body: TextStyle { size: 16, weight: 400 },
            caption: TextStyle { size: 12, weight: 400 },
        }
    }

    pub fn radii() -> Radii {
        Radii {
            sm: 4,
            md: 8,
            lg: 16,
            pill: 999,
        }
    }

    pub fn tokens() -> ThemeTokens {
        ThemeTokens {
            colors: Self::palette(),
            spacing: Self::spacing(),
            typography: Self::typography(),
            radii: Self::radii(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::rgb(0x25, 0x63, 0xeb).to_string(), "#2563eb");
        assert_eq!(Color::rgb(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_tokens_json_shape() {
        let json = serde_json::to_value(Theme::tokens()).unwrap();
        assert_eq!(json["colors"]["primary"], "#2563eb");
        assert_eq!(json["colors"]["text_muted"], "#64748b");
        assert_eq!(json["spacing"]["md"], 16);
        assert_eq!(json["typography"]["body"]["size"], 16);
        assert_eq!(json["radii"]["pill"], 999);
    }

    #[test]
    fn test_spacing_scale_increases() {
        let s = Theme::spacing();
        assert!(s.xs < s.sm && s.sm < s.md && s.md < s.lg && s.lg < s.xl);
    }
}
