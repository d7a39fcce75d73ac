//! Tools, colors and stroke styles.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Canvas background, also the eraser ink
    pub const BACKGROUND: Color = Color::rgb(0x02, 0x06, 0x17);
    pub const GREEN: Color = Color::rgb(0x10, 0xb9, 0x81);
    pub const BLUE: Color = Color::rgb(0x3b, 0x82, 0xf6);
    pub const RED: Color = Color::rgb(0xef, 0x44, 0x44);
    pub const YELLOW: Color = Color::rgb(0xea, 0xb3, 0x08);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse `#rrggbb`.
    ///
    /// ```rust
    /// use calc_core::drawing::Color;
    ///
    /// assert_eq!(Color::from_hex("#10b981").unwrap(), Color::GREEN);
    /// assert!(Color::from_hex("green").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> CalcResult<Self> {
        let invalid = || CalcError::invalid_input("color", hex, "expected #rrggbb");
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::GREEN
    }
}

impl TryFrom<String> for Color {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Pen colors offered next to the canvas, in display order
pub const PALETTE: [Color; 4] = [Color::GREEN, Color::BLUE, Color::RED, Color::YELLOW];

/// Pen stroke width in CSS pixels
pub const PEN_WIDTH: f32 = 3.0;

/// Eraser stroke width in CSS pixels
pub const ERASER_WIDTH: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

/// Ink and width for new strokes. Caps and joins are always round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl StrokeStyle {
    /// Style of `tool`, where `pen_color` is the user's current pen color
    pub fn for_tool(tool: Tool, pen_color: Color) -> Self {
        match tool {
            Tool::Pen => StrokeStyle {
                color: pen_color,
                width: PEN_WIDTH,
            },
            Tool::Eraser => StrokeStyle {
                color: Color::BACKGROUND,
                width: ERASER_WIDTH,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        for color in PALETTE {
            assert_eq!(Color::from_hex(&color.to_hex()).unwrap(), color);
        }
        assert_eq!(Color::BACKGROUND.to_hex(), "#020617");
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("10b981").is_err());
        assert!(Color::from_hex("#1ö2345").is_err());
    }

    #[test]
    fn test_styles() {
        let pen = StrokeStyle::for_tool(Tool::Pen, Color::RED);
        assert_eq!(pen.color, Color::RED);
        assert_eq!(pen.width, 3.0);

        let eraser = StrokeStyle::for_tool(Tool::Eraser, Color::RED);
        assert_eq!(eraser.color, Color::BACKGROUND);
        assert_eq!(eraser.width, 15.0);
    }

    #[test]
    fn test_color_serializes_as_hex() {
        assert_eq!(serde_json::to_string(&Color::BLUE).unwrap(), "\"#3b82f6\"");
    }
}
