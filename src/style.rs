//! Style primitives for attributed text
//!
//! Defines the color, font, and attribute key/value types stamped onto
//! text ranges by the highlight engine.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default editor font size in points
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        // Byte-indexed slicing below; multibyte input must fail as Err,
        // not panic on a char boundary
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        match s.len() {
            6 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: 255,
            }),
            8 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: u8::from_str_radix(&s[6..8], 16).map_err(|e| e.to_string())?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBB" (or "#RRGGBBAA" when alpha is not opaque)
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

bitflags! {
    /// Symbolic font traits that compose onto a base font
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FontTraits: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const MONOSPACE = 1 << 2;
    }
}

/// A resolved font: family, point size, and symbolic traits
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub traits: FontTraits,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            traits: FontTraits::empty(),
        }
    }

    /// System font at the default editor size
    pub fn system(size: f32) -> Self {
        Self::new("system", size)
    }

    /// Return a copy with the given traits merged into the existing ones
    pub fn with_traits(&self, traits: FontTraits) -> Self {
        Self {
            family: self.family.clone(),
            size: self.size,
            traits: self.traits | traits,
        }
    }

    /// Return a copy at a different point size, keeping family and traits
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            family: self.family.clone(),
            size,
            traits: self.traits,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(DEFAULT_FONT_SIZE)
    }
}

/// Attribute keys addressable on a text range
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleKey {
    Font,
    Foreground,
    Background,
    Underline,
    Strikethrough,
    Link,
    Kern,
    ParagraphSpacing,
    /// Host-defined attribute, addressed by name
    Custom(String),
}

/// Attribute values stamped onto a text range
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Font(Font),
    Color(Color),
    Number(f64),
    Text(String),
    Flag(bool),
}

impl StyleValue {
    /// Borrow the font value, if this is one
    pub fn as_font(&self) -> Option<&Font> {
        match self {
            StyleValue::Font(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

/// Base styling stamped over the full text before any rule runs
#[derive(Debug, Clone, PartialEq)]
pub struct BaseStyle {
    pub font: Font,
    pub foreground: Color,
}

impl Default for BaseStyle {
    fn default() -> Self {
        Self {
            font: Font::default(),
            // Matches a typical dark editor foreground
            foreground: Color::rgb(0xd4, 0xd4, 0xd4),
        }
    }
}
