//! Editor view configuration
//!
//! Auto-grow bounds and base styling for a hosted editor view, serializable
//! as YAML so hosts can persist it alongside their own settings.

use serde::{Deserialize, Serialize};

use crate::style::{BaseStyle, Color, Font};

fn default_min_height() -> f32 {
    50.0
}

fn default_max_height() -> f32 {
    400.0
}

fn default_min_line_count() -> usize {
    1
}

fn default_max_line_count() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Configuration for an auto-growing editor view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Whether the view grows with its content
    #[serde(default = "default_true")]
    pub auto_growing: bool,
    /// Height bounds in points, used when auto-growing
    #[serde(default = "default_min_height")]
    pub min_height: f32,
    #[serde(default = "default_max_height")]
    pub max_height: f32,
    /// Line-count bounds for hosts that size by line instead of points
    #[serde(default = "default_min_line_count")]
    pub min_line_count: usize,
    #[serde(default = "default_max_line_count")]
    pub max_line_count: usize,
    /// Base font size stamped before any rule runs
    #[serde(default)]
    pub base_font_size: Option<f32>,
    /// Base text color as "#RRGGBB" / "#RRGGBBAA"
    #[serde(default)]
    pub base_foreground: Option<Color>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_growing: true,
            min_height: default_min_height(),
            max_height: default_max_height(),
            min_line_count: default_min_line_count(),
            max_line_count: default_max_line_count(),
            base_font_size: None,
            base_foreground: None,
        }
    }
}

impl EditorConfig {
    /// Parse from YAML, falling back to defaults for absent fields
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse editor config: {}", e))
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| format!("Failed to serialize editor config: {}", e))
    }

    /// Base style derived from the configured overrides
    pub fn base_style(&self) -> BaseStyle {
        let defaults = BaseStyle::default();
        BaseStyle {
            font: match self.base_font_size {
                Some(size) => Font::system(size),
                None => defaults.font,
            },
            foreground: self.base_foreground.unwrap_or(defaults.foreground),
        }
    }
}
