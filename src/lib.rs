//! Glint - regex-driven rich-text highlighting core
//!
//! This crate provides the toolkit-independent core of a highlighted text
//! editor view: a pure highlight engine mapping (text, rules) to attributed
//! text, a coalescing coordinator that keeps re-highlighting bounded under
//! fast typing, and the view-model state a GUI binding synchronizes with.

pub mod attributed;
pub mod config;
pub mod context;
pub mod coordinator;
pub mod cursor;
pub mod highlight;
pub mod processor;
pub mod style;

// Re-export commonly used types
pub use attributed::{AttributeSet, AttributedText, Span};
pub use config::EditorConfig;
pub use context::EditorContext;
pub use coordinator::HighlightCoordinator;
pub use cursor::CursorChange;
pub use highlight::{
    highlight, markdown_rules, HighlightRule, InvalidPatternError, TextFormattingRule,
};
pub use processor::TextProcessor;
pub use style::{BaseStyle, Color, Font, FontTraits, StyleKey, StyleValue};
