//! Highlighting module
//!
//! Provides regex-rule based text highlighting:
//! - Rule construction with pattern validation
//! - A pure engine mapping (text, rules) to attributed text
//! - A default Markdown rule preset
//!
//! ## Architecture
//!
//! ```text
//! Text edit → HighlightCoordinator::submit → (worker thread)
//!          → pre-transforms → highlight() → post-transforms
//!          → published AttributedText
//! ```

mod engine;
mod markdown;
mod rules;

pub use engine::highlight;
pub use markdown::markdown_rules;
pub use rules::{HighlightRule, InvalidPatternError, TextFormattingRule};
