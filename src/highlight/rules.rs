//! Highlight rule construction
//!
//! A `HighlightRule` pairs a compiled regex pattern with an ordered list of
//! formatting rules applied to every match. Malformed patterns are rejected
//! here, at construction time; the highlight pass itself never fails.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use regex::Regex;
use thiserror::Error;

use crate::style::{FontTraits, StyleKey, StyleValue};

/// Rule construction failed because the pattern did not compile
#[derive(Debug, Error)]
#[error("invalid highlight pattern `{pattern}`: {source}")]
pub struct InvalidPatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Callback computing an attribute value from the matched substring and its
/// byte range within the original text
pub type ComputeValue = dyn Fn(&str, Range<usize>) -> StyleValue + Send + Sync;

/// One formatting directive within a rule's attribute list
///
/// Directives are applied in list order per match; a font-trait directive
/// reads the font stamped by earlier directives in the same match.
#[derive(Clone)]
pub enum TextFormattingRule {
    /// Fixed key/value stamped onto the match range
    Constant { key: StyleKey, value: StyleValue },
    /// Key with a value computed from (matched text, match range)
    Computed {
        key: StyleKey,
        compute: Arc<ComputeValue>,
    },
    /// Font traits merged into the font currently stamped on the range
    FontTraits(FontTraits),
}

impl TextFormattingRule {
    pub fn value(key: StyleKey, value: StyleValue) -> Self {
        Self::Constant { key, value }
    }

    pub fn computed<F>(key: StyleKey, compute: F) -> Self
    where
        F: Fn(&str, Range<usize>) -> StyleValue + Send + Sync + 'static,
    {
        Self::Computed {
            key,
            compute: Arc::new(compute),
        }
    }

    pub fn font_traits(traits: FontTraits) -> Self {
        Self::FontTraits(traits)
    }
}

impl fmt::Debug for TextFormattingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { key, value } => f
                .debug_struct("Constant")
                .field("key", key)
                .field("value", value)
                .finish(),
            Self::Computed { key, .. } => f
                .debug_struct("Computed")
                .field("key", key)
                .finish_non_exhaustive(),
            Self::FontTraits(traits) => f.debug_tuple("FontTraits").field(traits).finish(),
        }
    }
}

/// A pattern with the formatting applied to each of its matches
#[derive(Debug, Clone)]
pub struct HighlightRule {
    pattern: Regex,
    formatting_rules: Vec<TextFormattingRule>,
}

impl HighlightRule {
    /// Compile `pattern` and attach an ordered list of formatting rules
    pub fn new(
        pattern: &str,
        formatting_rules: Vec<TextFormattingRule>,
    ) -> Result<Self, InvalidPatternError> {
        let pattern = Regex::new(pattern).map_err(|source| InvalidPatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            formatting_rules,
        })
    }

    /// Convenience for a single-directive rule
    pub fn with_rule(
        pattern: &str,
        formatting_rule: TextFormattingRule,
    ) -> Result<Self, InvalidPatternError> {
        Self::new(pattern, vec![formatting_rule])
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn formatting_rules(&self) -> &[TextFormattingRule] {
        &self.formatting_rules
    }
}
