//! Pre/post transform pipeline
//!
//! Processors wrap the highlight pass: each can rewrite the raw text before
//! highlighting and the attributed result afterward. The coordinator folds
//! the registered list left to right; an empty list is the identity
//! pipeline. Processors are infallible by contract — one that can fail must
//! degrade to an identity pass-through itself.

use std::sync::Arc;

use crate::attributed::AttributedText;

/// A transform applied around the highlight pass
///
/// Both methods default to the identity, so a processor can implement only
/// the side it cares about.
pub trait TextProcessor: Send + Sync {
    /// Rewrite the raw text before highlighting
    fn pre_transform(&self, raw: String) -> String {
        raw
    }

    /// Rewrite the attributed result after highlighting
    fn post_transform(&self, highlighted: AttributedText) -> AttributedText {
        highlighted
    }
}

/// Fold all pre-transforms over the raw text, in list order
pub fn run_pre_transforms(processors: &[Arc<dyn TextProcessor>], raw: String) -> String {
    processors
        .iter()
        .fold(raw, |text, p| p.pre_transform(text))
}

/// Fold all post-transforms over the highlighted result, in list order
pub fn run_post_transforms(
    processors: &[Arc<dyn TextProcessor>],
    highlighted: AttributedText,
) -> AttributedText {
    processors
        .iter()
        .fold(highlighted, |styled, p| p.post_transform(styled))
}
