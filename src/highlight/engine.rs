//! The highlight engine
//!
//! A pure, total function from (text, ordered rules, base style) to an
//! attributed buffer. No I/O, no shared state; the coordinator calls this
//! from its worker thread, hosts may also call it directly.

use crate::attributed::AttributedText;
use crate::style::{BaseStyle, StyleKey, StyleValue};

use super::rules::{HighlightRule, TextFormattingRule};

/// Highlight `text` with the given rules over a base style.
///
/// The full range is stamped with the base font and foreground first, then
/// each rule's leftmost non-overlapping matches refine sub-ranges in list
/// order. Later rules overwrite earlier ones per attribute key; within one
/// match, directives apply in sequence so a font-trait directive observes
/// font changes made by earlier directives of the same rule.
pub fn highlight(text: &str, rules: &[HighlightRule], base: &BaseStyle) -> AttributedText {
    let mut styled = AttributedText::new(text);
    if styled.is_empty() {
        return styled;
    }

    styled.add_attribute(
        0..text.len(),
        StyleKey::Font,
        StyleValue::Font(base.font.clone()),
    );
    styled.add_attribute(
        0..text.len(),
        StyleKey::Foreground,
        StyleValue::Color(base.foreground),
    );

    for rule in rules {
        // find_iter yields leftmost non-overlapping matches and always
        // advances past zero-length matches, so iteration is finite.
        for m in rule.pattern().find_iter(text) {
            let range = m.range();
            for directive in rule.formatting_rules() {
                match directive {
                    TextFormattingRule::FontTraits(traits) => {
                        if range.is_empty() {
                            continue;
                        }
                        let font = styled
                            .font_at(range.start)
                            .cloned()
                            .unwrap_or_else(|| base.font.clone())
                            .with_traits(*traits);
                        styled.add_attribute(
                            range.clone(),
                            StyleKey::Font,
                            StyleValue::Font(font),
                        );
                    }
                    TextFormattingRule::Constant { key, value } => {
                        styled.add_attribute(range.clone(), key.clone(), value.clone());
                    }
                    TextFormattingRule::Computed { key, compute } => {
                        let value = compute(m.as_str(), range.clone());
                        styled.add_attribute(range.clone(), key.clone(), value);
                    }
                }
            }
        }
    }

    styled
}
