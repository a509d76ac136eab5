//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use glint::processor::TextProcessor;
use glint::{
    AttributedText, Color, FontTraits, HighlightRule, StyleKey, StyleValue, TextFormattingRule,
};

/// A rule stamping a fixed foreground color on every match
pub fn color_rule(pattern: &str, color: Color) -> HighlightRule {
    HighlightRule::with_rule(
        pattern,
        TextFormattingRule::value(StyleKey::Foreground, StyleValue::Color(color)),
    )
    .expect("test pattern is valid")
}

/// A rule bolding every match
pub fn bold_rule(pattern: &str) -> HighlightRule {
    HighlightRule::with_rule(pattern, TextFormattingRule::font_traits(FontTraits::BOLD))
        .expect("test pattern is valid")
}

/// Collects the text of every published result, in publish order
pub fn recording_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn record_into(log: &Arc<Mutex<Vec<String>>>) -> impl Fn(&AttributedText) + Send + 'static {
    let log = Arc::clone(log);
    move |styled| log.lock().unwrap().push(styled.text().to_string())
}

/// Identity processor that sleeps in pre-transform, keeping a pass in
/// flight long enough for submissions to pile up
pub struct SlowIdentity(pub Duration);

impl TextProcessor for SlowIdentity {
    fn pre_transform(&self, raw: String) -> String {
        thread::sleep(self.0);
        raw
    }
}

/// Pre-transform that uppercases the raw text
pub struct Uppercase;

impl TextProcessor for Uppercase {
    fn pre_transform(&self, raw: String) -> String {
        raw.to_uppercase()
    }
}

/// Post-transform appending a fixed styled suffix span
pub struct StyledSuffix {
    pub suffix: &'static str,
    pub color: Color,
}

impl TextProcessor for StyledSuffix {
    fn post_transform(&self, mut highlighted: AttributedText) -> AttributedText {
        let mut attributes = glint::AttributeSet::new();
        attributes.insert(StyleKey::Foreground, StyleValue::Color(self.color));
        highlighted.push_fragment(self.suffix, attributes);
        highlighted
    }
}
