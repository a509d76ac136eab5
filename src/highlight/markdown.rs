//! Default Markdown rule preset
//!
//! A pragmatic set of rules for styling Markdown source in place, not a
//! CommonMark parser. Inline emphasis patterns are approximations: the
//! regex engine has no backreferences or lookaround, so `*` and `_`
//! variants are separate rules and nested emphasis composes via font
//! traits rather than exact delimiter pairing.

use crate::style::{Color, FontTraits, StyleKey, StyleValue};

use super::rules::{HighlightRule, TextFormattingRule};

// Accent colors roughly matching a dark editor theme
const CODE_FOREGROUND: Color = Color::rgb(0xce, 0x91, 0x78);
const LINK_FOREGROUND: Color = Color::rgb(0x4f, 0xc1, 0xff);
const QUOTE_FOREGROUND: Color = Color::rgb(0x6a, 0x99, 0x55);
const MARKER_FOREGROUND: Color = Color::rgb(0x56, 0x9c, 0xd6);

/// Build one rule from a pattern known to be valid
fn rule(pattern: &str, directives: Vec<TextFormattingRule>) -> HighlightRule {
    HighlightRule::new(pattern, directives).expect("preset pattern is valid")
}

fn color(c: Color) -> TextFormattingRule {
    TextFormattingRule::value(StyleKey::Foreground, StyleValue::Color(c))
}

fn traits(t: FontTraits) -> TextFormattingRule {
    TextFormattingRule::font_traits(t)
}

/// The default Markdown highlight rules, in application order
pub fn markdown_rules() -> Vec<HighlightRule> {
    vec![
        // Fenced code blocks, then inline code on top
        rule(
            r"(?s)```.*?```",
            vec![traits(FontTraits::MONOSPACE), color(CODE_FOREGROUND)],
        ),
        rule(
            r"`[^`\n]+`",
            vec![traits(FontTraits::MONOSPACE), color(CODE_FOREGROUND)],
        ),
        // Headings: bold plus a little letter spacing
        rule(
            r"(?m)^#{1,6}\s.*$",
            vec![
                traits(FontTraits::BOLD),
                TextFormattingRule::value(StyleKey::Kern, StyleValue::Number(0.5)),
            ],
        ),
        // Links and images: color the whole construct, record the target
        rule(
            r"!?\[[^\[\]]*\]\([^\s\)]*\)",
            vec![
                color(LINK_FOREGROUND),
                TextFormattingRule::computed(StyleKey::Link, |matched, _| {
                    let target = matched
                        .rsplit_once('(')
                        .map(|(_, rest)| rest.trim_end_matches(')'))
                        .unwrap_or(matched);
                    StyleValue::Text(target.to_string())
                }),
            ],
        ),
        // Emphasis
        rule(r"\*\*[^\s*][^*\n]*\*\*", vec![traits(FontTraits::BOLD)]),
        rule(r"__[^\s_][^_\n]*__", vec![traits(FontTraits::BOLD)]),
        rule(r"\*[^\s*][^*\n]*\*", vec![traits(FontTraits::ITALIC)]),
        rule(r"_[^\s_][^_\n]*_", vec![traits(FontTraits::ITALIC)]),
        rule(
            r"~~[^\s~][^~\n]*~~",
            vec![TextFormattingRule::value(
                StyleKey::Strikethrough,
                StyleValue::Flag(true),
            )],
        ),
        // Block constructs
        rule(r"(?m)^\s*>\s.*$", vec![color(QUOTE_FOREGROUND)]),
        rule(r"(?m)^(-{3,}|\*{3,}|_{3,})\s*$", vec![color(MARKER_FOREGROUND)]),
        rule(r"(?m)^\s*[-*+]\s", vec![color(MARKER_FOREGROUND)]),
        rule(r"(?m)^\s*\d+\.\s", vec![color(MARKER_FOREGROUND)]),
    ]
}
