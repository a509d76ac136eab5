//! Attributed text buffer
//!
//! An `AttributedText` pairs a string with an ordered list of spans, each
//! carrying an attribute set. Spans partition the full text; stamping an
//! attribute onto a range splits spans at the range boundaries and merges
//! equal neighbours back together afterward.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::style::{Font, StyleKey, StyleValue};

/// Attribute set for one span, keyed deterministically
pub type AttributeSet = BTreeMap<StyleKey, StyleValue>;

/// A contiguous run of text sharing one attribute set
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// Byte range into the owning text (half-open, on char boundaries)
    pub range: Range<usize>,
    pub attributes: AttributeSet,
}

/// Text paired with per-range style attributes
///
/// Invariants: spans are sorted, non-empty, and exactly cover
/// `0..text.len()`. Empty text has no spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributedText {
    text: String,
    spans: Vec<Span>,
}

impl AttributedText {
    /// Create a buffer over `text` with a single unattributed span
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let spans = if text.is_empty() {
            Vec::new()
        } else {
            vec![Span {
                range: 0..text.len(),
                attributes: AttributeSet::new(),
            }]
        };
        Self { text, spans }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// All spans in order
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Attribute set covering the given byte offset
    pub fn attributes_at(&self, offset: usize) -> Option<&AttributeSet> {
        self.spans
            .iter()
            .find(|s| s.range.start <= offset && offset < s.range.end)
            .map(|s| &s.attributes)
    }

    /// Font attribute currently stamped at the given byte offset
    pub fn font_at(&self, offset: usize) -> Option<&Font> {
        self.attributes_at(offset)
            .and_then(|attrs| attrs.get(&StyleKey::Font))
            .and_then(StyleValue::as_font)
    }

    /// Stamp `key = value` over `range`, last write wins per key
    ///
    /// The range is clamped to the text length; an empty range is a no-op.
    pub fn add_attribute(&mut self, range: Range<usize>, key: StyleKey, value: StyleValue) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }

        self.split_at(range.start);
        self.split_at(range.end);

        for span in &mut self.spans {
            if span.range.start >= range.start && span.range.end <= range.end {
                span.attributes.insert(key.clone(), value.clone());
            }
        }

        self.coalesce();
    }

    /// Append another attributed buffer, keeping its span attributes
    pub fn append(&mut self, other: AttributedText) {
        if other.is_empty() {
            return;
        }
        let offset = self.text.len();
        self.text.push_str(&other.text);
        self.spans.extend(other.spans.into_iter().map(|s| Span {
            range: s.range.start + offset..s.range.end + offset,
            attributes: s.attributes,
        }));
        self.coalesce();
    }

    /// Append a plain text fragment carrying a fixed attribute set
    pub fn push_fragment(&mut self, fragment: &str, attributes: AttributeSet) {
        if fragment.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(fragment);
        self.spans.push(Span {
            range: start..self.text.len(),
            attributes,
        });
        self.coalesce();
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let start = self.floor_char_boundary(range.start.min(self.text.len()));
        let end = self.floor_char_boundary(range.end.min(self.text.len()));
        start..end.max(start)
    }

    fn floor_char_boundary(&self, mut pos: usize) -> usize {
        while pos > 0 && !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    /// Split the span containing `pos` so that `pos` becomes a span boundary
    fn split_at(&mut self, pos: usize) {
        let idx = match self
            .spans
            .iter()
            .position(|s| s.range.start < pos && pos < s.range.end)
        {
            Some(i) => i,
            None => return, // already a boundary (or out of range)
        };

        let span = &mut self.spans[idx];
        let tail = Span {
            range: pos..span.range.end,
            attributes: span.attributes.clone(),
        };
        span.range.end = pos;
        self.spans.insert(idx + 1, tail);
    }

    /// Merge adjacent spans with identical attribute sets
    fn coalesce(&mut self) {
        let mut i = 0;
        while i + 1 < self.spans.len() {
            if self.spans[i].range.end == self.spans[i + 1].range.start
                && self.spans[i].attributes == self.spans[i + 1].attributes
            {
                let end = self.spans[i + 1].range.end;
                self.spans[i].range.end = end;
                self.spans.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn fg(c: Color) -> StyleValue {
        StyleValue::Color(c)
    }

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn new_covers_full_range() {
        let buf = AttributedText::new("hello");
        assert_eq!(buf.spans().len(), 1);
        assert_eq!(buf.spans()[0].range, 0..5);
        assert!(buf.spans()[0].attributes.is_empty());
    }

    #[test]
    fn empty_text_has_no_spans() {
        let buf = AttributedText::new("");
        assert!(buf.spans().is_empty());
        assert!(buf.attributes_at(0).is_none());
    }

    #[test]
    fn add_attribute_splits_spans() {
        let mut buf = AttributedText::new("hello world");
        buf.add_attribute(0..5, StyleKey::Foreground, fg(RED));

        assert_eq!(buf.spans().len(), 2);
        assert_eq!(buf.spans()[0].range, 0..5);
        assert_eq!(
            buf.attributes_at(2).unwrap().get(&StyleKey::Foreground),
            Some(&fg(RED))
        );
        assert!(buf.attributes_at(7).unwrap().is_empty());
    }

    #[test]
    fn last_write_wins_per_key() {
        let mut buf = AttributedText::new("abcdef");
        buf.add_attribute(0..6, StyleKey::Foreground, fg(RED));
        buf.add_attribute(2..4, StyleKey::Foreground, fg(BLUE));

        assert_eq!(
            buf.attributes_at(0).unwrap().get(&StyleKey::Foreground),
            Some(&fg(RED))
        );
        assert_eq!(
            buf.attributes_at(3).unwrap().get(&StyleKey::Foreground),
            Some(&fg(BLUE))
        );
        assert_eq!(
            buf.attributes_at(5).unwrap().get(&StyleKey::Foreground),
            Some(&fg(RED))
        );
    }

    #[test]
    fn distinct_keys_do_not_clobber() {
        let mut buf = AttributedText::new("abcdef");
        buf.add_attribute(0..6, StyleKey::Foreground, fg(RED));
        buf.add_attribute(2..4, StyleKey::Background, fg(BLUE));

        let mid = buf.attributes_at(3).unwrap();
        assert_eq!(mid.get(&StyleKey::Foreground), Some(&fg(RED)));
        assert_eq!(mid.get(&StyleKey::Background), Some(&fg(BLUE)));
    }

    #[test]
    fn coalesce_rejoins_equal_neighbours() {
        let mut buf = AttributedText::new("abcdef");
        buf.add_attribute(0..3, StyleKey::Foreground, fg(RED));
        buf.add_attribute(3..6, StyleKey::Foreground, fg(RED));
        assert_eq!(buf.spans().len(), 1);
    }

    #[test]
    fn out_of_range_clamps() {
        let mut buf = AttributedText::new("abc");
        buf.add_attribute(1..100, StyleKey::Foreground, fg(RED));
        assert_eq!(buf.spans().len(), 2);
        assert_eq!(buf.spans()[1].range, 1..3);
    }

    #[test]
    fn empty_range_is_noop() {
        let mut buf = AttributedText::new("abc");
        buf.add_attribute(2..2, StyleKey::Foreground, fg(RED));
        assert_eq!(buf.spans().len(), 1);
        assert!(buf.spans()[0].attributes.is_empty());
    }

    #[test]
    fn append_shifts_spans() {
        let mut buf = AttributedText::new("ab");
        buf.add_attribute(0..2, StyleKey::Foreground, fg(RED));

        let mut suffix = AttributedText::new("cd");
        suffix.add_attribute(0..2, StyleKey::Foreground, fg(BLUE));
        buf.append(suffix);

        assert_eq!(buf.text(), "abcd");
        assert_eq!(
            buf.attributes_at(2).unwrap().get(&StyleKey::Foreground),
            Some(&fg(BLUE))
        );
    }

    #[test]
    fn clamp_respects_char_boundaries() {
        let mut buf = AttributedText::new("aé"); // 'é' is 2 bytes, starts at 1
        buf.add_attribute(0..2, StyleKey::Foreground, fg(RED));
        // 2 is inside 'é', so the stamp floors to the boundary at 1
        assert_eq!(buf.spans()[0].range, 0..1);
        assert_eq!(
            buf.attributes_at(0).unwrap().get(&StyleKey::Foreground),
            Some(&fg(RED))
        );
        assert!(buf.attributes_at(1).unwrap().is_empty());
    }
}
