//! Cursor placement after programmatic text changes
//!
//! A collaborator replacing the editor's text attaches a `CursorChange`
//! describing where the selection should land. The view-sync step resolves
//! it against the new text exactly once and applies the resulting range to
//! the native selection; a miss means "leave the selection unchanged".

use std::ops::Range;

/// Where to place the cursor/selection after a programmatic replacement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CursorChange {
    /// Collapse to the start of the document
    Start,
    /// Collapse to the end of the document
    End,
    /// Collapse just after the first occurrence of a substring
    EndOf(String),
    /// Collapse just before the first occurrence of a substring
    StartOf(String),
    /// Explicit byte range (half-open). Clamped to the text on resolve.
    Range { start: usize, end: usize },
}

impl CursorChange {
    /// Resolve to a byte range within `text`, or `None` on a miss.
    ///
    /// Substring variants search for the first occurrence, case-sensitive.
    /// The explicit range variant returns `None` when `start > end` and is
    /// otherwise clamped to the text length on char boundaries — every
    /// caller-supplied range is validated here, at the boundary.
    pub fn resolve(&self, text: &str) -> Option<Range<usize>> {
        match self {
            CursorChange::Start => Some(0..0),
            CursorChange::End => Some(text.len()..text.len()),
            CursorChange::EndOf(substring) => {
                let start = text.find(substring.as_str())?;
                let end = start + substring.len();
                Some(end..end)
            }
            CursorChange::StartOf(substring) => {
                let start = text.find(substring.as_str())?;
                Some(start..start)
            }
            CursorChange::Range { start, end } => {
                if start > end {
                    return None;
                }
                let start = floor_char_boundary(text, (*start).min(text.len()));
                let end = floor_char_boundary(text, (*end).min(text.len()));
                Some(start..end.max(start))
            }
        }
    }
}

fn floor_char_boundary(text: &str, mut pos: usize) -> usize {
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
