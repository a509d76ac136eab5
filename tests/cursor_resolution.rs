//! Cursor resolution tests - substring anchors, explicit ranges, clamping

mod common;

use glint::{CursorChange, EditorContext};

// ========================================================================
// Substring anchors
// ========================================================================

#[test]
fn test_end_of_heading_marker() {
    let change = CursorChange::EndOf("## ".to_string());
    assert_eq!(change.resolve("## Title\nbody"), Some(3..3));
}

#[test]
fn test_start_of_substring() {
    let change = CursorChange::StartOf("Title".to_string());
    assert_eq!(change.resolve("## Title\nbody"), Some(3..3));
}

#[test]
fn test_missing_substring_leaves_selection_unchanged() {
    assert_eq!(CursorChange::EndOf("##".to_string()).resolve("plain"), None);
    assert_eq!(CursorChange::StartOf("##".to_string()).resolve("plain"), None);
}

#[test]
fn test_search_is_case_sensitive() {
    assert_eq!(
        CursorChange::StartOf("TITLE".to_string()).resolve("## Title"),
        None
    );
}

// ========================================================================
// Explicit ranges (clamping policy: inverted -> None, out of bounds -> clamp)
// ========================================================================

#[test]
fn test_in_bounds_range_is_returned() {
    let change = CursorChange::Range { start: 1, end: 3 };
    assert_eq!(change.resolve("hello"), Some(1..3));
}

#[test]
fn test_inverted_range_is_rejected() {
    let change = CursorChange::Range { start: 5, end: 2 };
    assert_eq!(change.resolve("hello"), None);
    assert_eq!(change.resolve(""), None);
}

#[test]
fn test_range_past_end_clamps_to_text_length() {
    let change = CursorChange::Range { start: 5, end: 7 };
    assert_eq!(change.resolve("abc"), Some(3..3));
}

#[test]
fn test_document_edges() {
    assert_eq!(CursorChange::Start.resolve("abc"), Some(0..0));
    assert_eq!(CursorChange::End.resolve("abc"), Some(3..3));
    assert_eq!(CursorChange::Start.resolve(""), Some(0..0));
    assert_eq!(CursorChange::End.resolve(""), Some(0..0));
}

// ========================================================================
// Through the context (consumed exactly once)
// ========================================================================

#[test]
fn test_context_resolves_against_current_text() {
    let mut context = EditorContext::new("", Vec::new());
    context.set_text("## Heading\ncontent");
    context.request_cursor_change(CursorChange::EndOf("## ".to_string()));

    assert_eq!(context.resolve_pending_cursor(), Some(3..3));
    // consumed: a second sync applies no selection change
    assert_eq!(context.resolve_pending_cursor(), None);
}

#[test]
fn test_context_miss_is_consumed_too() {
    let mut context = EditorContext::new("plain", Vec::new());
    context.request_cursor_change(CursorChange::StartOf("absent".to_string()));

    assert_eq!(context.resolve_pending_cursor(), None);
    assert!(context.take_pending_cursor_change().is_none());
}
