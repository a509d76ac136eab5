//! Editor view-model
//!
//! `EditorContext` is the host-owned source of truth for one editor view:
//! raw text, highlight rules, transform processors, the pending cursor
//! change, editing focus, and layout telemetry reported by the view. GUI
//! bindings feed text-change and focus events in and consume the published
//! attributed text plus cursor instructions.

use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::attributed::AttributedText;
use crate::config::EditorConfig;
use crate::coordinator::HighlightCoordinator;
use crate::cursor::CursorChange;
use crate::highlight::HighlightRule;
use crate::processor::TextProcessor;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Host-owned state for one editor view
pub struct EditorContext {
    id: u64,
    /// Current raw text, the source of truth for the view
    text: String,
    coordinator: HighlightCoordinator,
    /// At most one outstanding cursor instruction, consumed exactly once
    pending_cursor_change: Option<CursorChange>,
    /// Focus requested by the host (e.g. programmatic focus)
    editing_requested: bool,
    /// Focus confirmed by the view binding
    editing_resolved: bool,
    line_count: usize,
    current_height: f32,
    current_size: (f32, f32),
    config: EditorConfig,
}

impl EditorContext {
    pub fn new(starting_text: impl Into<String>, rules: Vec<HighlightRule>) -> Self {
        Self::with_config(starting_text, rules, EditorConfig::default())
    }

    pub fn with_config(
        starting_text: impl Into<String>,
        rules: Vec<HighlightRule>,
        config: EditorConfig,
    ) -> Self {
        let text = starting_text.into();
        let coordinator = HighlightCoordinator::with_base_style(rules, config.base_style());
        let context = Self {
            id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
            text: text.clone(),
            coordinator,
            pending_cursor_change: None,
            editing_requested: false,
            editing_resolved: false,
            line_count: 1,
            current_height: 0.0,
            current_size: (0.0, 0.0),
            config,
        };
        context.coordinator.submit(text);
        context
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // === Text flow ===

    /// Programmatic text replacement; re-highlights through the pipeline
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.coordinator.submit(self.text.clone());
    }

    /// Programmatic replacement that publishes the text unstyled
    pub fn set_text_skipping_transforms(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.coordinator.submit_raw(self.text.clone());
    }

    /// Entry point for the view binding's text-change delegate
    pub fn text_did_change(&mut self, new_text: impl Into<String>) {
        self.text = new_text.into();
        tracing::trace!(context = self.id, len = self.text.len(), "text changed");
        self.coordinator.submit(self.text.clone());
    }

    /// Register for every published attributed result.
    ///
    /// Callbacks run on the coordinator's worker thread; the host marshals
    /// to its UI thread.
    pub fn on_styled_text<F>(&self, callback: F)
    where
        F: Fn(&AttributedText) + Send + Sync + 'static,
    {
        self.coordinator.on_styled_text(callback);
    }

    /// Most recently published attributed result
    pub fn latest_styled(&self) -> Option<AttributedText> {
        self.coordinator.latest_styled()
    }

    /// Run the pipeline synchronously over the current text.
    ///
    /// For hosts that need an immediate styled rendering, e.g. right after
    /// changing rules, without waiting for the worker.
    pub fn styled_snapshot(&self) -> AttributedText {
        self.coordinator.run_pipeline_now(self.text.clone())
    }

    /// Block until the coordinator has no in-flight or pending work
    pub fn wait_until_idle(&self, timeout: Duration) -> bool {
        self.coordinator.wait_until_idle(timeout)
    }

    // === Rules and processors ===

    /// Replace the highlight rules; effective on the next text submission
    pub fn set_rules(&self, rules: Vec<HighlightRule>) {
        self.coordinator.set_rules(rules);
    }

    pub fn insert_processor_at_front(&self, processor: Arc<dyn TextProcessor>) {
        self.coordinator.insert_processor_at_front(processor);
    }

    pub fn append_processor(&self, processor: Arc<dyn TextProcessor>) {
        self.coordinator.append_processor(processor);
    }

    pub fn remove_all_processors(&self) {
        self.coordinator.remove_all_processors();
    }

    // === Cursor instructions ===

    /// Attach a cursor instruction for the next view sync.
    ///
    /// Only one can be outstanding; a newer request replaces the old one.
    pub fn request_cursor_change(&mut self, change: CursorChange) {
        if self.pending_cursor_change.is_some() {
            tracing::debug!(context = self.id, "replacing outstanding cursor change");
        }
        self.pending_cursor_change = Some(change);
    }

    /// Take the outstanding cursor instruction, if any
    pub fn take_pending_cursor_change(&mut self) -> Option<CursorChange> {
        self.pending_cursor_change.take()
    }

    /// Consume the outstanding instruction and resolve it against the
    /// current text. `None` means "leave the selection unchanged" — either
    /// nothing was outstanding or the instruction missed.
    pub fn resolve_pending_cursor(&mut self) -> Option<Range<usize>> {
        let change = self.pending_cursor_change.take()?;
        let resolved = change.resolve(&self.text);
        if resolved.is_none() {
            tracing::debug!(context = self.id, ?change, "cursor change did not resolve");
        }
        resolved
    }

    // === Editing focus ===

    /// Host requests the view become (or stop being) first responder
    pub fn set_editing_active(&mut self, active: bool) {
        self.editing_requested = active;
    }

    /// Called by the view binding after it actually changed focus
    pub fn did_make_active(&mut self, active: bool) {
        self.editing_resolved = active;
    }

    /// Whether the view binding has confirmed focus
    pub fn is_editing(&self) -> bool {
        self.editing_resolved
    }

    /// Whether the host has requested focus
    pub fn is_editing_requested(&self) -> bool {
        self.editing_requested
    }

    // === Layout telemetry (reported by the view) ===

    pub fn set_line_count(&mut self, count: usize) {
        self.line_count = count;
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn height_did_change(&mut self, from: f32, to: f32) {
        tracing::trace!(context = self.id, from, to, "height changed");
        self.current_height = to;
    }

    pub fn current_height(&self) -> f32 {
        self.current_height
    }

    pub fn set_current_size(&mut self, width: f32, height: f32) {
        self.current_size = (width, height);
    }

    pub fn current_size(&self) -> (f32, f32) {
        self.current_size
    }
}

// Manual impl: the coordinator (worker handle, subscriber callbacks) has
// no useful Debug representation
impl fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorContext")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("line_count", &self.line_count)
            .field("editing_resolved", &self.editing_resolved)
            .finish_non_exhaustive()
    }
}

impl PartialEq for EditorContext {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EditorContext {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_get_distinct_ids() {
        let a = EditorContext::new("", Vec::new());
        let b = EditorContext::new("", Vec::new());
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn debug_shows_id_and_text() {
        let context = EditorContext::new("hello", Vec::new());
        let rendered = format!("{context:?}");
        assert!(rendered.contains("EditorContext"));
        assert!(rendered.contains("hello"));
    }

    #[test]
    fn cursor_change_consumed_exactly_once() {
        let mut context = EditorContext::new("## Title\nbody", Vec::new());
        context.request_cursor_change(CursorChange::EndOf("## ".to_string()));

        assert_eq!(context.resolve_pending_cursor(), Some(3..3));
        assert_eq!(context.resolve_pending_cursor(), None);
    }

    #[test]
    fn newer_cursor_change_replaces_older() {
        let mut context = EditorContext::new("hello", Vec::new());
        context.request_cursor_change(CursorChange::Start);
        context.request_cursor_change(CursorChange::End);
        assert_eq!(context.resolve_pending_cursor(), Some(5..5));
    }

    #[test]
    fn editing_flags_track_request_and_resolution() {
        let mut context = EditorContext::new("", Vec::new());
        context.set_editing_active(true);
        assert!(context.is_editing_requested());
        assert!(!context.is_editing());

        context.did_make_active(true);
        assert!(context.is_editing());
    }

    #[test]
    fn telemetry_is_stored() {
        let mut context = EditorContext::new("", Vec::new());
        context.set_line_count(4);
        context.height_did_change(0.0, 96.0);
        context.set_current_size(320.0, 96.0);

        assert_eq!(context.line_count(), 4);
        assert_eq!(context.current_height(), 96.0);
        assert_eq!(context.current_size(), (320.0, 96.0));
    }
}
