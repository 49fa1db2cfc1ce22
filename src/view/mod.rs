//! The page the controller draws on.
//!
//! Every method takes `&self`: the controller shares one view between handlers
//! that interleave on a single thread, so adapters keep their state in `RefCell`s.

pub mod memory_view;
pub mod terminal_view;

use std::fmt;
use uuid::Uuid;

use crate::models::chat_message::ChatMessage;

/// Handle of a typing indicator placed in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndicatorId(Uuid);

impl IndicatorId {
    pub fn new() -> Self {
        IndicatorId(Uuid::new_v4())
    }
}

impl Default for IndicatorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "typing-{}", self.0)
    }
}

/// Input fields of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    To,
    Cc,
    Bcc,
    Task,
    Tone,
    SearchQuery,
    PdfQuestion,
}

pub trait ChatView {
    fn append_message(&self, message: ChatMessage);

    fn show_typing_indicator(&self) -> IndicatorId;
    fn remove_typing_indicator(&self, id: IndicatorId);

    fn field(&self, field: FormField) -> String;
    fn set_field(&self, field: FormField, value: &str);

    fn set_compose_visible(&self, visible: bool);
    fn compose_visible(&self) -> bool;

    fn set_question_panel_visible(&self, visible: bool);
    fn show_uploaded_files(&self, names: &[String]);
    fn set_drag_over(&self, active: bool);

    /// Replaces the rendered history list; entries are most recent first.
    fn render_history(&self, entries: &[String]);
}
