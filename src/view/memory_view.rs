use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::models::chat_message::{ChatMessage, Sender};
use crate::view::{ChatView, FormField, IndicatorId};

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    Message(ChatMessage),
    Typing(IndicatorId),
}

/// A view that only remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct MemoryView {
    transcript: RefCell<Vec<TranscriptEntry>>,
    fields: RefCell<HashMap<FormField, String>>,
    compose_visible: Cell<bool>,
    question_panel_visible: Cell<bool>,
    drag_over: Cell<bool>,
    uploaded_files: RefCell<Vec<String>>,
    history: RefCell<Vec<String>>,
    indicator_removals: RefCell<Vec<IndicatorId>>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.borrow().clone()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.transcript
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                TranscriptEntry::Message(message) => Some(message.clone()),
                TranscriptEntry::Typing(_) => None,
            })
            .collect()
    }

    pub fn messages_from(&self, sender: Sender) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|message| message.sender == sender)
            .map(|message| message.text)
            .collect()
    }

    pub fn last_message(&self) -> Option<ChatMessage> {
        self.messages().pop()
    }

    pub fn has_typing_indicator(&self) -> bool {
        self.transcript
            .borrow()
            .iter()
            .any(|entry| matches!(entry, TranscriptEntry::Typing(_)))
    }

    /// Every removal ever requested, in order, including ones for unknown ids.
    pub fn indicator_removals(&self) -> Vec<IndicatorId> {
        self.indicator_removals.borrow().clone()
    }

    pub fn question_panel_visible(&self) -> bool {
        self.question_panel_visible.get()
    }

    pub fn drag_over(&self) -> bool {
        self.drag_over.get()
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        self.uploaded_files.borrow().clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl ChatView for MemoryView {
    fn append_message(&self, message: ChatMessage) {
        self.transcript.borrow_mut().push(TranscriptEntry::Message(message));
    }

    fn show_typing_indicator(&self) -> IndicatorId {
        let id = IndicatorId::new();
        self.transcript.borrow_mut().push(TranscriptEntry::Typing(id));
        id
    }

    fn remove_typing_indicator(&self, id: IndicatorId) {
        self.indicator_removals.borrow_mut().push(id);
        self.transcript
            .borrow_mut()
            .retain(|entry| *entry != TranscriptEntry::Typing(id));
    }

    fn field(&self, field: FormField) -> String {
        self.fields.borrow().get(&field).cloned().unwrap_or_default()
    }

    fn set_field(&self, field: FormField, value: &str) {
        self.fields.borrow_mut().insert(field, value.to_string());
    }

    fn set_compose_visible(&self, visible: bool) {
        self.compose_visible.set(visible);
    }

    fn compose_visible(&self) -> bool {
        self.compose_visible.get()
    }

    fn set_question_panel_visible(&self, visible: bool) {
        self.question_panel_visible.set(visible);
    }

    fn show_uploaded_files(&self, names: &[String]) {
        *self.uploaded_files.borrow_mut() = names.to_vec();
    }

    fn set_drag_over(&self, active: bool) {
        self.drag_over.set(active);
    }

    fn render_history(&self, entries: &[String]) {
        *self.history.borrow_mut() = entries.to_vec();
    }
}
