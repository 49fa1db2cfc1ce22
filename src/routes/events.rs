use log::{debug, error, info};
use std::path::PathBuf;

use crate::error::ChatError;
use crate::handlers::chat_handler::ChatController;
use crate::models::chat_message::ChatMessage;
use crate::services::orchestrator_service::OrchestratorBackend;
use crate::services::storage_service::KeyValueStore;
use crate::view::{ChatView, FormField};

/// Everything the page can ask the controller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Submit(String),
    FieldChanged(FormField, String),
    OpenCompose,
    SendEmail,
    CancelEmail,
    UploadFiles(Vec<PathBuf>),
    DragOver,
    DragLeave,
    Drop(Vec<PathBuf>),
    AskQuestion,
    WebSearch,
    HistorySelected(String),
    ShowHistory,
    CheckHealth,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Submit(_) => "submit",
            UiEvent::FieldChanged(..) => "field_changed",
            UiEvent::OpenCompose => "open_compose",
            UiEvent::SendEmail => "send_email",
            UiEvent::CancelEmail => "cancel_email",
            UiEvent::UploadFiles(_) => "upload_files",
            UiEvent::DragOver => "drag_over",
            UiEvent::DragLeave => "drag_leave",
            UiEvent::Drop(_) => "drop",
            UiEvent::AskQuestion => "ask_question",
            UiEvent::WebSearch => "web_search",
            UiEvent::HistorySelected(_) => "history_selected",
            UiEvent::ShowHistory => "show_history",
            UiEvent::CheckHealth => "check_health",
        }
    }
}

impl<B, V, S> ChatController<B, V, S>
where
    B: OrchestratorBackend,
    V: ChatView,
    S: KeyValueStore,
{
    /// Routes one event to its handler. A failing handler becomes exactly one
    /// chat message; nothing escapes this function.
    pub async fn dispatch(&self, event: UiEvent) {
        let name = event.name();
        debug!("Dispatching {}", name);

        let outcome = match event {
            UiEvent::Submit(text) => self.submit_message(&text).await,
            UiEvent::FieldChanged(field, value) => {
                self.view().set_field(field, &value);
                Ok(())
            }
            UiEvent::OpenCompose => {
                self.view().set_compose_visible(true);
                Ok(())
            }
            UiEvent::SendEmail => self.send_email().await,
            UiEvent::CancelEmail => {
                self.cancel_email();
                Ok(())
            }
            UiEvent::UploadFiles(paths) => self.upload_pdf(&paths).await,
            UiEvent::DragOver => {
                self.view().set_drag_over(true);
                Ok(())
            }
            UiEvent::DragLeave => {
                self.view().set_drag_over(false);
                Ok(())
            }
            UiEvent::Drop(paths) => {
                self.view().set_drag_over(false);
                self.upload_pdf(&paths).await
            }
            UiEvent::AskQuestion => self.ask_pdf_question(None).await,
            UiEvent::WebSearch => self.web_search(None).await,
            UiEvent::HistorySelected(query) => {
                self.view().set_field(FormField::SearchQuery, &query);
                self.web_search(None).await
            }
            UiEvent::ShowHistory => self.render_search_history(),
            UiEvent::CheckHealth => self.check_health().await,
        };

        if let Err(e) = outcome {
            match &e {
                ChatError::Validation(_) => info!("{} rejected: {}", name, e),
                _ => error!("{} failed: {:?}", name, e),
            }
            self.view().append_message(ChatMessage::ai(e.to_chat_text()));
        }
    }
}
