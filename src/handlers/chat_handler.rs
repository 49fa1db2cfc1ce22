use log::{info, warn};
use std::path::PathBuf;

use crate::error::ChatError;
use crate::handlers::command::{parse_command, Command};
use crate::models::chat_message::ChatMessage;
use crate::models::document::{PdfQuestionRequest, UploadFile};
use crate::models::email::{parse_recipients, EmailRequest};
use crate::models::search_history::SearchHistory;
use crate::models::web_search::WebSearchRequest;
use crate::services::format_service::format_search_results;
use crate::services::orchestrator_service::OrchestratorBackend;
use crate::services::storage_service::KeyValueStore;
use crate::view::{ChatView, FormField};

const COMPOSE_FIELDS: [FormField; 5] = [
    FormField::To,
    FormField::Cc,
    FormField::Bcc,
    FormField::Task,
    FormField::Tone,
];

/// Drives one chat page: reads its fields, talks to the backend, writes bubbles back.
pub struct ChatController<B, V, S> {
    backend: B,
    view: V,
    store: S,
}

impl<B, V, S> ChatController<B, V, S>
where
    B: OrchestratorBackend,
    V: ChatView,
    S: KeyValueStore,
{
    pub fn new(backend: B, view: V, store: S) -> Self {
        ChatController { backend, view, store }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Draws whatever history survived from the previous session.
    pub fn start(&self) -> Result<(), ChatError> {
        self.render_search_history()
    }

    pub async fn submit_message(&self, text: &str) -> Result<(), ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        self.view.append_message(ChatMessage::user(text));

        match parse_command(text) {
            Command::Email(task) => {
                self.view.set_field(FormField::Task, task);
                self.view.set_compose_visible(true);
                Ok(())
            }
            Command::Pdf(question) => self.ask_pdf_question(Some(question)).await,
            Command::Search(query) => self.web_search(Some(query)).await,
            Command::Fallback(text) => {
                info!("No command given; treating message as a web search");
                self.web_search(Some(text)).await
            }
        }
    }

    pub async fn send_email(&self) -> Result<(), ChatError> {
        let to = parse_recipients(&self.view.field(FormField::To));
        let task = self.view.field(FormField::Task).trim().to_string();

        let mut missing = Vec::new();
        if to.is_empty() {
            missing.push("recipient");
        }
        if task.is_empty() {
            missing.push("task description");
        }
        if !missing.is_empty() {
            return Err(ChatError::Validation(format!(
                "Please fill in the missing email fields: {}.",
                missing.join(", ")
            )));
        }

        let request = EmailRequest {
            task,
            to,
            tone: self.view.field(FormField::Tone).trim().to_string(),
            cc: parse_recipients(&self.view.field(FormField::Cc)),
            bcc: parse_recipients(&self.view.field(FormField::Bcc)),
        };
        info!("Sending email request to {:?}", request.to);

        let response = self.backend.send_email(&request).await?;
        if !response.success {
            return Err(ChatError::Application(response.failure_reason()));
        }

        self.view.append_message(ChatMessage::ai(format!(
            "✅ Email sent successfully!\n\nPreview:\n{}",
            response.preview_text()
        )));
        self.close_compose_form();
        Ok(())
    }

    pub fn cancel_email(&self) {
        self.view.set_compose_visible(false);
    }

    fn close_compose_form(&self) {
        for field in COMPOSE_FIELDS {
            self.view.set_field(field, "");
        }
        self.view.set_compose_visible(false);
    }

    /// Uploads every file in one multipart request. No type or size checks.
    pub async fn upload_pdf(&self, paths: &[PathBuf]) -> Result<(), ChatError> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(UploadFile::from_path(path).await?);
        }
        let names: Vec<String> = files.iter().map(|file| file.name.clone()).collect();
        info!("Uploading {} document(s): {:?}", files.len(), names);

        let response = self.backend.upload_documents(&files).await?;
        if !response.success {
            return Err(ChatError::Application(response.failure_reason()));
        }
        if let Some(chunks) = response.chunks_added {
            info!("Backend indexed {} chunks from {:?}", chunks, response.filename);
        }

        self.view.show_uploaded_files(&names);
        self.view.set_question_panel_visible(true);
        Ok(())
    }

    /// `None` reads the question field, echoes it and clears it; an explicit
    /// question came from a chat line that is already in the transcript.
    pub async fn ask_pdf_question(&self, question: Option<&str>) -> Result<(), ChatError> {
        let question = match question {
            Some(question) => question.trim().to_string(),
            None => {
                let question = self.view.field(FormField::PdfQuestion).trim().to_string();
                if !question.is_empty() {
                    self.view
                        .append_message(ChatMessage::user(format!("📄 PDF question: {}", question)));
                    self.view.set_field(FormField::PdfQuestion, "");
                }
                question
            }
        };
        if question.is_empty() {
            return Ok(());
        }

        let answer = self.backend.ask_question(&PdfQuestionRequest::new(question)).await?;
        match answer.response {
            Some(text) => {
                self.view.append_message(ChatMessage::ai(text));
                Ok(())
            }
            None => Err(ChatError::Application(answer.failure_reason())),
        }
    }

    /// `None` reads the search field, echoes it and clears it; an explicit query
    /// came from a chat line that is already in the transcript.
    pub async fn web_search(&self, query: Option<&str>) -> Result<(), ChatError> {
        let query = match query {
            Some(query) => query.trim().to_string(),
            None => {
                let query = self.view.field(FormField::SearchQuery).trim().to_string();
                if !query.is_empty() {
                    self.view
                        .append_message(ChatMessage::user(format!("🔍 Web search: {}", query)));
                    self.view.set_field(FormField::SearchQuery, "");
                }
                query
            }
        };
        if query.is_empty() {
            return Ok(());
        }

        let indicator = self.view.show_typing_indicator();
        let outcome = self.backend.web_search(&WebSearchRequest::new(query.clone())).await;
        self.view.remove_typing_indicator(indicator);

        let response = outcome?;
        if !response.success {
            return Err(ChatError::Application(response.failure_reason()));
        }

        let formatted = match response.payload() {
            Some(payload) => format_search_results(&payload),
            None => "No results found.".to_string(),
        };
        self.view.append_message(ChatMessage::ai(formatted));
        self.record_search_history(&query)
    }

    pub fn record_search_history(&self, query: &str) -> Result<(), ChatError> {
        let mut history = SearchHistory::load(&self.store)?;
        history.record(query);
        history.save(&self.store)?;
        self.view.render_history(history.entries());
        Ok(())
    }

    pub fn render_search_history(&self) -> Result<(), ChatError> {
        let history = SearchHistory::load(&self.store)?;
        self.view.render_history(history.entries());
        Ok(())
    }

    pub async fn check_health(&self) -> Result<(), ChatError> {
        let status = self.backend.health().await?;
        info!(
            "Backend {} reports status {:?}",
            status.service.as_deref().unwrap_or("(unnamed)"),
            status.status
        );

        if !status.is_healthy() {
            warn!("Backend is not healthy: {:?}", status);
            self.view.append_message(ChatMessage::ai(format!(
                "⚠️ Backend reports status \"{}\"",
                status.status
            )));
        }
        if status.email_unavailable() {
            let reason = status
                .gmail_init_error
                .unwrap_or_else(|| "check the backend configuration".to_string());
            self.view.append_message(ChatMessage::ai(format!(
                "⚠️ Email sending is unavailable: {}",
                reason
            )));
        }
        Ok(())
    }
}
