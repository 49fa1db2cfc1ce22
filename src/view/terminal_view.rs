use log::debug;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;

use crate::models::chat_message::ChatMessage;
use crate::routes::events::UiEvent;
use crate::view::{ChatView, FormField, IndicatorId};

pub const HELP_TEXT: &str = "\
Type a message to search the web, or start it with a command:
  /email <task>        open the email form with a task
  /pdf <question>      ask the uploaded documents
  /search <query>      search the web

Form and panel commands:
  :to, :cc, :bcc <addresses>   comma separated recipients
  :task <text>  :tone <text>   email task and tone
  :compose  :send  :cancel     open, send or close the email form
  :upload <file> [file...]     upload PDF documents
  :ask <question>              ask the uploaded documents
  :find <query>                search the web from the search box
  :history [n]                 show recent searches, or rerun entry n
  :health                      check the backend
  :help  :quit";

/// What one line of terminal input turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalInput {
    /// Events to dispatch, in order, as one unit of work.
    Events(Vec<UiEvent>),
    Notice(String),
    Help,
    Quit,
}

/// Renders the chat page as lines on a terminal.
pub struct TerminalView<W: Write = Stdout> {
    out: RefCell<W>,
    fields: RefCell<HashMap<FormField, String>>,
    compose_visible: Cell<bool>,
    history: RefCell<Vec<String>>,
}

impl TerminalView<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        TerminalView {
            out: RefCell::new(out),
            fields: RefCell::new(HashMap::new()),
            compose_visible: Cell::new(false),
            history: RefCell::new(Vec::new()),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn print(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        // A closed stdout is not worth aborting a chat handler over.
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            debug!("Terminal write failed: {}", e);
        }
    }

    fn print_compose_form(&self) {
        let fields = self.fields.borrow();
        let value = |field: FormField| fields.get(&field).map(String::as_str).unwrap_or("");
        self.print(&format!(
            "┌ Email ─────────────\n│ To:   {}\n│ Cc:   {}\n│ Bcc:  {}\n│ Tone: {}\n│ Task: {}\n└ :send to send, :cancel to close",
            value(FormField::To),
            value(FormField::Cc),
            value(FormField::Bcc),
            value(FormField::Tone),
            value(FormField::Task),
        ));
    }

    /// Turns one line of input into events. Field-setting commands that imply an
    /// action (`:ask`, `:find`) produce the field change followed by the action.
    pub fn parse_line(&self, line: &str) -> TerminalInput {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return TerminalInput::Events(vec![UiEvent::Submit(line.to_string())]);
        };
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        let field_change = |field: FormField| UiEvent::FieldChanged(field, arg.to_string());
        let events = match name {
            "to" => vec![field_change(FormField::To)],
            "cc" => vec![field_change(FormField::Cc)],
            "bcc" => vec![field_change(FormField::Bcc)],
            "task" => vec![field_change(FormField::Task)],
            "tone" => vec![field_change(FormField::Tone)],
            "compose" => vec![UiEvent::OpenCompose],
            "send" => vec![UiEvent::SendEmail],
            "cancel" => vec![UiEvent::CancelEmail],
            "upload" => vec![UiEvent::UploadFiles(
                arg.split_whitespace().map(PathBuf::from).collect(),
            )],
            "ask" if arg.is_empty() => vec![UiEvent::AskQuestion],
            "ask" => vec![field_change(FormField::PdfQuestion), UiEvent::AskQuestion],
            "find" if arg.is_empty() => vec![UiEvent::WebSearch],
            "find" => vec![field_change(FormField::SearchQuery), UiEvent::WebSearch],
            "history" if arg.is_empty() => vec![UiEvent::ShowHistory],
            "history" => return self.history_selection(arg),
            "health" => vec![UiEvent::CheckHealth],
            "help" | "h" => return TerminalInput::Help,
            "quit" | "q" | "exit" => return TerminalInput::Quit,
            other => return TerminalInput::Notice(format!("Unknown command :{} (try :help)", other)),
        };
        TerminalInput::Events(events)
    }

    fn history_selection(&self, arg: &str) -> TerminalInput {
        let history = self.history.borrow();
        match arg.parse::<usize>() {
            Ok(n) if n >= 1 && n <= history.len() => {
                TerminalInput::Events(vec![UiEvent::HistorySelected(history[n - 1].clone())])
            }
            _ => TerminalInput::Notice(format!("No search history entry {}", arg)),
        }
    }

    pub fn notice(&self, text: &str) {
        self.print(text);
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn append_message(&self, message: ChatMessage) {
        self.print(&message.to_string());
    }

    fn show_typing_indicator(&self) -> IndicatorId {
        let id = IndicatorId::new();
        self.print("AI is typing…");
        id
    }

    fn remove_typing_indicator(&self, id: IndicatorId) {
        debug!("Typing indicator {} cleared", id);
    }

    fn field(&self, field: FormField) -> String {
        self.fields.borrow().get(&field).cloned().unwrap_or_default()
    }

    fn set_field(&self, field: FormField, value: &str) {
        self.fields.borrow_mut().insert(field, value.to_string());
        if self.compose_visible.get() && !value.is_empty() {
            self.print_compose_form();
        }
    }

    fn set_compose_visible(&self, visible: bool) {
        let was_visible = self.compose_visible.replace(visible);
        if visible {
            self.print_compose_form();
        } else if was_visible {
            self.print("Email form closed.");
        }
    }

    fn compose_visible(&self) -> bool {
        self.compose_visible.get()
    }

    fn set_question_panel_visible(&self, visible: bool) {
        if visible {
            self.print("Ask about your documents with :ask <question> or /pdf <question>.");
        }
    }

    fn show_uploaded_files(&self, names: &[String]) {
        self.print(&format!("📎 Uploaded: {}", names.join(", ")));
    }

    fn set_drag_over(&self, _active: bool) {}

    fn render_history(&self, entries: &[String]) {
        *self.history.borrow_mut() = entries.to_vec();
        if entries.is_empty() {
            return;
        }
        let lines: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(i, query)| format!("  {}. {}", i + 1, query))
            .collect();
        self.print(&format!("Recent searches (:history <n> to rerun):\n{}", lines.join("\n")));
    }
}
