use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;

use orchestrator_chat::config::{self, Settings};
use orchestrator_chat::handlers::chat_handler::ChatController;
use orchestrator_chat::models::chat_message::ChatMessage;
use orchestrator_chat::routes::events::UiEvent;
use orchestrator_chat::services::orchestrator_service::HttpBackend;
use orchestrator_chat::services::storage_service::FileStore;
use orchestrator_chat::view::terminal_view::{TerminalInput, TerminalView, HELP_TEXT};
use orchestrator_chat::view::ChatView;

type TerminalController = ChatController<HttpBackend, TerminalView, FileStore>;

/// Every handler runs on this one thread; a slow request never blocks typing.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    config::init_logging();

    let settings = Settings::from_env().context("ORCHESTRATOR_URL is not a valid URL")?;
    info!("Using orchestration backend at {}", settings.backend_url);

    let store = FileStore::open(&settings.storage_path)
        .with_context(|| format!("opening {}", settings.storage_path.display()))?;
    let controller = Rc::new(ChatController::new(
        HttpBackend::new(settings.backend_url.clone()),
        TerminalView::stdout(),
        store,
    ));

    LocalSet::new().run_until(run(controller)).await
}

async fn run(controller: Rc<TerminalController>) -> anyhow::Result<()> {
    controller.view().notice(HELP_TEXT);
    if let Err(e) = controller.start() {
        warn!("Could not load search history: {}", e);
        controller.view().append_message(ChatMessage::ai(e.to_chat_text()));
    }
    spawn_events(&controller, vec![UiEvent::CheckHealth]);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match controller.view().parse_line(&line) {
            TerminalInput::Events(events) => spawn_events(&controller, events),
            TerminalInput::Notice(text) => controller.view().notice(&text),
            TerminalInput::Help => controller.view().notice(HELP_TEXT),
            TerminalInput::Quit => break,
        }
    }

    info!("Chat session closed");
    Ok(())
}

/// Events from one input line run in order; separate lines race freely.
fn spawn_events(controller: &Rc<TerminalController>, events: Vec<UiEvent>) {
    let controller = Rc::clone(controller);
    tokio::task::spawn_local(async move {
        for event in events {
            controller.dispatch(event).await;
        }
    });
}
