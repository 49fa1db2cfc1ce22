use std::path::PathBuf;

use orchestrator_chat::handlers::chat_handler::ChatController;
use orchestrator_chat::models::chat_message::Sender;
use orchestrator_chat::routes::events::UiEvent;
use orchestrator_chat::services::orchestrator_service::HttpBackend;
use orchestrator_chat::services::storage_service::{FileStore, MemoryStore};
use orchestrator_chat::view::memory_view::MemoryView;
use orchestrator_chat::view::{ChatView, FormField};

use crate::backend_stub::{failing_routes, healthy_routes, StubBackend};

#[actix_web::test]
async fn test_search_result_lines_render_as_bullets() {
    let stub = StubBackend::start(healthy_routes).await;
    let chat = stub.controller();

    chat.dispatch(UiEvent::Submit("/search rust news".to_string())).await;

    let reply = chat.view().last_message().expect("a reply");
    assert_eq!(reply.sender, Sender::Ai);
    assert!(reply.text.contains("• line one\n• line two"), "got: {}", reply.text);
    assert!(!chat.view().has_typing_indicator());
    assert_eq!(chat.view().indicator_removals().len(), 1);
    assert_eq!(chat.view().history(), vec!["rust news"]);

    stub.stop().await;
}

#[actix_web::test]
async fn test_results_list_renders_numbered() {
    let stub = StubBackend::start(healthy_routes).await;
    let chat = stub.controller();
    chat.view().set_field(FormField::SearchQuery, "list please");

    chat.dispatch(UiEvent::WebSearch).await;

    assert_eq!(
        chat.view().messages_from(Sender::Ai),
        vec!["1. first hit\n2. second hit"]
    );
    stub.stop().await;
}

#[actix_web::test]
async fn test_email_rejection_shows_detail_and_keeps_form() {
    let stub = StubBackend::start(failing_routes).await;
    let chat = stub.controller();
    chat.dispatch(UiEvent::Submit("/email tell the team about the delay".to_string())).await;
    chat.dispatch(UiEvent::FieldChanged(FormField::To, "not-an-address".to_string())).await;

    chat.dispatch(UiEvent::SendEmail).await;

    let reply = chat.view().last_message().expect("a reply");
    assert!(reply.text.starts_with("❌"));
    assert!(reply.text.contains("Invalid recipient"));
    assert!(chat.view().compose_visible());
    assert_eq!(chat.view().field(FormField::Task), "tell the team about the delay");

    stub.stop().await;
}

#[actix_web::test]
async fn test_email_success_shows_preview() {
    let stub = StubBackend::start(healthy_routes).await;
    let chat = stub.controller();
    chat.dispatch(UiEvent::Submit("/email weekly status to the team".to_string())).await;
    chat.dispatch(UiEvent::FieldChanged(FormField::To, "team@example.com".to_string())).await;
    chat.dispatch(UiEvent::FieldChanged(FormField::Cc, "lead@example.com".to_string())).await;

    chat.dispatch(UiEvent::SendEmail).await;

    let reply = chat.view().last_message().expect("a reply");
    assert!(reply.text.starts_with("✅ Email sent successfully!"));
    assert!(reply.text.contains("team@example.com"));
    assert!(reply.text.contains("lead@example.com"));
    assert!(reply.text.contains("Drafted from: weekly status to the team"));
    assert!(!chat.view().compose_visible());

    stub.stop().await;
}

#[actix_web::test]
async fn test_upload_then_ask_question() {
    let stub = StubBackend::start(healthy_routes).await;
    let chat = stub.controller();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, b"%PDF-1.4 fake").unwrap();

    chat.dispatch(UiEvent::UploadFiles(vec![path])).await;
    assert_eq!(chat.view().uploaded_files(), vec!["report.pdf"]);
    assert!(chat.view().question_panel_visible());

    chat.dispatch(UiEvent::FieldChanged(FormField::PdfQuestion, "What is the total?".to_string())).await;
    chat.dispatch(UiEvent::AskQuestion).await;

    assert_eq!(
        chat.view().messages_from(Sender::User),
        vec!["📄 PDF question: What is the total?"]
    );
    assert_eq!(
        chat.view().messages_from(Sender::Ai),
        vec!["Answer to: What is the total?"]
    );
    assert_eq!(chat.view().field(FormField::PdfQuestion), "");

    stub.stop().await;
}

#[actix_web::test]
async fn test_pdf_error_detail_is_rendered() {
    let stub = StubBackend::start(failing_routes).await;
    let chat = stub.controller();

    chat.dispatch(UiEvent::Submit("/pdf anything in there?".to_string())).await;

    let reply = chat.view().last_message().expect("a reply");
    assert_eq!(reply.text, "❌ Error: Search error: vector store offline");
    stub.stop().await;
}

#[actix_web::test]
async fn test_non_json_reply_is_transport_error() {
    let stub = StubBackend::start(failing_routes).await;
    let chat = stub.controller();

    chat.dispatch(UiEvent::Submit("what happened upstream".to_string())).await;

    let reply = chat.view().last_message().expect("a reply");
    assert!(reply.text.starts_with("❌ Network error"), "got: {}", reply.text);
    assert!(!chat.view().has_typing_indicator());
    assert!(chat.view().history().is_empty());
    stub.stop().await;
}

#[actix_web::test]
async fn test_unreachable_backend_leaves_ui_usable() {
    let stub = StubBackend::start(healthy_routes).await;
    let base_url = stub.base_url.clone();
    stub.stop().await;

    let backend = HttpBackend::from_address(&base_url).unwrap();
    let chat = ChatController::new(backend, MemoryView::new(), MemoryStore::new());

    chat.dispatch(UiEvent::Submit("/search offline".to_string())).await;
    assert!(chat.view().last_message().unwrap().text.starts_with("❌ Network error"));
    assert!(!chat.view().has_typing_indicator());

    // The page keeps working for purely local actions.
    chat.dispatch(UiEvent::Submit("/email draft something".to_string())).await;
    assert!(chat.view().compose_visible());
}

#[actix_web::test]
async fn test_history_survives_reload() {
    let stub = StubBackend::start(healthy_routes).await;
    let dir = tempfile::tempdir().unwrap();
    let store_path: PathBuf = dir.path().join("storage.json");

    let chat = stub.controller_with_store(FileStore::open(&store_path).unwrap());
    for query in ["a", "b", "a", "c"] {
        chat.dispatch(UiEvent::Submit(format!("/search {}", query))).await;
    }
    assert_eq!(chat.view().history(), vec!["c", "a", "b"]);
    drop(chat);

    let reloaded = stub.controller_with_store(FileStore::open(&store_path).unwrap());
    reloaded.start().unwrap();
    assert_eq!(reloaded.view().history(), vec!["c", "a", "b"]);

    stub.stop().await;
}

#[actix_web::test]
async fn test_healthy_backend_adds_no_notice() {
    let stub = StubBackend::start(healthy_routes).await;
    let chat = stub.controller();

    chat.dispatch(UiEvent::CheckHealth).await;

    assert!(chat.view().messages().is_empty());
    stub.stop().await;
}
