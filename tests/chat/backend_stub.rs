use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use orchestrator_chat::handlers::chat_handler::ChatController;
use orchestrator_chat::services::orchestrator_service::HttpBackend;
use orchestrator_chat::services::storage_service::{KeyValueStore, MemoryStore};
use orchestrator_chat::view::memory_view::MemoryView;

/// A throwaway orchestration backend listening on a random loopback port.
pub struct StubBackend {
    pub base_url: String,
    handle: ServerHandle,
}

impl StubBackend {
    pub async fn start(routes: fn(&mut web::ServiceConfig)) -> StubBackend {
        let server = HttpServer::new(move || App::new().configure(routes))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind stub backend");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        StubBackend {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    pub fn controller(&self) -> ChatController<HttpBackend, MemoryView, MemoryStore> {
        self.controller_with_store(MemoryStore::new())
    }

    pub fn controller_with_store<S: KeyValueStore>(&self, store: S) -> ChatController<HttpBackend, MemoryView, S> {
        let backend = HttpBackend::from_address(&self.base_url).expect("stub url");
        ChatController::new(backend, MemoryView::new(), store)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// The happy path of every endpoint, shaped like the real backend's replies.
pub fn healthy_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/agent/search", web::post().to(agent_search))
        .route("/gmail/send", web::post().to(gmail_send))
        .route("/api/upload", web::post().to(upload))
        .route("/api/search", web::post().to(pdf_search))
        .route("/health", web::get().to(health));
}

/// Every endpoint fails the way the backend does when its collaborators are down.
pub fn failing_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/agent/search", web::post().to(not_json))
        .route("/gmail/send", web::post().to(gmail_invalid_recipient))
        .route("/api/search", web::post().to(pdf_search_error));
}

async fn agent_search(body: web::Json<Value>) -> HttpResponse {
    if body["max_results"] != json!(5) {
        return HttpResponse::UnprocessableEntity().json(json!({"detail": "max_results must be 5"}));
    }
    let query = body["query"].as_str().unwrap_or_default().to_string();
    if query == "list please" {
        return HttpResponse::Ok().json(json!({"success": true, "query": query, "results": ["first hit", "second hit"]}));
    }
    HttpResponse::Ok().json(json!({
        "success": true,
        "query": query,
        "result": "line one\nline two",
        "context": {}
    }))
}

async fn gmail_send(body: web::Json<Value>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "✅ Email sent successfully",
        "email_preview": {
            "to": body["to"],
            "cc": body["cc"],
            "subject": "Status update",
            "body": format!("Drafted from: {}", body["task"].as_str().unwrap_or_default())
        }
    }))
}

async fn gmail_invalid_recipient() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({"success": false, "detail": "Invalid recipient"}))
}

async fn upload(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let is_multipart = req
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);
    let body = String::from_utf8_lossy(&body);
    if !is_multipart || !body.contains("name=\"file\"") || !body.contains("filename=\"report.pdf\"") {
        return HttpResponse::BadRequest().json(json!({"detail": "expected multipart field 'file'"}));
    }
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Successfully uploaded and processed report.pdf",
        "filename": "report.pdf",
        "chunks_added": 3
    }))
}

async fn pdf_search(body: web::Json<Value>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "response": format!("Answer to: {}", body["question"].as_str().unwrap_or_default()),
        "context": "chunk text",
        "chunks_found": 5
    }))
}

async fn pdf_search_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({"detail": "Search error: vector store offline"}))
}

async fn not_json() -> HttpResponse {
    HttpResponse::BadGateway().content_type("text/html").body("<html>upstream exploded</html>")
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "Unified Project API",
        "gmail_agent_initialized": true,
        "gmail_init_error": null
    }))
}
