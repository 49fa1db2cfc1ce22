use async_trait::async_trait;
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{AGENT_SEARCH_PATH, HEALTH_PATH, PDF_SEARCH_PATH, SEND_EMAIL_PATH, UPLOAD_PATH};
use crate::error::ChatError;
use crate::models::document::{PdfAnswer, PdfQuestionRequest, UploadFile, UploadResponse};
use crate::models::email::{EmailRequest, EmailResponse};
use crate::models::health::HealthStatus;
use crate::models::web_search::{WebSearchRequest, WebSearchResponse};

/// The orchestration backend as seen by the chat controller.
///
/// Implementations return the parsed reply whatever the HTTP status was; deciding
/// whether a reply means success is the controller's job. `Err` is reserved for
/// transport failures (unreachable host, body that is not JSON).
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait OrchestratorBackend {
    async fn send_email(&self, request: &EmailRequest) -> Result<EmailResponse, ChatError>;
    async fn upload_documents(&self, files: &[UploadFile]) -> Result<UploadResponse, ChatError>;
    async fn ask_question(&self, request: &PdfQuestionRequest) -> Result<PdfAnswer, ChatError>;
    async fn web_search(&self, request: &WebSearchRequest) -> Result<WebSearchResponse, ChatError>;
    async fn health(&self) -> Result<HealthStatus, ChatError>;
}

/// reqwest client for the orchestration backend's HTTP API.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url) -> Self {
        HttpBackend {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_address(base_url: &str) -> Result<Self, ChatError> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ChatError> {
        Ok(self.base_url.join(path)?)
    }

    async fn post_json<T, R>(&self, path: &str, body: &T) -> Result<R, ChatError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        read_json(response).await
    }
}

async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ChatError> {
    let status = response.status();
    let url = response.url().clone();
    let bytes = response.bytes().await?;
    info!("{} answered {}", url.path(), status);
    serde_json::from_slice(&bytes)
        .map_err(|e| ChatError::Transport(format!("unreadable response from server ({}): {}", status, e)))
}

#[async_trait(?Send)]
impl OrchestratorBackend for HttpBackend {
    async fn send_email(&self, request: &EmailRequest) -> Result<EmailResponse, ChatError> {
        self.post_json(SEND_EMAIL_PATH, request).await
    }

    async fn upload_documents(&self, files: &[UploadFile]) -> Result<UploadResponse, ChatError> {
        let form = files.iter().fold(Form::new(), |form, file| {
            form.part("file", Part::bytes(file.bytes.clone()).file_name(file.name.clone()))
        });
        let url = self.endpoint(UPLOAD_PATH)?;
        debug!("POST {} ({} files)", url, files.len());
        let response = self.client.post(url).multipart(form).send().await?;
        read_json(response).await
    }

    async fn ask_question(&self, request: &PdfQuestionRequest) -> Result<PdfAnswer, ChatError> {
        self.post_json(PDF_SEARCH_PATH, request).await
    }

    async fn web_search(&self, request: &WebSearchRequest) -> Result<WebSearchResponse, ChatError> {
        self.post_json(AGENT_SEARCH_PATH, request).await
    }

    async fn health(&self) -> Result<HealthStatus, ChatError> {
        let url = self.endpoint(HEALTH_PATH)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }
}
