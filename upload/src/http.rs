use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use inkpage_shared::DocumentFile;

use crate::config::UploadConfig;
use crate::port::{UploadError, UploadResult, UploadService};
use crate::use_case::UPLOAD_FAILED_MESSAGE;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "PDF upload successful";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    file_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Upload service speaking the `/provide-token` + `/upload-pdf` HTTP API.
pub struct HttpUploadService {
    client: Client,
    api_url: String,
}

impl HttpUploadService {
    pub fn new(config: &UploadConfig) -> Result<Self, UploadError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    async fn send_pdf(&self, file: &DocumentFile, token: &str) -> Result<UploadResponse, UploadError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = Form::new().part("file", part);
        let response = self
            .client
            .post(format!("{}/upload-pdf", self.api_url))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Ok(ensure_success(response)?.json().await?)
    }
}

fn ensure_success(response: Response) -> Result<Response, UploadError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(UploadError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
    })
}

#[async_trait]
impl UploadService for HttpUploadService {
    async fn get_token(&self, identity: &str) -> Result<String, UploadError> {
        let response = self
            .client
            .post(format!("{}/provide-token", self.api_url))
            .query(&[("email", identity)])
            .send()
            .await?;
        let token: TokenResponse = ensure_success(response)?.json().await?;
        debug!(token_type = ?token.token_type, "token issued");
        Ok(token.access_token)
    }

    /// Transport and server faults come back as an unsuccessful result
    /// rather than an error.
    async fn upload_pdf(&self, file: &DocumentFile, token: &str) -> Result<UploadResult, UploadError> {
        match self.send_pdf(file, token).await {
            Ok(response) => {
                debug!(file_id = ?response.file_id, message = ?response.message, "upload accepted");
                Ok(UploadResult::succeeded(UPLOAD_SUCCESS_MESSAGE, response.file_id))
            }
            Err(error) => {
                warn!(file = %file.name, %error, "upload request failed");
                Ok(UploadResult::failed(UPLOAD_FAILED_MESSAGE, error.to_string()))
            }
        }
    }
}
