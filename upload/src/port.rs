use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use inkpage_shared::DocumentFile;

pub const UNKNOWN_UPLOAD_ERROR: &str = "Unknown error during upload.";

/// Terminal outcome of one upload attempt.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResult {
    pub fn succeeded(message: impl Into<String>, file_id: Option<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            file_id,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            file_id: None,
            error: Some(error.into()),
        }
    }
}

/// Faults raised by an upload collaborator. The `Display` text is what ends
/// up in [`UploadResult::error`].
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Message(String),
    /// A fault that carries no usable description.
    #[error("Unknown error during upload.")]
    Unknown,
}

/// Remote service that accepts finished documents.
#[async_trait]
pub trait UploadService: Send + Sync {
    async fn get_token(&self, identity: &str) -> Result<String, UploadError>;
    async fn upload_pdf(&self, file: &DocumentFile, token: &str) -> Result<UploadResult, UploadError>;
}
