use std::sync::Arc;

use tracing::{info, warn};

use inkpage_shared::DocumentFile;

use crate::port::{UploadError, UploadResult, UploadService};

pub const ONLY_PDF_MESSAGE: &str = "Only PDF allowed";
pub const INVALID_FILE_TYPE: &str = "Invalid file type";
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";

/// Sends one document to the upload service: token first, then the file.
///
/// Never fails; every fault becomes an unsuccessful [`UploadResult`].
pub struct UploadPdfUseCase {
    service: Arc<dyn UploadService>,
}

impl UploadPdfUseCase {
    pub fn new(service: Arc<dyn UploadService>) -> Self {
        Self { service }
    }

    pub async fn execute(&self, file: &DocumentFile, identity: &str) -> UploadResult {
        if !file.is_pdf() {
            warn!(file = %file.name, media_type = %file.media_type, "rejected non-PDF upload");
            return UploadResult::failed(ONLY_PDF_MESSAGE, INVALID_FILE_TYPE);
        }

        match self.upload(file, identity).await {
            Ok(result) => {
                info!(
                    file = %file.name,
                    success = result.success,
                    file_id = ?result.file_id,
                    "upload finished"
                );
                result
            }
            Err(error) => {
                warn!(file = %file.name, %error, "upload failed");
                UploadResult::failed(UPLOAD_FAILED_MESSAGE, error.to_string())
            }
        }
    }

    async fn upload(&self, file: &DocumentFile, identity: &str) -> Result<UploadResult, UploadError> {
        let token = self.service.get_token(identity).await?;
        self.service.upload_pdf(file, &token).await
    }
}
