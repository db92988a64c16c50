pub mod config;
pub mod http;
pub mod port;
pub mod use_case;

pub use config::{guess_media_type, UploadConfig};
pub use http::HttpUploadService;
pub use port::{UploadError, UploadResult, UploadService, UNKNOWN_UPLOAD_ERROR};
pub use use_case::UploadPdfUseCase;
