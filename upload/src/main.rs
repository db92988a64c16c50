use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::info;

use inkpage_shared::DocumentFile;
use inkpage_upload::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use inkpage_upload::{guess_media_type, HttpUploadService, UploadConfig, UploadPdfUseCase};

/// Submit a PDF to the document upload service.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Document to upload.
    file: PathBuf,
    /// Identity the upload token is issued for.
    #[arg(long, env = "INKPAGE_EMAIL")]
    email: String,
    #[arg(long, env = "INKPAGE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Overrides the media type guessed from the file extension.
    #[arg(long)]
    media_type: Option<String>,
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("inkpage_upload=info".parse()?),
        )
        .init();

    let args = Args::parse();
    ensure!(!args.email.trim().is_empty(), "--email must not be empty");

    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    let media_type = args
        .media_type
        .clone()
        .unwrap_or_else(|| guess_media_type(&args.file).to_string());
    let file = DocumentFile::new(name, media_type, bytes);

    let config = UploadConfig::new(args.api_url).with_timeout(Duration::from_secs(args.timeout_secs));
    info!(api_url = %config.api_url, file = %file.name, "uploading");
    let service = HttpUploadService::new(&config)?;
    let use_case = UploadPdfUseCase::new(Arc::new(service));

    let result = use_case.execute(&file, args.email.trim()).await;
    if result.success {
        match &result.file_id {
            Some(file_id) => println!("{} (file id {file_id})", result.message),
            None => println!("{}", result.message),
        }
        Ok(())
    } else {
        eprintln!(
            "{}: {}",
            result.message,
            result.error.as_deref().unwrap_or_default()
        );
        std::process::exit(1);
    }
}
