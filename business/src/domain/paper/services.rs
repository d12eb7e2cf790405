use std::path::Path;

use async_trait::async_trait;

use super::errors::PaperError;

/// Service port for fetching a PDF over HTTP.
#[async_trait]
pub trait PdfDownloaderService: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>, PaperError>;
}

/// Service port for turning a PDF into Markdown.
///
/// Implementations write `<output_dir>/<pdf stem>.mmd` and return once the
/// file is complete.
#[async_trait]
pub trait OcrService: Send + Sync {
    async fn convert(&self, pdf: &Path, output_dir: &Path) -> Result<(), PaperError>;
}
