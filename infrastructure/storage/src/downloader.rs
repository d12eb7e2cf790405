use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;

use business::domain::paper::errors::PaperError;
use business::domain::paper::services::PdfDownloaderService;

/// Default upper bound for a downloaded paper.
pub const DEFAULT_MAX_PDF_BYTES: u64 = 200 * 1024 * 1024;

/// Fetches PDFs over HTTP(S).
///
/// Bodies larger than `max_bytes` are refused, whether or not the server
/// announces a `Content-Length`.
pub struct HttpPdfDownloader {
    client: Client,
    max_bytes: u64,
}

impl HttpPdfDownloader {
    pub fn new(timeout: Duration, max_bytes: u64) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("arxiv-researcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client, max_bytes }
    }
}

#[async_trait]
impl PdfDownloaderService for HttpPdfDownloader {
    async fn download(&self, url: &str) -> Result<Vec<u8>, PaperError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", url, e);
            PaperError::DownloadFailed
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Download of {} answered {}", url, status);
            return Err(PaperError::DownloadFailed);
        }

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes)
        {
            tracing::warn!("Download of {} exceeds {} bytes", url, self.max_bytes);
            return Err(PaperError::DownloadFailed);
        }

        let mut bytes = Vec::new();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| {
                tracing::warn!("Reading body of {} failed: {}", url, e);
                PaperError::DownloadFailed
            })?;
            if (bytes.len() + chunk.len()) as u64 > self.max_bytes {
                tracing::warn!("Download of {} exceeds {} bytes", url, self.max_bytes);
                return Err(PaperError::DownloadFailed);
            }
            bytes.extend_from_slice(&chunk);
        }

        tracing::info!("PDF downloaded successfully ({} bytes)", bytes.len());
        Ok(bytes)
    }
}
