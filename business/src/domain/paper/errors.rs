#[derive(Debug, thiserror::Error)]
pub enum PaperError {
    #[error("paper.no_input")]
    NoInput,
    #[error("paper.invalid_link")]
    InvalidLink,
    #[error("paper.download_failed")]
    DownloadFailed,
    #[error("paper.invalid_pdf")]
    InvalidPdf,
    #[error("paper.ocr_failed")]
    OcrFailed,
    #[error("paper.ocr_timeout")]
    OcrTimeout,
    #[error("paper.markdown_missing")]
    MarkdownMissing,
    #[error("storage.failure")]
    Storage(#[from] crate::domain::errors::StorageError),
}
