use poem_openapi::{Multipart, Object, types::multipart::Upload};

use business::domain::paper::model::{ConvertedPaper, PaperSource};

#[derive(Debug, Clone, Object)]
pub struct ConvertPaperRequest {
    /// Link to a PDF. arXiv abstract pages are rewritten to their PDF link.
    pub pdf_link: String,
}

impl From<ConvertPaperRequest> for PaperSource {
    fn from(request: ConvertPaperRequest) -> Self {
        PaperSource::Link(request.pdf_link)
    }
}

/// Multipart form carrying a PDF file.
#[derive(Multipart)]
pub struct UploadPaperRequest {
    pub file: Upload,
}

impl UploadPaperRequest {
    /// Reads the uploaded file into memory. `None` when the body cannot be read.
    pub async fn into_source(self) -> Option<PaperSource> {
        let file_name = self.file.file_name().map(str::to_string);
        let bytes = self.file.into_vec().await.ok()?;
        Some(PaperSource::Upload { file_name, bytes })
    }
}

#[derive(Debug, Clone, Object)]
pub struct ConvertedPaperResponse {
    /// Workspace id of the paper, also the stem of its PDF and Markdown files
    pub paper_id: String,
    /// Nougat Markdown with `$`/`$$` math delimiters
    pub markdown: String,
}

impl From<ConvertedPaper> for ConvertedPaperResponse {
    fn from(paper: ConvertedPaper) -> Self {
        Self {
            paper_id: paper.id.to_string(),
            markdown: paper.markdown,
        }
    }
}
