use poem_openapi::{Enum, Object};

use business::domain::pipeline::model::PipelineEvent;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

#[derive(Debug, Clone, Object)]
pub struct RunPipelineRequest {
    /// Link to a PDF. arXiv abstract pages are rewritten to their PDF link.
    pub pdf_link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Enum)]
pub enum PipelineEventKind {
    #[oai(rename = "progress")]
    Progress,
    #[oai(rename = "markdown")]
    Markdown,
    #[oai(rename = "section_summary")]
    SectionSummary,
    #[oai(rename = "final_summary")]
    FinalSummary,
    #[oai(rename = "failed")]
    Failed,
}

/// One server-sent event of a pipeline run.
///
/// Only the fields relevant to `kind` are present. Summary texts are
/// cumulative. `failed` is always the last event.
#[derive(Debug, Clone, Object)]
pub struct PipelineEventResponse {
    pub kind: PipelineEventKind,
    #[oai(skip_serializing_if_is_none)]
    pub fraction: Option<f64>,
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub paper_id: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub text: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub error: Option<ErrorResponse>,
}

impl PipelineEventResponse {
    fn new(kind: PipelineEventKind) -> Self {
        Self {
            kind,
            fraction: None,
            description: None,
            paper_id: None,
            text: None,
            error: None,
        }
    }

    fn with_text(kind: PipelineEventKind, text: String) -> Self {
        Self {
            text: Some(text),
            ..Self::new(kind)
        }
    }
}

impl From<PipelineEvent> for PipelineEventResponse {
    fn from(event: PipelineEvent) -> Self {
        match event {
            PipelineEvent::Progress {
                fraction,
                description,
            } => Self {
                fraction: Some(fraction),
                description: Some(description),
                ..Self::new(PipelineEventKind::Progress)
            },
            PipelineEvent::Markdown { paper_id, markdown } => Self {
                paper_id: Some(paper_id.to_string()),
                ..Self::with_text(PipelineEventKind::Markdown, markdown)
            },
            PipelineEvent::SectionSummary(text) => {
                Self::with_text(PipelineEventKind::SectionSummary, text)
            }
            PipelineEvent::FinalSummary(text) => {
                Self::with_text(PipelineEventKind::FinalSummary, text)
            }
            PipelineEvent::Failed(err) => Self {
                error: Some(err.into_error_response().1.0),
                ..Self::new(PipelineEventKind::Failed)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::paper::errors::PaperError;
    use business::domain::paper::model::PaperId;

    #[test]
    fn should_carry_progress_fields_only() {
        let response = PipelineEventResponse::from(PipelineEvent::Progress {
            fraction: 0.3,
            description: "Running Nougat OCR".to_string(),
        });

        assert_eq!(response.kind, PipelineEventKind::Progress);
        assert_eq!(response.fraction, Some(0.3));
        assert!(response.text.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn should_expose_paper_id_with_markdown() {
        let response = PipelineEventResponse::from(PipelineEvent::Markdown {
            paper_id: PaperId::new("downloaded_paper_1"),
            markdown: "# Title".to_string(),
        });

        assert_eq!(response.paper_id.as_deref(), Some("downloaded_paper_1"));
        assert_eq!(response.text.as_deref(), Some("# Title"));
    }

    #[test]
    fn should_map_failure_to_error_code() {
        let response =
            PipelineEventResponse::from(PipelineEvent::Failed(PaperError::OcrFailed.into()));

        assert_eq!(response.kind, PipelineEventKind::Failed);
        assert_eq!(
            response.error,
            Some(ErrorResponse::new("OcrError", "paper.ocr_failed"))
        );
    }
}
