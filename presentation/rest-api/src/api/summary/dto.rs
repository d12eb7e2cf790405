use poem_openapi::{Enum, Object};

use business::domain::summary::errors::SummaryError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

#[derive(Debug, Clone, Object)]
pub struct SummarizeSectionsRequest {
    /// Paper Markdown, split on `#`, `##` and `###` headers
    pub markdown: String,
}

#[derive(Debug, Clone, Object)]
pub struct SummarizeFinalRequest {
    /// Concatenated per-section summaries
    pub section_summaries: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Enum)]
pub enum SummaryEventKind {
    #[oai(rename = "summary")]
    Summary,
    #[oai(rename = "error")]
    Error,
}

/// One server-sent event of a summary stream.
///
/// `summary` holds everything generated so far, not just the new tokens.
#[derive(Debug, Clone, Object)]
pub struct SummaryEventResponse {
    pub kind: SummaryEventKind,
    #[oai(skip_serializing_if_is_none)]
    pub summary: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub error: Option<ErrorResponse>,
}

impl From<Result<String, SummaryError>> for SummaryEventResponse {
    fn from(update: Result<String, SummaryError>) -> Self {
        match update {
            Ok(summary) => Self {
                kind: SummaryEventKind::Summary,
                summary: Some(summary),
                error: None,
            },
            Err(err) => Self {
                kind: SummaryEventKind::Error,
                summary: None,
                error: Some(err.into_error_response().1.0),
            },
        }
    }
}
