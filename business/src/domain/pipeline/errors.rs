use crate::domain::paper::errors::PaperError;
use crate::domain::summary::errors::SummaryError;

/// Failure of one pipeline stage. Displays as the stage's error code.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Paper(#[from] PaperError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
