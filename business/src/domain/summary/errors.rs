#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SummaryError {
    #[error("summary.nothing_to_summarize")]
    NothingToSummarize,
    #[error("summary.model_request_failed")]
    ModelRequestFailed,
    #[error("summary.model_rejected")]
    ModelRejected,
    #[error("summary.stream_interrupted")]
    StreamInterrupted,
}
