use crate::domain::summary::model::SummaryStream;

pub struct SummarizeSectionsParams {
    pub markdown: String,
}

/// Streams a per-section summary of a Markdown paper.
pub trait SummarizeSectionsUseCase: Send + Sync {
    fn execute(&self, params: SummarizeSectionsParams) -> SummaryStream;
}
