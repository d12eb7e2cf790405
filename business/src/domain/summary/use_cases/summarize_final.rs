use crate::domain::summary::model::SummaryStream;

pub struct SummarizeFinalParams {
    pub section_summaries: String,
}

/// Streams one summary of the whole paper built from its section summaries.
pub trait SummarizeFinalUseCase: Send + Sync {
    fn execute(&self, params: SummarizeFinalParams) -> SummaryStream;
}
