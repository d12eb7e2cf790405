use crate::domain::paper::model::PaperSource;
use crate::domain::pipeline::model::PipelineStream;

pub struct RunPipelineParams {
    pub source: PaperSource,
}

/// Converts a paper, summarizes each section, then summarizes the whole.
/// Each stage starts only after the previous one succeeded.
pub trait RunPipelineUseCase: Send + Sync {
    fn execute(&self, params: RunPipelineParams) -> PipelineStream;
}
