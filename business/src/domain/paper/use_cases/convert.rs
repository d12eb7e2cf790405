use async_trait::async_trait;

use crate::domain::paper::errors::PaperError;
use crate::domain::paper::model::{ConvertedPaper, PaperSource};
use crate::domain::paper::progress::ProgressReporter;

pub struct ConvertPaperParams {
    pub source: PaperSource,
}

#[async_trait]
pub trait ConvertPaperUseCase: Send + Sync {
    async fn execute(
        &self,
        params: ConvertPaperParams,
        progress: &dyn ProgressReporter,
    ) -> Result<ConvertedPaper, PaperError>;
}
