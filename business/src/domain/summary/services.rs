use async_trait::async_trait;

use super::errors::SummaryError;
use super::model::{ChatPrompt, TokenStream};

/// Service port for a streaming chat model.
///
/// The returned stream yields text pieces in arrival order. A request that
/// cannot be started fails before any stream is returned.
#[async_trait]
pub trait ChatModelService: Send + Sync {
    async fn stream(&self, prompt: ChatPrompt) -> Result<TokenStream, SummaryError>;
}
