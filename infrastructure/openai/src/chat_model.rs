use std::collections::VecDeque;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde_json::json;

use business::domain::summary::errors::SummaryError;
use business::domain::summary::model::{ChatPrompt, TokenStream};
use business::domain::summary::services::ChatModelService;

use crate::client::OpenAIClient;
use crate::sse::{SseDecoder, StreamPiece, parse_payload};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-16k";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Error bodies are cut to this many bytes before logging.
const ERROR_BODY_LOG_LIMIT: usize = 500;

/// Chat model backed by the streaming chat completions endpoint.
pub struct OpenAIChatModel {
    client: OpenAIClient,
    model: String,
    temperature: f32,
}

impl OpenAIChatModel {
    pub fn new(client: OpenAIClient, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }

    fn request_body(&self, prompt: &ChatPrompt) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt.user},
            ],
            "temperature": self.temperature,
            "stream": true,
        })
    }
}

#[async_trait]
impl ChatModelService for OpenAIChatModel {
    async fn stream(&self, prompt: ChatPrompt) -> Result<TokenStream, SummaryError> {
        let response = self
            .client
            .client
            .post(self.client.chat_completions_url())
            .header("Content-Type", "application/json")
            .header("Authorization", self.client.auth_header())
            .json(&self.request_body(&prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Chat completion request failed: {}", e);
                SummaryError::ModelRequestFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let cut = body
                .char_indices()
                .nth(ERROR_BODY_LOG_LIMIT)
                .map(|(i, _)| i)
                .unwrap_or(body.len());
            tracing::warn!("Chat completion rejected with {}: {}", status, &body[..cut]);
            return Err(SummaryError::ModelRejected);
        }

        Ok(token_stream(response.bytes_stream()))
    }
}

struct DecodeState {
    chunks: BoxStream<'static, Result<Vec<u8>, String>>,
    decoder: SseDecoder,
    pending: VecDeque<Result<String, SummaryError>>,
    completed: bool,
    finished: bool,
}

impl DecodeState {
    fn absorb(&mut self, payload: &str) {
        for piece in parse_payload(payload) {
            match piece {
                StreamPiece::Token(token) => self.pending.push_back(Ok(token)),
                StreamPiece::Finished => self.completed = true,
                StreamPiece::Done => {
                    self.completed = true;
                    self.finished = true;
                }
                StreamPiece::Error(message) => {
                    tracing::warn!("Chat completion stream reported: {}", message);
                    self.pending.push_back(Err(SummaryError::ModelRejected));
                    self.finished = true;
                }
            }
            if self.finished {
                return;
            }
        }
    }
}

/// Decodes a raw SSE body into text pieces.
///
/// Ends at `[DONE]`. A body that stops before the model reported a finish
/// reason ends with `StreamInterrupted`.
pub fn token_stream<S, B, E>(chunks: S) -> TokenStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let state = DecodeState {
        chunks: chunks
            .map(|chunk| chunk.map(|b| b.as_ref().to_vec()).map_err(|e| e.to_string()))
            .boxed(),
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        completed: false,
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.chunks.next().await {
                Some(Ok(bytes)) => match state.decoder.feed(&bytes) {
                    Ok(payloads) => {
                        for payload in payloads {
                            state.absorb(&payload);
                            if state.finished {
                                break;
                            }
                        }
                    }
                    Err(_) => {
                        tracing::warn!("Chat completion stream line exceeded buffer limit");
                        state.pending.push_back(Err(SummaryError::StreamInterrupted));
                        state.finished = true;
                    }
                },
                Some(Err(e)) => {
                    tracing::warn!("Chat completion stream broke: {}", e);
                    state.pending.push_back(Err(SummaryError::StreamInterrupted));
                    state.finished = true;
                }
                None => {
                    if !state.completed {
                        tracing::warn!("Chat completion stream ended early");
                        state.pending.push_back(Err(SummaryError::StreamInterrupted));
                    }
                    state.finished = true;
                }
            }
        }
    })
    .boxed()
}
