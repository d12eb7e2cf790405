//! Server-sent event decoding for streamed chat completions.

use serde::Deserialize;

/// Upper bound for an incomplete line kept between chunks.
const MAX_LINE_BUFFER: usize = 1_000_000;

/// Splits a byte stream into `data:` payloads.
///
/// Bytes are buffered until a full line arrives, so multi-byte characters
/// and lines split across network chunks decode correctly.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

#[derive(Debug, PartialEq)]
pub struct BufferOverflow;

impl SseDecoder {
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<String>, BufferOverflow> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            if let Some(data) = line.strip_prefix("data:") {
                let data = data.strip_prefix(' ').unwrap_or(data);
                payloads.push(data.to_string());
            }
        }

        if self.buffer.len() > MAX_LINE_BUFFER {
            return Err(BufferOverflow);
        }
        Ok(payloads)
    }
}

/// Meaning of one `data:` payload.
#[derive(Debug, PartialEq)]
pub enum StreamPiece {
    Token(String),
    /// The model reported a finish reason.
    Finished,
    /// The `[DONE]` sentinel.
    Done,
    /// The API reported an error inside the stream.
    Error(String),
}

#[derive(Deserialize)]
struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<ChunkError>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChunkError {
    message: String,
}

/// Interprets a payload. Payloads that are not chat chunks yield nothing.
pub fn parse_payload(payload: &str) -> Vec<StreamPiece> {
    if payload.trim() == "[DONE]" {
        return vec![StreamPiece::Done];
    }

    let chunk: ChatChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            tracing::debug!("Skipping unparsable stream payload: {}", e);
            return Vec::new();
        }
    };

    if let Some(error) = chunk.error {
        return vec![StreamPiece::Error(error.message)];
    }

    let mut pieces = Vec::new();
    for choice in chunk.choices {
        if let Some(content) = choice.delta.content
            && !content.is_empty()
        {
            pieces.push(StreamPiece::Token(content));
        }
        if choice.finish_reason.is_some() {
            pieces.push(StreamPiece::Finished);
        }
    }
    pieces
}
