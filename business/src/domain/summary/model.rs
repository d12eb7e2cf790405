use futures::stream::{self, BoxStream, StreamExt};

use super::errors::SummaryError;

/// Markdown header depth recognised by the splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    pub fn marker(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "#",
            HeadingLevel::H2 => "##",
            HeadingLevel::H3 => "###",
        }
    }

    /// Metadata key used when headers are handed to the model.
    pub fn key(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "Header 1",
            HeadingLevel::H2 => "Header 2",
            HeadingLevel::H3 => "Header 3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: HeadingLevel,
    pub title: String,
}

/// A run of Markdown content together with the headers it sits under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Open headers, shallowest first.
    pub headers: Vec<Heading>,
    pub content: String,
}

impl Section {
    /// Markdown line re-introducing the deepest header, or an empty string
    /// for content that precedes every header.
    pub fn heading_line(&self) -> String {
        match self.headers.last() {
            Some(heading) => format!("\n{} {}\n", heading.level.marker(), heading.title),
            None => String::new(),
        }
    }

    /// Headers as a JSON object, e.g. `{"Header 1": "Intro", "Header 2": "Setup"}`.
    pub fn headers_json(&self) -> String {
        let fields: Vec<String> = self
            .headers
            .iter()
            .map(|h| {
                format!(
                    "{}: {}",
                    serde_json::Value::from(h.level.key()),
                    serde_json::Value::from(h.title.as_str())
                )
            })
            .collect();
        format!("{{{}}}", fields.join(", "))
    }
}

/// A single-turn chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub user: String,
}

impl ChatPrompt {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

/// Incremental text pieces produced by a chat model.
pub type TokenStream = BoxStream<'static, Result<String, SummaryError>>;

/// Accumulated summary text, re-emitted after every new piece.
pub type SummaryStream = BoxStream<'static, Result<String, SummaryError>>;

/// Turns a stream of text pieces into a stream of the text accumulated so far.
///
/// Empty pieces are skipped. The stream ends right after the first error.
pub fn accumulate(pieces: TokenStream) -> SummaryStream {
    stream::unfold(
        (pieces, String::new(), false),
        |(mut pieces, mut text, failed)| async move {
            if failed {
                return None;
            }
            loop {
                match pieces.next().await? {
                    Ok(piece) if piece.is_empty() => continue,
                    Ok(piece) => {
                        text.push_str(&piece);
                        let update = Ok(text.clone());
                        return Some((update, (pieces, text, false)));
                    }
                    Err(err) => return Some((Err(err), (pieces, text, true))),
                }
            }
        },
    )
    .boxed()
}
