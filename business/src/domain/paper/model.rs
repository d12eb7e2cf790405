use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Where a stored PDF came from. Decides the file stem prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperOrigin {
    Downloaded,
    Uploaded,
}

impl PaperOrigin {
    pub fn prefix(&self) -> &'static str {
        match self {
            PaperOrigin::Downloaded => "downloaded_paper",
            PaperOrigin::Uploaded => "uploaded_paper",
        }
    }
}

/// Identifier of a paper in the workspace.
/// Doubles as the file stem of both the PDF and the Nougat output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaperId(String);

impl PaperId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh id such as `downloaded_paper_3f2a...`.
    pub fn generate(origin: PaperOrigin) -> Self {
        Self(format!("{}_{}", origin.prefix(), Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input of a conversion: either a link to fetch or the bytes of an uploaded file.
#[derive(Clone)]
pub enum PaperSource {
    Link(String),
    Upload {
        file_name: Option<String>,
        bytes: Vec<u8>,
    },
}

impl std::fmt::Debug for PaperSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaperSource::Link(link) => f.debug_tuple("Link").field(link).finish(),
            PaperSource::Upload { file_name, bytes } => f
                .debug_struct("Upload")
                .field("file_name", file_name)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// A PDF written to the workspace input directory.
#[derive(Debug, Clone)]
pub struct StoredPdf {
    pub id: PaperId,
    pub path: PathBuf,
}

/// Nougat output for a paper, with math delimiters already rewritten.
#[derive(Debug, Clone)]
pub struct ConvertedPaper {
    pub id: PaperId,
    pub markdown: String,
}

/// Checks the PDF header signature.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}
