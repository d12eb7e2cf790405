use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::StorageError;

use super::model::{PaperId, PaperOrigin, StoredPdf};

/// Workspace holding downloaded or uploaded PDFs and their Nougat output.
#[async_trait]
pub trait PaperStorage: Send + Sync {
    /// Creates the input and output directories if they do not exist.
    async fn ensure_workspace(&self) -> Result<(), StorageError>;

    /// Writes the PDF under a freshly generated id.
    async fn store_pdf(
        &self,
        origin: PaperOrigin,
        bytes: &[u8],
    ) -> Result<StoredPdf, StorageError>;

    /// Directory the OCR step writes its `.mmd` files into.
    fn output_dir(&self) -> PathBuf;

    /// Reads `<output_dir>/<id>.mmd`.
    async fn read_markdown(&self, id: &PaperId) -> Result<String, StorageError>;
}
