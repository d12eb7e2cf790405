use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::fs;

use business::domain::errors::StorageError;
use business::domain::paper::model::{PaperId, PaperOrigin, StoredPdf};
use business::domain::paper::repository::PaperStorage;

/// Paper workspace on the local filesystem.
///
/// PDFs live in `input_dir/<id>.pdf`, OCR output in `output_dir/<id>.mmd`.
/// With a retention limit, storing a new PDF first evicts the oldest papers
/// so that at most `max_papers` remain afterwards.
pub struct FilesystemPaperStorage {
    input_dir: PathBuf,
    output_dir: PathBuf,
    max_papers: usize,
}

impl FilesystemPaperStorage {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            max_papers: 0,
        }
    }

    /// Keeps at most `max_papers` papers. Zero keeps everything.
    pub fn with_retention(mut self, max_papers: usize) -> Self {
        self.max_papers = max_papers;
        self
    }

    fn pdf_path(&self, id: &PaperId) -> PathBuf {
        self.input_dir.join(format!("{}.pdf", id))
    }

    fn markdown_path(&self, id: &PaperId) -> PathBuf {
        self.output_dir.join(format!("{}.mmd", id))
    }

    /// Stems of the stored PDFs with their modification times.
    async fn stored_papers(&self) -> std::io::Result<Vec<(SystemTime, String)>> {
        let mut entries = fs::read_dir(&self.input_dir).await?;
        let mut papers = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "pdf")
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                let modified = entry.metadata().await?.modified()?;
                papers.push((modified, stem.to_string()));
            }
        }
        Ok(papers)
    }

    /// Makes room for one more paper. Failures are logged, never returned.
    async fn evict_oldest(&self) {
        if self.max_papers == 0 {
            return;
        }
        let mut papers = match self.stored_papers().await {
            Ok(papers) => papers,
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", self.input_dir.display(), e);
                return;
            }
        };
        if papers.len() < self.max_papers {
            return;
        }

        papers.sort();
        let excess = papers.len() + 1 - self.max_papers;
        for (_, stem) in papers.into_iter().take(excess) {
            let id = PaperId::new(stem);
            for path in [self.pdf_path(&id), self.markdown_path(&id)] {
                match fs::remove_file(&path).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
                }
            }
            tracing::debug!("Evicted paper {} from the workspace", id);
        }
    }
}

#[async_trait]
impl PaperStorage for FilesystemPaperStorage {
    async fn ensure_workspace(&self) -> Result<(), StorageError> {
        for dir in [&self.input_dir, &self.output_dir] {
            fs::create_dir_all(dir).await.map_err(|e| {
                tracing::error!("Failed to create {}: {}", dir.display(), e);
                StorageError::io()
            })?;
        }
        Ok(())
    }

    async fn store_pdf(
        &self,
        origin: PaperOrigin,
        bytes: &[u8],
    ) -> Result<StoredPdf, StorageError> {
        self.evict_oldest().await;

        let id = PaperId::generate(origin);
        let path = self.pdf_path(&id);

        fs::write(&path, bytes).await.map_err(|e| {
            tracing::error!("Failed to write {}: {}", path.display(), e);
            StorageError::io()
        })?;

        Ok(StoredPdf { id, path })
    }

    fn output_dir(&self) -> PathBuf {
        self.output_dir.clone()
    }

    async fn read_markdown(&self, id: &PaperId) -> Result<String, StorageError> {
        let path = self.markdown_path(id);
        fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::not_found(),
            _ => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                StorageError::io()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(root: &TempDir) -> FilesystemPaperStorage {
        FilesystemPaperStorage::new(root.path().join("input"), root.path().join("output"))
    }

    #[tokio::test]
    async fn should_create_missing_workspace_directories() {
        let root = TempDir::new().unwrap();
        let storage = storage_in(&root);

        storage.ensure_workspace().await.unwrap();
        storage.ensure_workspace().await.unwrap();

        assert!(root.path().join("input").is_dir());
        assert!(root.path().join("output").is_dir());
    }

    #[tokio::test]
    async fn should_store_pdf_under_generated_id() {
        let root = TempDir::new().unwrap();
        let storage = storage_in(&root);
        storage.ensure_workspace().await.unwrap();

        let stored = storage
            .store_pdf(PaperOrigin::Downloaded, b"%PDF-1.4 body")
            .await
            .unwrap();

        assert!(stored.id.as_str().starts_with("downloaded_paper_"));
        assert_eq!(stored.path.parent(), Some(root.path().join("input").as_path()));
        assert_eq!(
            stored.path.file_name().unwrap().to_str().unwrap(),
            format!("{}.pdf", stored.id)
        );
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"%PDF-1.4 body");
    }

    #[tokio::test]
    async fn should_fail_to_store_without_workspace() {
        let root = TempDir::new().unwrap();
        let storage = storage_in(&root);

        let result = storage.store_pdf(PaperOrigin::Uploaded, b"%PDF-").await;

        assert!(matches!(result, Err(StorageError::Io)));
    }

    #[tokio::test]
    async fn should_read_markdown_written_for_paper() {
        let root = TempDir::new().unwrap();
        let storage = storage_in(&root);
        storage.ensure_workspace().await.unwrap();
        let id = PaperId::new("downloaded_paper_abc");
        std::fs::write(
            root.path().join("output").join("downloaded_paper_abc.mmd"),
            "# Title\nBody",
        )
        .unwrap();

        let markdown = storage.read_markdown(&id).await.unwrap();

        assert_eq!(markdown, "# Title\nBody");
    }

    #[tokio::test]
    async fn should_report_not_found_for_missing_markdown() {
        let root = TempDir::new().unwrap();
        let storage = storage_in(&root);
        storage.ensure_workspace().await.unwrap();

        let result = storage.read_markdown(&PaperId::new("missing")).await;

        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[test]
    fn should_expose_output_dir() {
        let storage = FilesystemPaperStorage::new("in", "out");
        assert_eq!(storage.output_dir(), PathBuf::from("out"));
    }

    fn write_paper(root: &TempDir, stem: &str, age_secs: u64) {
        let pdf = root.path().join("input").join(format!("{}.pdf", stem));
        std::fs::write(&pdf, b"%PDF-").unwrap();
        std::fs::write(root.path().join("output").join(format!("{}.mmd", stem)), "text").unwrap();
        let modified = SystemTime::now() - std::time::Duration::from_secs(age_secs);
        std::fs::File::options()
            .write(true)
            .open(&pdf)
            .unwrap()
            .set_modified(modified)
            .unwrap();
    }

    #[tokio::test]
    async fn should_evict_oldest_papers_beyond_retention() {
        let root = TempDir::new().unwrap();
        let storage = storage_in(&root).with_retention(2);
        storage.ensure_workspace().await.unwrap();
        write_paper(&root, "downloaded_paper_old", 300);
        write_paper(&root, "downloaded_paper_older", 600);
        write_paper(&root, "downloaded_paper_recent", 60);

        let stored = storage
            .store_pdf(PaperOrigin::Uploaded, b"%PDF-1.4 body")
            .await
            .unwrap();

        let input = root.path().join("input");
        let output = root.path().join("output");
        assert!(stored.path.exists());
        assert!(input.join("downloaded_paper_recent.pdf").exists());
        assert!(output.join("downloaded_paper_recent.mmd").exists());
        for stem in ["downloaded_paper_old", "downloaded_paper_older"] {
            assert!(!input.join(format!("{}.pdf", stem)).exists());
            assert!(!output.join(format!("{}.mmd", stem)).exists());
        }
    }

    #[tokio::test]
    async fn should_keep_everything_without_retention() {
        let root = TempDir::new().unwrap();
        let storage = storage_in(&root);
        storage.ensure_workspace().await.unwrap();
        write_paper(&root, "downloaded_paper_old", 600);

        storage
            .store_pdf(PaperOrigin::Downloaded, b"%PDF-1.4 body")
            .await
            .unwrap();

        assert!(root.path().join("input/downloaded_paper_old.pdf").exists());
    }
}
