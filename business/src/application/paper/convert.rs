use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::StorageError;
use crate::domain::logger::Logger;
use crate::domain::paper::errors::PaperError;
use crate::domain::paper::link::normalize_pdf_link;
use crate::domain::paper::markdown::to_display_math;
use crate::domain::paper::model::{ConvertedPaper, PaperOrigin, PaperSource, StoredPdf, is_pdf};
use crate::domain::paper::progress::{ConversionStage, ProgressReporter};
use crate::domain::paper::repository::PaperStorage;
use crate::domain::paper::services::{OcrService, PdfDownloaderService};
use crate::domain::paper::use_cases::convert::{ConvertPaperParams, ConvertPaperUseCase};

pub struct ConvertPaperUseCaseImpl {
    pub storage: Arc<dyn PaperStorage>,
    pub downloader: Arc<dyn PdfDownloaderService>,
    pub ocr: Arc<dyn OcrService>,
    pub logger: Arc<dyn Logger>,
}

impl ConvertPaperUseCaseImpl {
    async fn store(&self, origin: PaperOrigin, bytes: &[u8]) -> Result<StoredPdf, PaperError> {
        if !is_pdf(bytes) {
            self.logger
                .warn("Rejected input: content does not start with a PDF header");
            return Err(PaperError::InvalidPdf);
        }

        self.storage.ensure_workspace().await?;
        let stored = self.storage.store_pdf(origin, bytes).await?;
        self.logger.debug(&format!(
            "Stored {} bytes at {}",
            bytes.len(),
            stored.path.display()
        ));
        Ok(stored)
    }
}

#[async_trait]
impl ConvertPaperUseCase for ConvertPaperUseCaseImpl {
    async fn execute(
        &self,
        params: ConvertPaperParams,
        progress: &dyn ProgressReporter,
    ) -> Result<ConvertedPaper, PaperError> {
        let stored = match params.source {
            PaperSource::Link(link) => {
                progress.report(ConversionStage::Downloading);
                let url = normalize_pdf_link(&link)?;
                self.logger.info(&format!("Downloading PDF from {}", url));
                let bytes = self.downloader.download(&url).await?;
                self.store(PaperOrigin::Downloaded, &bytes).await?
            }
            PaperSource::Upload { file_name, bytes } => {
                progress.report(ConversionStage::ParsingUpload);
                if bytes.is_empty() {
                    return Err(PaperError::NoInput);
                }
                self.logger.info(&format!(
                    "Parsing uploaded PDF {} ({} bytes)",
                    file_name.as_deref().unwrap_or("<unnamed>"),
                    bytes.len()
                ));
                self.store(PaperOrigin::Uploaded, &bytes).await?
            }
        };

        progress.report(ConversionStage::RunningOcr);
        self.logger.info(&format!("Running OCR on paper {}", stored.id));
        self.ocr
            .convert(&stored.path, &self.storage.output_dir())
            .await?;

        progress.report(ConversionStage::LoadingMarkdown);
        let markdown = self
            .storage
            .read_markdown(&stored.id)
            .await
            .map_err(|err| match err {
                StorageError::NotFound => PaperError::MarkdownMissing,
                other => PaperError::Storage(other),
            })?;

        self.logger.info(&format!(
            "Paper {} converted: {} characters of Markdown",
            stored.id,
            markdown.len()
        ));

        Ok(ConvertedPaper {
            id: stored.id,
            markdown: to_display_math(&markdown),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paper::model::PaperId;
    use mockall::mock;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    mock! {
        pub Storage {}

        #[async_trait]
        impl PaperStorage for Storage {
            async fn ensure_workspace(&self) -> Result<(), StorageError>;
            async fn store_pdf(&self, origin: PaperOrigin, bytes: &[u8]) -> Result<StoredPdf, StorageError>;
            fn output_dir(&self) -> PathBuf;
            async fn read_markdown(&self, id: &PaperId) -> Result<String, StorageError>;
        }
    }

    mock! {
        pub Downloader {}

        #[async_trait]
        impl PdfDownloaderService for Downloader {
            async fn download(&self, url: &str) -> Result<Vec<u8>, PaperError>;
        }
    }

    mock! {
        pub Ocr {}

        #[async_trait]
        impl OcrService for Ocr {
            async fn convert(&self, pdf: &Path, output_dir: &Path) -> Result<(), PaperError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        stages: Mutex<Vec<ConversionStage>>,
    }

    impl ProgressReporter for RecordingProgress {
        fn report(&self, stage: ConversionStage) {
            self.stages.lock().unwrap().push(stage);
        }
    }

    impl RecordingProgress {
        fn stages(&self) -> Vec<ConversionStage> {
            self.stages.lock().unwrap().clone()
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    const PDF_BYTES: &[u8] = b"%PDF-1.5\nfake body";

    fn working_storage(markdown: &'static str) -> MockStorage {
        let mut storage = MockStorage::new();
        storage.expect_ensure_workspace().returning(|| Ok(()));
        storage.expect_store_pdf().returning(|origin, _| {
            let id = PaperId::new(format!("{}_abc", origin.prefix()));
            Ok(StoredPdf {
                path: PathBuf::from(format!("input/{}.pdf", id)),
                id,
            })
        });
        storage
            .expect_output_dir()
            .returning(|| PathBuf::from("output"));
        storage
            .expect_read_markdown()
            .returning(move |_| Ok(markdown.to_string()));
        storage
    }

    fn working_ocr() -> MockOcr {
        let mut ocr = MockOcr::new();
        ocr.expect_convert().returning(|_, _| Ok(()));
        ocr
    }

    #[tokio::test]
    async fn should_convert_paper_from_abstract_link() {
        let mut downloader = MockDownloader::new();
        downloader
            .expect_download()
            .withf(|url| url.to_string() == "https://arxiv.org/pdf/2308.11417.pdf")
            .times(1)
            .returning(|_| Ok(PDF_BYTES.to_vec()));

        let mut ocr = MockOcr::new();
        ocr.expect_convert()
            .withf(|pdf, out| {
                pdf.to_path_buf() == PathBuf::from("input/downloaded_paper_abc.pdf")
                    && out.to_path_buf() == PathBuf::from("output")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = ConvertPaperUseCaseImpl {
            storage: Arc::new(working_storage(r"# Title\nEnergy \(E\) is \[E = mc^2\]")),
            downloader: Arc::new(downloader),
            ocr: Arc::new(ocr),
            logger: mock_logger(),
        };
        let progress = RecordingProgress::default();

        let paper = use_case
            .execute(
                ConvertPaperParams {
                    source: PaperSource::Link("https://arxiv.org/abs/2308.11417".to_string()),
                },
                &progress,
            )
            .await
            .unwrap();

        assert_eq!(paper.id.as_str(), "downloaded_paper_abc");
        assert_eq!(paper.markdown, r"# Title\nEnergy $E$ is $$E = mc^2$$");
        assert_eq!(
            progress.stages(),
            vec![
                ConversionStage::Downloading,
                ConversionStage::RunningOcr,
                ConversionStage::LoadingMarkdown,
            ]
        );
    }

    #[tokio::test]
    async fn should_convert_uploaded_pdf_without_downloading() {
        let mut downloader = MockDownloader::new();
        downloader.expect_download().never();

        let use_case = ConvertPaperUseCaseImpl {
            storage: Arc::new(working_storage("# Uploaded")),
            downloader: Arc::new(downloader),
            ocr: Arc::new(working_ocr()),
            logger: mock_logger(),
        };
        let progress = RecordingProgress::default();

        let paper = use_case
            .execute(
                ConvertPaperParams {
                    source: PaperSource::Upload {
                        file_name: Some("paper.pdf".to_string()),
                        bytes: PDF_BYTES.to_vec(),
                    },
                },
                &progress,
            )
            .await
            .unwrap();

        assert_eq!(paper.id.as_str(), "uploaded_paper_abc");
        assert_eq!(progress.stages()[0], ConversionStage::ParsingUpload);
    }

    #[tokio::test]
    async fn should_reject_empty_link_before_touching_workspace() {
        let mut storage = MockStorage::new();
        storage.expect_ensure_workspace().never();

        let use_case = ConvertPaperUseCaseImpl {
            storage: Arc::new(storage),
            downloader: Arc::new(MockDownloader::new()),
            ocr: Arc::new(MockOcr::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(
                ConvertPaperParams {
                    source: PaperSource::Link("  ".to_string()),
                },
                &RecordingProgress::default(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), PaperError::NoInput));
    }

    #[tokio::test]
    async fn should_reject_empty_upload() {
        let use_case = ConvertPaperUseCaseImpl {
            storage: Arc::new(MockStorage::new()),
            downloader: Arc::new(MockDownloader::new()),
            ocr: Arc::new(MockOcr::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(
                ConvertPaperParams {
                    source: PaperSource::Upload {
                        file_name: None,
                        bytes: vec![],
                    },
                },
                &RecordingProgress::default(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), PaperError::NoInput));
    }

    #[tokio::test]
    async fn should_propagate_download_failure() {
        let mut downloader = MockDownloader::new();
        downloader
            .expect_download()
            .returning(|_| Err(PaperError::DownloadFailed));
        let mut ocr = MockOcr::new();
        ocr.expect_convert().never();

        let use_case = ConvertPaperUseCaseImpl {
            storage: Arc::new(MockStorage::new()),
            downloader: Arc::new(downloader),
            ocr: Arc::new(ocr),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(
                ConvertPaperParams {
                    source: PaperSource::Link("https://example.com/missing.pdf".to_string()),
                },
                &RecordingProgress::default(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), PaperError::DownloadFailed));
    }

    #[tokio::test]
    async fn should_reject_downloaded_content_that_is_not_a_pdf() {
        let mut downloader = MockDownloader::new();
        downloader
            .expect_download()
            .returning(|_| Ok(b"<html>captcha</html>".to_vec()));
        let mut storage = MockStorage::new();
        storage.expect_store_pdf().never();

        let use_case = ConvertPaperUseCaseImpl {
            storage: Arc::new(storage),
            downloader: Arc::new(downloader),
            ocr: Arc::new(MockOcr::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(
                ConvertPaperParams {
                    source: PaperSource::Link("https://example.com/paper".to_string()),
                },
                &RecordingProgress::default(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), PaperError::InvalidPdf));
    }

    #[tokio::test]
    async fn should_propagate_ocr_failure() {
        let mut ocr = MockOcr::new();
        ocr.expect_convert()
            .returning(|_, _| Err(PaperError::OcrFailed));

        let use_case = ConvertPaperUseCaseImpl {
            storage: Arc::new(working_storage("unused")),
            downloader: Arc::new(MockDownloader::new()),
            ocr: Arc::new(ocr),
            logger: mock_logger(),
        };
        let progress = RecordingProgress::default();

        let result = use_case
            .execute(
                ConvertPaperParams {
                    source: PaperSource::Upload {
                        file_name: None,
                        bytes: PDF_BYTES.to_vec(),
                    },
                },
                &progress,
            )
            .await;

        assert!(matches!(result.unwrap_err(), PaperError::OcrFailed));
        assert!(!progress.stages().contains(&ConversionStage::LoadingMarkdown));
    }

    #[tokio::test]
    async fn should_report_missing_markdown_when_ocr_produced_nothing() {
        let mut storage = MockStorage::new();
        storage.expect_ensure_workspace().returning(|| Ok(()));
        storage.expect_store_pdf().returning(|_, _| {
            Ok(StoredPdf {
                id: PaperId::new("uploaded_paper_abc"),
                path: PathBuf::from("input/uploaded_paper_abc.pdf"),
            })
        });
        storage
            .expect_output_dir()
            .returning(|| PathBuf::from("output"));
        storage
            .expect_read_markdown()
            .returning(|_| Err(StorageError::NotFound));

        let use_case = ConvertPaperUseCaseImpl {
            storage: Arc::new(storage),
            downloader: Arc::new(MockDownloader::new()),
            ocr: Arc::new(working_ocr()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(
                ConvertPaperParams {
                    source: PaperSource::Upload {
                        file_name: None,
                        bytes: PDF_BYTES.to_vec(),
                    },
                },
                &RecordingProgress::default(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), PaperError::MarkdownMissing));
    }
}
