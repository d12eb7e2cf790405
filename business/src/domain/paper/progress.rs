/// Stages of a PDF to Markdown conversion, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionStage {
    Downloading,
    ParsingUpload,
    RunningOcr,
    LoadingMarkdown,
}

impl ConversionStage {
    /// Completed fraction of the conversion when this stage starts.
    pub fn fraction(&self) -> f64 {
        match self {
            ConversionStage::Downloading => 0.0,
            ConversionStage::ParsingUpload => 0.1,
            ConversionStage::RunningOcr => 0.3,
            ConversionStage::LoadingMarkdown => 0.9,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConversionStage::Downloading => "Downloading PDF file from the link",
            ConversionStage::ParsingUpload => "Parsing the uploaded PDF file",
            ConversionStage::RunningOcr => {
                "Running Nougat OCR on the PDF file - This may take a while (~5 mins)"
            }
            ConversionStage::LoadingMarkdown => "Loading Markdown file",
        }
    }
}

impl std::fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionStage::Downloading => write!(f, "downloading"),
            ConversionStage::ParsingUpload => write!(f, "parsing_upload"),
            ConversionStage::RunningOcr => write!(f, "running_ocr"),
            ConversionStage::LoadingMarkdown => write!(f, "loading_markdown"),
        }
    }
}

/// Receives conversion progress. Implementations must not block.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, stage: ConversionStage);
}

/// Discards every report.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _stage: ConversionStage) {}
}
