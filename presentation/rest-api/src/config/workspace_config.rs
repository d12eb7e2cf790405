use std::path::PathBuf;
use std::time::Duration;

use storage::downloader::DEFAULT_MAX_PDF_BYTES;

use super::env::{ConfigError, Lookup, ProcessEnv, non_blank, parse_or};

/// Where papers are kept and how long a download may take.
///
/// Environment variables:
/// - WORKSPACE_INPUT_DIR: Directory for PDFs (default: "input")
/// - WORKSPACE_OUTPUT_DIR: Directory for Nougat output (default: "output")
/// - DOWNLOAD_TIMEOUT_SECS: Timeout for one PDF download (default: 120)
/// - DOWNLOAD_MAX_BYTES: Largest accepted PDF (default: 200 MiB)
/// - WORKSPACE_MAX_PAPERS: Papers kept on disk, 0 keeps all (default: 100)
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub download_timeout: Duration,
    pub download_max_bytes: u64,
    pub max_papers: usize,
}

impl WorkspaceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&ProcessEnv)
    }

    pub fn from_lookup(lookup: &dyn Lookup) -> Result<Self, ConfigError> {
        Ok(Self {
            input_dir: non_blank(lookup, "WORKSPACE_INPUT_DIR")
                .unwrap_or_else(|| "input".to_string())
                .into(),
            output_dir: non_blank(lookup, "WORKSPACE_OUTPUT_DIR")
                .unwrap_or_else(|| "output".to_string())
                .into(),
            download_timeout: Duration::from_secs(parse_or(lookup, "DOWNLOAD_TIMEOUT_SECS", 120)?),
            download_max_bytes: parse_or(lookup, "DOWNLOAD_MAX_BYTES", DEFAULT_MAX_PDF_BYTES)?,
            max_papers: parse_or(lookup, "WORKSPACE_MAX_PAPERS", 100)?,
        })
    }
}
