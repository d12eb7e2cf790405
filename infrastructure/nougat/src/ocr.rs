use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use business::domain::paper::errors::PaperError;
use business::domain::paper::services::OcrService;

/// How much of the child's stderr ends up in the log on failure.
const STDERR_TAIL_CHARS: usize = 2000;

/// Runs the Nougat CLI to turn a PDF into a Mathpix Markdown (`.mmd`) file.
///
/// The command is `program [args..] <pdf> --out <output_dir> --markdown`.
/// `args` lets the CLI be wrapped, e.g. `python -m nougat.predict`.
pub struct NougatOcr {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
}

impl NougatOcr {
    pub fn new(program: impl Into<OsString>, args: Vec<OsString>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    fn command_args(&self, pdf: &Path, output_dir: &Path) -> Vec<OsString> {
        let mut args = self.args.clone();
        args.push(pdf.as_os_str().to_owned());
        args.push("--out".into());
        args.push(output_dir.as_os_str().to_owned());
        args.push("--markdown".into());
        args
    }
}

fn tail(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    let start = text
        .char_indices()
        .nth(count - max_chars)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &text[start..]
}

#[async_trait]
impl OcrService for NougatOcr {
    async fn convert(&self, pdf: &Path, output_dir: &Path) -> Result<(), PaperError> {
        if !tokio::fs::try_exists(pdf).await.unwrap_or(false) {
            tracing::error!("File {} does not exist", pdf.display());
            return Err(PaperError::OcrFailed);
        }

        let child = Command::new(&self.program)
            .args(self.command_args(pdf, output_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                tracing::error!("Failed to start {:?}: {}", self.program, e);
                PaperError::OcrFailed
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                tracing::error!("Waiting for Nougat failed: {}", e);
                PaperError::OcrFailed
            })?,
            Err(_) => {
                tracing::error!(
                    "Nougat did not finish within {}s on {}",
                    self.timeout.as_secs(),
                    pdf.display()
                );
                return Err(PaperError::OcrTimeout);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                "Nougat exited with {} on {}: {}",
                output.status,
                pdf.display(),
                tail(&stderr, STDERR_TAIL_CHARS)
            );
            return Err(PaperError::OcrFailed);
        }

        tracing::debug!(
            "Nougat finished on {}: {}",
            pdf.display(),
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }
}
