use std::io::Write;
use std::process::Command;

use tracing::{debug, warn};

use super::ScanError;

/// OCR engine abstraction (allows mocking for tests).
/// Input is an encoded image (PNG); output is the raw extracted text.
pub trait OcrEngine {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, ScanError>;
}

/// Runs the Tesseract command-line binary against a temporary image file.
pub struct TesseractCli {
    command: String,
    lang: Option<String>,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            lang: None,
        }
    }

    /// Set language(s) for OCR (e.g., "eng", "eng+fra")
    pub fn with_languages(mut self, langs: &str) -> Self {
        self.lang = Some(langs.to_string());
        self
    }

    pub fn languages(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

impl OcrEngine for TesseractCli {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, ScanError> {
        let mut staged = tempfile::Builder::new()
            .prefix("telehealth-report-")
            .suffix(".png")
            .tempfile()?;
        staged.write_all(image_bytes)?;
        staged.flush()?;

        let mut cmd = Command::new(&self.command);
        cmd.arg(staged.path()).arg("stdout");
        if let Some(ref lang) = self.lang {
            cmd.arg("-l").arg(lang);
        }

        debug!(command = %self.command, lang = ?self.lang, "Running OCR");
        let output = cmd.output().map_err(|e| ScanError::OcrUnavailable {
            command: self.command.clone(),
            source: e,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, "OCR command failed");
            return Err(ScanError::OcrProcessing(stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Mock OCR engine for unit testing without Tesseract.
pub struct MockOcrEngine {
    pub text: String,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _image_bytes: &[u8]) -> Result<String, ScanError> {
        Ok(self.text.clone())
    }
}
