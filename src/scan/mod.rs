//! Report Scanner: uploaded report image -> greyscale -> OCR -> diagnosis.

pub mod imaging;
pub mod ocr;

pub use imaging::ReportFormat;
pub use ocr::{MockOcrEngine, OcrEngine, TesseractCli};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::diagnoser;
use crate::models::Diagnosis;
use crate::reference::ReferenceStore;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported report format (expected PNG or JPEG)")]
    UnsupportedFormat,

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("OCR engine '{command}' could not be started: {source}")]
    OcrUnavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),
}

/// Result of scanning one report image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub format: ReportFormat,
    pub width: u32,
    pub height: u32,
    pub extracted_text: String,
    pub diagnosis: Diagnosis,
}

/// Validate, greyscale and OCR the image, then diagnose the extracted text.
pub fn scan_report(
    image_bytes: &[u8],
    engine: &dyn OcrEngine,
    store: &ReferenceStore,
) -> Result<ScanReport, ScanError> {
    imaging::validate_image_bytes(image_bytes)?;
    let format = imaging::detect_image_format(image_bytes)?;
    let gray = imaging::to_greyscale(image_bytes)?;
    let png = imaging::encode_png(&gray)?;

    let extracted_text = engine.ocr_image(&png)?;
    let diagnosis = diagnoser::diagnose(&extracted_text, store);

    info!(
        format = format.mime_type(),
        chars = extracted_text.len(),
        detected = diagnosis.detected_symptoms.len(),
        "Report scanned"
    );

    Ok(ScanReport {
        format,
        width: gray.width(),
        height: gray.height(),
        extracted_text,
        diagnosis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::imaging::tests::make_test_png;

    /// Records the bytes it was handed so tests can inspect the OCR input.
    struct CapturingEngine {
        seen: std::cell::RefCell<Vec<u8>>,
    }

    impl OcrEngine for CapturingEngine {
        fn ocr_image(&self, image_bytes: &[u8]) -> Result<String, ScanError> {
            *self.seen.borrow_mut() = image_bytes.to_vec();
            Ok("WBC: 15000".into())
        }
    }

    #[test]
    fn scan_runs_ocr_and_diagnoses() {
        let store = ReferenceStore::load_test();
        let engine = MockOcrEngine::new("Hemoglobin: 10\nWBC: 12000\nGlucose: 150");
        let report = scan_report(&make_test_png(40, 30, [250, 250, 250]), &engine, &store).unwrap();

        assert_eq!(report.format, ReportFormat::Png);
        assert_eq!((report.width, report.height), (40, 30));
        assert!(report.extracted_text.starts_with("Hemoglobin"));
        assert_eq!(report.diagnosis.detected_symptoms.len(), 6);
        assert_eq!(report.diagnosis.best_match(), Some(("Anemia", 3)));
    }

    #[test]
    fn ocr_receives_greyscale_png() {
        let store = ReferenceStore::load_test();
        let engine = CapturingEngine {
            seen: Default::default(),
        };
        scan_report(&make_test_png(8, 8, [255, 0, 0]), &engine, &store).unwrap();

        let seen = engine.seen.borrow();
        assert_eq!(imaging::detect_image_format(&seen).unwrap(), ReportFormat::Png);
        let decoded = image::load_from_memory(&seen).unwrap();
        assert!(matches!(decoded, image::DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn blank_report_yields_empty_diagnosis() {
        let store = ReferenceStore::load_test();
        let engine = MockOcrEngine::new("");
        let report = scan_report(&make_test_png(10, 10, [255, 255, 255]), &engine, &store).unwrap();
        assert!(report.diagnosis.is_empty());
    }

    #[test]
    fn non_image_is_rejected_before_ocr() {
        let store = ReferenceStore::load_test();
        let engine = MockOcrEngine::new("Hemoglobin: 10");
        let mut pdf = b"%PDF-1.7\n".to_vec();
        pdf.resize(200, b' ');
        assert!(matches!(
            scan_report(&pdf, &engine, &store),
            Err(ScanError::UnsupportedFormat)
        ));
    }
}
