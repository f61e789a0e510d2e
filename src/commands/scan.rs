//! Report scan view: OCR an uploaded image (or take text directly) and show
//! the detected symptoms with the most likely disease.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DISCLAIMER;
use crate::core_state::CoreState;
use crate::diagnoser;
use crate::models::{Diagnosis, MarkerReading};
use crate::scan::{self, OcrEngine};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseScore {
    pub disease: String,
    pub score: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanView {
    pub extracted_text: String,
    pub markers: Vec<MarkerReading>,
    pub raw_symptoms: Vec<String>,
    pub detected_symptoms: Vec<String>,
    pub best_match: Option<DiseaseScore>,
    pub candidates: Vec<DiseaseScore>,
    pub disclaimer: String,
}

impl ScanView {
    fn new(extracted_text: String, diagnosis: Diagnosis) -> Self {
        let to_score = |(disease, score): (&str, usize)| DiseaseScore {
            disease: disease.to_string(),
            score,
        };
        Self {
            best_match: diagnosis.best_match().map(to_score),
            candidates: diagnosis.ranked().into_iter().map(to_score).collect(),
            raw_symptoms: diagnosis.raw_symptoms.into_iter().collect(),
            detected_symptoms: diagnosis.detected_symptoms.into_iter().collect(),
            markers: diagnosis.markers,
            extracted_text,
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

/// OCR the image with `engine`, then diagnose.
pub fn scan_image(
    state: &CoreState,
    image_bytes: &[u8],
    engine: &dyn OcrEngine,
) -> Result<ScanView, String> {
    let report = scan::scan_report(image_bytes, engine, &state.store).map_err(|e| e.to_string())?;
    Ok(ScanView::new(report.extracted_text, report.diagnosis))
}

/// Diagnose text that was already extracted elsewhere.
pub fn diagnose_text(state: &CoreState, text: &str) -> ScanView {
    ScanView::new(text.to_string(), diagnoser::diagnose(text, &state.store))
}

impl fmt::Display for ScanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Extracted text")?;
        writeln!(f, "--------------")?;
        writeln!(f, "{}", self.extracted_text.trim_end())?;
        writeln!(f)?;

        for m in &self.markers {
            let flag = if m.triggered { "out of range" } else { "normal" };
            writeln!(f, "  {}: {} ({flag})", m.marker, m.value)?;
        }

        if self.raw_symptoms.is_empty() {
            writeln!(f, "No symptoms detected.")?;
        } else {
            writeln!(f, "Detected symptoms: {}", self.raw_symptoms.join(", "))?;
            writeln!(f, "Matched as: {}", self.detected_symptoms.join(", "))?;
        }

        match self.best_match {
            Some(ref best) => {
                writeln!(f, "Possible disease: {} (score {})", best.disease, best.score)?;
                for c in self.candidates.iter().skip(1) {
                    writeln!(f, "  also: {} (score {})", c.disease, c.score)?;
                }
            }
            None => writeln!(f, "No matching disease found.")?,
        }

        writeln!(f, "\n⚠ {}", self.disclaimer)
    }
}
