//! Severity Classifier: buckets a symptom weight into Mild / Moderate / Severe.

use crate::models::SeverityTier;
use crate::reference::ReferenceStore;

pub const SEVERE_THRESHOLD: u32 = 7;
pub const MODERATE_THRESHOLD: u32 = 4;

/// Step function over the weight: >= 7 severe, >= 4 moderate, otherwise mild.
pub fn classify(weight: u32) -> SeverityTier {
    if weight >= SEVERE_THRESHOLD {
        SeverityTier::Severe
    } else if weight >= MODERATE_THRESHOLD {
        SeverityTier::Moderate
    } else {
        SeverityTier::Mild
    }
}

/// Mean weight across `symptoms`, 0.0 for an empty list.
pub fn average_severity<S: AsRef<str>>(store: &ReferenceStore, symptoms: &[S]) -> f64 {
    if symptoms.is_empty() {
        return 0.0;
    }
    let total: u32 = symptoms
        .iter()
        .map(|s| store.severity_weight(s.as_ref()))
        .sum();
    f64::from(total) / symptoms.len() as f64
}
