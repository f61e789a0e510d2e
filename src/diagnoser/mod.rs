//! Report Diagnoser: keyword scoring of diseases from free report text.
//!
//! Pipeline: lower-case -> marker extraction -> threshold rules -> synonym
//! normalisation -> overlap scoring against every reference disease.

pub mod markers;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::models::Diagnosis;
use crate::normalize;
use crate::reference::ReferenceStore;

/// Score every reference disease against the symptoms implied by `text`.
///
/// Never fails: text without recognisable markers yields an empty diagnosis.
pub fn diagnose(text: &str, store: &ReferenceStore) -> Diagnosis {
    let lowered = text.to_lowercase();
    let markers = markers::read_markers(&lowered);

    let raw_symptoms: BTreeSet<String> = markers
        .iter()
        .flat_map(|reading| {
            debug!(
                marker = %reading.marker,
                value = reading.value,
                triggered = reading.triggered,
                "Marker reading"
            );
            markers::implied_symptoms(reading).iter().map(|s| s.to_string())
        })
        .collect();

    let detected_symptoms = normalize::normalize_all(&raw_symptoms);
    let disease_scores = score_diseases(&detected_symptoms, store);

    debug!(
        detected = detected_symptoms.len(),
        candidates = disease_scores.len(),
        "Report diagnosed"
    );

    Diagnosis {
        markers,
        raw_symptoms,
        detected_symptoms,
        disease_scores,
    }
}

/// Overlap count between `detected` and each disease's symptom list.
/// Diseases with no overlap are left out.
pub fn score_diseases(
    detected: &BTreeSet<String>,
    store: &ReferenceStore,
) -> BTreeMap<String, usize> {
    if detected.is_empty() {
        return BTreeMap::new();
    }
    store
        .diseases()
        .filter_map(|disease| {
            let overlap = disease
                .symptoms
                .iter()
                .filter(|s| detected.contains(s.as_str()))
                .collect::<BTreeSet<_>>()
                .len();
            (overlap > 0).then(|| (disease.name.clone(), overlap))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_panel_detects_canonical_symptoms() {
        let store = ReferenceStore::load_test();
        let d = diagnose("Hemoglobin: 10 WBC: 12000 Glucose: 150", &store);

        assert_eq!(
            d.raw_symptoms,
            set(&["excessive_thirst", "fatigue", "fever", "frequent_urination", "pallor", "weakness"])
        );
        assert_eq!(
            d.detected_symptoms,
            set(&[
                "excessive_thirst",
                "frequent_urination",
                "high_fever",
                "lethargy",
                "pallor",
                "weakness_in_limbs",
            ])
        );
        assert!(!d.disease_scores.is_empty());
        assert_eq!(d.disease_scores["Diabetes"], 3);
        assert_eq!(d.disease_scores["Anemia"], 3);
        assert_eq!(d.disease_scores["Malaria"], 1);
        assert!(!d.disease_scores.contains_key("Fungal infection"));
    }

    #[test]
    fn tie_resolves_to_first_name() {
        let store = ReferenceStore::load_test();
        let d = diagnose("Hemoglobin: 10 WBC: 12000 Glucose: 150", &store);
        assert_eq!(d.best_match(), Some(("Anemia", 3)));
    }

    #[test]
    fn no_markers_means_empty_result() {
        let store = ReferenceStore::load_test();
        let d = diagnose("no markers here", &store);
        assert!(d.detected_symptoms.is_empty());
        assert!(d.disease_scores.is_empty());
        assert!(d.markers.is_empty());
        assert!(d.is_empty());
    }

    #[test]
    fn normal_values_detect_nothing() {
        let store = ReferenceStore::load_test();
        let d = diagnose("Hemoglobin 14.2\nWBC 7000\nGlucose 95", &store);
        assert_eq!(d.markers.len(), 3);
        assert!(d.detected_symptoms.is_empty());
        assert!(d.disease_scores.is_empty());
    }

    #[test]
    fn single_marker_scores_matching_diseases() {
        let store = ReferenceStore::load_test();
        let d = diagnose("WBC: 15000 cells", &store);
        assert_eq!(d.detected_symptoms, set(&["high_fever"]));
        assert_eq!(d.best_match(), Some(("Malaria", 1)));
    }

    #[test]
    fn uppercase_text_is_matched() {
        let store = ReferenceStore::load_test();
        let d = diagnose("BLOOD SUGAR: 200", &store);
        assert_eq!(d.best_match(), Some(("Diabetes", 2)));
    }

    #[test]
    fn score_counts_distinct_overlap() {
        let store = ReferenceStore::load_test();
        let scores = score_diseases(&set(&["itching", "skin_rash", "nothing"]), &store);
        assert_eq!(scores["Fungal infection"], 2);
        assert_eq!(scores["Chicken pox"], 2);
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn full_panel_against_bundled_dataset() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(crate::config::default_data_dir());
        let store = ReferenceStore::load(&dir).unwrap();
        let d = diagnose("Hemoglobin: 10 WBC: 12000 Glucose: 150", &store);

        assert_eq!(d.disease_scores.len(), 6);
        assert!(d.disease_scores.values().all(|&score| score == 1));
        assert_eq!(d.best_match(), Some(("Cervical spondylosis", 1)));
    }
}
