//! Disease Lookup: fuzzy name search plus the composed detail record shown
//! for a selected disease.

pub mod fuzzy;

pub use fuzzy::search;

use serde::{Deserialize, Serialize};

use crate::models::SeverityTier;
use crate::reference::ReferenceStore;
use crate::severity;

/// One symptom chip: identifier, weight and tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomSeverity {
    pub symptom: String,
    pub weight: u32,
    pub tier: SeverityTier,
    pub color: String,
}

/// Everything the detail view shows for one disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseDetail {
    pub name: String,
    pub symptoms: Vec<SymptomSeverity>,
    pub average_severity: f64,
    pub description: String,
    pub precautions: Vec<String>,
}

/// Fuzzy search over every disease in the store.
pub fn search_diseases(store: &ReferenceStore, query: &str) -> Vec<String> {
    search(query, store.all_disease_names())
}

/// Compose the detail view for `name`. `None` when the disease is unknown.
pub fn lookup(store: &ReferenceStore, name: &str) -> Option<DiseaseDetail> {
    let record = store.disease(name)?;

    let symptoms = record
        .symptoms
        .iter()
        .map(|symptom| {
            let weight = store.severity_weight(symptom);
            let tier = severity::classify(weight);
            SymptomSeverity {
                symptom: symptom.clone(),
                weight,
                tier,
                color: tier.color().to_string(),
            }
        })
        .collect();

    Some(DiseaseDetail {
        name: record.name.clone(),
        symptoms,
        average_severity: severity::average_severity(store, &record.symptoms),
        description: record.description.clone(),
        precautions: record.precautions.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_pairs_symptoms_with_tiers() {
        let store = ReferenceStore::load_test();
        let detail = lookup(&store, "Malaria").unwrap();

        assert_eq!(detail.name, "Malaria");
        assert_eq!(detail.symptoms.len(), 5);
        let fever = detail.symptoms.iter().find(|s| s.symptom == "high_fever").unwrap();
        assert_eq!(fever.tier, SeverityTier::Severe);
        assert_eq!(fever.color, "red");
        let chills = &detail.symptoms[0];
        assert_eq!(chills.symptom, "chills");
        assert_eq!(chills.tier, SeverityTier::Mild);
        assert_eq!(detail.precautions, vec!["consult nearest hospital", "avoid oily food"]);
        // (3 + 5 + 7 + 3 + 3) / 5
        assert!((detail.average_severity - 4.2).abs() < 1e-9);
    }

    #[test]
    fn unknown_disease_has_no_detail() {
        let store = ReferenceStore::load_test();
        assert!(lookup(&store, "Scurvy").is_none());
    }

    #[test]
    fn detail_with_missing_secondary_data() {
        let store = ReferenceStore::load_test();
        let detail = lookup(&store, "Anemia").unwrap();
        assert!(detail.description.is_empty());
        assert!(detail.precautions.is_empty());
    }

    #[test]
    fn search_runs_over_store_names() {
        let store = ReferenceStore::load_test();
        let results = search_diseases(&store, "Diabetes");
        assert_eq!(results.first().map(String::as_str), Some("Diabetes"));
        assert!(search_diseases(&store, "").is_empty());
    }
}
