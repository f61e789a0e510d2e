//! Reference Store: the static disease/symptom dataset, loaded once at
//! startup into typed records and only read afterwards.

pub mod loader;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config;
use crate::models::{DiseaseRecord, SeverityTier};
use crate::severity;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Malformed reference file {file}: {source}")]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Empty key in {file} at line {line}")]
    EmptyKey { file: PathBuf, line: u64 },

    #[error("Invalid severity weight {value:?} for {symptom} in {file} at line {line}")]
    InvalidWeight {
        file: PathBuf,
        line: u64,
        symptom: String,
        value: String,
    },
}

impl ReferenceError {
    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            file: path.to_path_buf(),
            source,
        }
    }
}

/// Immutable, in-memory view of the four reference tables.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    diseases: BTreeMap<String, DiseaseRecord>,
    severity: HashMap<String, u32>,
}

impl ReferenceStore {
    /// Load all four tables from `data_dir`. Any missing or malformed file fails.
    pub fn load(data_dir: &Path) -> Result<Self, ReferenceError> {
        let symptoms = loader::load_symptom_table(&data_dir.join(config::SYMPTOMS_FILE))?;
        let descriptions = loader::load_descriptions(&data_dir.join(config::DESCRIPTIONS_FILE))?;
        let precautions = loader::load_precautions(&data_dir.join(config::PRECAUTIONS_FILE))?;
        let severity = loader::load_severity(&data_dir.join(config::SEVERITY_FILE))?;

        for name in descriptions.keys().chain(precautions.keys()) {
            if !symptoms.contains_key(name) {
                debug!(disease = %name, "Secondary row has no symptom entry, ignored");
            }
        }

        let records = symptoms.into_iter().map(|(name, symptoms)| DiseaseRecord {
            description: descriptions.get(&name).cloned().unwrap_or_default(),
            precautions: precautions.get(&name).cloned().unwrap_or_default(),
            name,
            symptoms,
        });
        let store = Self::from_records(records, severity);

        info!(
            path = %data_dir.display(),
            diseases = store.len(),
            weighted_symptoms = store.severity.len(),
            "Reference data loaded"
        );
        Ok(store)
    }

    /// Build a store from already-typed records. Later records with the same
    /// name replace earlier ones.
    pub fn from_records(
        records: impl IntoIterator<Item = DiseaseRecord>,
        severity: HashMap<String, u32>,
    ) -> Self {
        let diseases = records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();
        Self { diseases, severity }
    }

    pub fn disease(&self, name: &str) -> Option<&DiseaseRecord> {
        self.diseases.get(name)
    }

    pub fn symptoms_of(&self, disease: &str) -> &[String] {
        self.disease(disease)
            .map(|d| d.symptoms.as_slice())
            .unwrap_or_default()
    }

    pub fn description_of(&self, disease: &str) -> &str {
        self.disease(disease)
            .map(|d| d.description.as_str())
            .unwrap_or_default()
    }

    pub fn precautions_of(&self, disease: &str) -> &[String] {
        self.disease(disease)
            .map(|d| d.precautions.as_slice())
            .unwrap_or_default()
    }

    /// Weight for a symptom; unknown symptoms weigh 0.
    pub fn severity_weight(&self, symptom: &str) -> u32 {
        self.severity.get(symptom).copied().unwrap_or(0)
    }

    pub fn classify(&self, symptom: &str) -> SeverityTier {
        severity::classify(self.severity_weight(symptom))
    }

    /// Disease names in ascending order.
    pub fn all_disease_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.diseases.keys().map(String::as_str)
    }

    pub fn diseases(&self) -> impl Iterator<Item = &DiseaseRecord> + '_ {
        self.diseases.values()
    }

    /// Every symptom named by either the disease table or the severity table.
    pub fn symptom_vocabulary(&self) -> BTreeSet<&str> {
        self.diseases
            .values()
            .flat_map(|d| d.symptoms.iter().map(String::as_str))
            .chain(self.severity.keys().map(String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    /// Small in-memory dataset for tests (no file I/O).
    #[cfg(test)]
    pub fn load_test() -> Self {
        let record = |name: &str, symptoms: &[&str], description: &str, precautions: &[&str]| {
            DiseaseRecord {
                name: name.into(),
                symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
                description: description.into(),
                precautions: precautions.iter().map(|s| s.to_string()).collect(),
            }
        };
        let severity = [
            ("itching", 1),
            ("skin_rash", 3),
            ("high_fever", 7),
            ("lethargy", 2),
            ("weakness_in_limbs", 7),
            ("pallor", 4),
            ("frequent_urination", 4),
            ("excessive_thirst", 4),
            ("fatigue", 4),
            ("polyuria", 4),
            ("chills", 3),
            ("vomiting", 5),
            ("sweating", 3),
            ("headache", 3),
            ("mild_fever", 5),
        ]
        .into_iter()
        .map(|(s, w)| (s.to_string(), w))
        .collect();

        Self::from_records(
            vec![
                record(
                    "Fungal infection",
                    &["itching", "skin_rash"],
                    "A fungal infection of the skin.",
                    &["bath twice", "use detol or neem in bathing water"],
                ),
                record(
                    "Diabetes",
                    &["fatigue", "lethargy", "excessive_thirst", "frequent_urination", "polyuria"],
                    "A group of metabolic diseases with high blood sugar.",
                    &["have balanced diet", "exercise", "consult doctor", "follow up"],
                ),
                record(
                    "Malaria",
                    &["chills", "vomiting", "high_fever", "sweating", "headache"],
                    "A mosquito-borne infectious disease.",
                    &["consult nearest hospital", "avoid oily food"],
                ),
                record(
                    "Anemia",
                    &["lethargy", "pallor", "weakness_in_limbs"],
                    "",
                    &[],
                ),
                record("Chicken pox", &["itching", "skin_rash", "mild_fever"], "", &[]),
            ],
            severity,
        )
    }
}
