use serde::{Deserialize, Serialize};

/// One disease as assembled from the symptom, description and precaution tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    pub symptoms: Vec<String>,
    pub description: String,
    pub precautions: Vec<String>,
}

/// A single row of the lookup history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub disease: String,
}

impl HistoryEntry {
    pub fn new(disease: impl Into<String>) -> Self {
        Self {
            disease: disease.into(),
        }
    }
}
