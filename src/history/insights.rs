//! Aggregate view over the history log: how often each disease was saved.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::HistoryEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseCount {
    pub disease: String,
    pub count: usize,
}

/// Counts per disease, most frequent first; equal counts by name.
pub fn counts(entries: &[HistoryEntry]) -> Vec<DiseaseCount> {
    let mut tally: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *tally.entry(entry.disease.as_str()).or_default() += 1;
    }

    let mut counts: Vec<DiseaseCount> = tally
        .into_iter()
        .map(|(disease, count)| DiseaseCount {
            disease: disease.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.disease.cmp(&b.disease)));
    counts
}
