use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::enums::Marker;

/// A clinical marker value read out of report text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerReading {
    pub marker: Marker,
    pub value: f64,
    /// Whether the value crossed the marker's trigger threshold.
    pub triggered: bool,
}

/// Outcome of scoring one report. Transient, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub markers: Vec<MarkerReading>,
    /// Symptoms implied by the triggered markers, before synonym expansion.
    pub raw_symptoms: BTreeSet<String>,
    /// Canonical dataset symptom identifiers.
    pub detected_symptoms: BTreeSet<String>,
    /// Disease name -> overlap score. Only diseases with a non-zero score.
    pub disease_scores: BTreeMap<String, usize>,
}

impl Diagnosis {
    /// Highest-scoring disease. Ties go to the lexicographically smallest name.
    pub fn best_match(&self) -> Option<(&str, usize)> {
        // BTreeMap iterates in ascending name order, so keeping the first
        // strictly-greater score yields the smallest name among ties.
        let mut best: Option<(&str, usize)> = None;
        for (name, &score) in &self.disease_scores {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((name.as_str(), score)),
            }
        }
        best
    }

    /// All scored diseases, score descending then name ascending.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .disease_scores
            .iter()
            .map(|(name, &score)| (name.as_str(), score))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn is_empty(&self) -> bool {
        self.detected_symptoms.is_empty() && self.disease_scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_scores(scores: &[(&str, usize)]) -> Diagnosis {
        Diagnosis {
            disease_scores: scores.iter().map(|(n, s)| (n.to_string(), *s)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn best_match_picks_highest_score() {
        let d = with_scores(&[("Anemia", 1), ("Diabetes", 3), ("Malaria", 2)]);
        assert_eq!(d.best_match(), Some(("Diabetes", 3)));
    }

    #[test]
    fn best_match_tie_breaks_on_name() {
        let d = with_scores(&[("Typhoid", 2), ("Malaria", 2), ("Dengue", 2), ("Acne", 1)]);
        assert_eq!(d.best_match(), Some(("Dengue", 2)));
    }

    #[test]
    fn best_match_none_when_empty() {
        assert_eq!(Diagnosis::default().best_match(), None);
        assert!(Diagnosis::default().is_empty());
    }

    #[test]
    fn ranked_orders_by_score_then_name() {
        let d = with_scores(&[("Typhoid", 2), ("Malaria", 2), ("Acne", 1), ("Diabetes", 3)]);
        assert_eq!(
            d.ranked(),
            vec![("Diabetes", 3), ("Malaria", 2), ("Typhoid", 2), ("Acne", 1)]
        );
    }
}
