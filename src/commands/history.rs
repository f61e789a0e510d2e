//! History table and insights (counts per disease) views.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bar;
use crate::core_state::CoreState;
use crate::history::insights::{self, DiseaseCount};
use crate::models::HistoryEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryView {
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsView {
    pub total: usize,
    pub counts: Vec<DiseaseCount>,
}

pub fn get_history(state: &CoreState) -> Result<HistoryView, String> {
    let entries = state.history.read_all().map_err(|e| e.to_string())?;
    Ok(HistoryView { entries })
}

pub fn get_insights(state: &CoreState) -> Result<InsightsView, String> {
    let entries = state.history.read_all().map_err(|e| e.to_string())?;
    Ok(InsightsView {
        total: entries.len(),
        counts: insights::counts(&entries),
    })
}

impl fmt::Display for HistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No history yet.");
        }
        writeln!(f, "{:>5}  disease", "#")?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{i:>5}  {}", entry.disease)?;
        }
        Ok(())
    }
}

impl fmt::Display for InsightsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counts.is_empty() {
            return writeln!(f, "No history yet.");
        }
        let width = self
            .counts
            .iter()
            .map(|c| c.disease.chars().count())
            .max()
            .unwrap_or(0);
        let max = self.counts.first().map(|c| c.count).unwrap_or(0);
        for c in &self.counts {
            writeln!(
                f,
                "{:<width$}  {} {}",
                c.disease,
                bar(c.count, max),
                c.count
            )?;
        }
        writeln!(f, "\n{} lookups saved", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::reference::ReferenceStore;

    fn state(dir: &tempfile::TempDir) -> CoreState {
        let config = AppConfig::new(None, Some(dir.path().join("history.csv")), None);
        CoreState::with_store(config, ReferenceStore::load_test())
    }

    #[test]
    fn empty_history_views() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        assert_eq!(get_history(&state).unwrap().to_string(), "No history yet.\n");
        assert_eq!(get_insights(&state).unwrap().to_string(), "No history yet.\n");
    }

    #[test]
    fn insights_chart_lists_most_frequent_first() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        for name in ["Acne", "Malaria", "Malaria"] {
            state.history.append(name).unwrap();
        }

        let view = get_insights(&state).unwrap();
        assert_eq!(view.total, 3);
        assert_eq!(view.counts[0].disease, "Malaria");

        let text = view.to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("Malaria"));
        assert!(first.ends_with(" 2"));
        assert!(text.contains("3 lookups saved"));
    }

    #[test]
    fn history_table_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        state.history.append("Typhoid").unwrap();
        state.history.append("Acne").unwrap();
        let view = get_history(&state).unwrap();
        let names: Vec<_> = view.entries.iter().map(|e| e.disease.as_str()).collect();
        assert_eq!(names, vec!["Typhoid", "Acne"]);
    }

    #[test]
    fn malformed_history_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        std::fs::write(state.history.path(), "name\nAcne\n").unwrap();
        assert!(get_history(&state).is_err());
    }
}
