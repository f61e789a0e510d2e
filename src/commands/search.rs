//! Disease search and detail views.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DISCLAIMER;
use crate::core_state::CoreState;
use crate::lookup::{self, DiseaseDetail};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchView {
    pub query: String,
    pub matches: Vec<String>,
    /// Detail of the top match, when requested.
    pub selected: Option<DiseaseDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailView {
    pub query: String,
    pub detail: Option<DiseaseDetail>,
    /// Close names offered when `query` is not an exact disease name.
    pub suggestions: Vec<String>,
    pub saved: bool,
    pub history_warning: Option<String>,
    pub disclaimer: String,
}

/// Fuzzy search; optionally expand the best match into its detail.
pub fn search(state: &CoreState, query: &str, show_top: bool) -> SearchView {
    let matches = lookup::search_diseases(&state.store, query);
    let selected = if show_top {
        matches.first().and_then(|name| lookup::lookup(&state.store, name))
    } else {
        None
    };
    SearchView {
        query: query.to_string(),
        matches,
        selected,
    }
}

/// Detail for one disease. With `save`, the lookup is appended to history;
/// a history failure becomes a warning on the view.
pub fn show(state: &CoreState, disease: &str, save: bool) -> DetailView {
    let detail = lookup::lookup(&state.store, disease.trim());
    let suggestions = if detail.is_none() {
        lookup::search_diseases(&state.store, disease)
    } else {
        Vec::new()
    };

    let (saved, history_warning) = match (&detail, save) {
        (Some(d), true) => match state.record_lookup(&d.name) {
            None => (true, None),
            Some(warning) => (false, Some(warning)),
        },
        _ => (false, None),
    };

    DetailView {
        query: disease.to_string(),
        detail,
        suggestions,
        saved,
        history_warning,
        disclaimer: DISCLAIMER.to_string(),
    }
}

fn write_detail(f: &mut fmt::Formatter<'_>, detail: &DiseaseDetail) -> fmt::Result {
    writeln!(f, "### {}", detail.name)?;
    writeln!(f, "Average severity: {:.1}", detail.average_severity)?;
    writeln!(f)?;
    writeln!(f, "Symptoms")?;
    if detail.symptoms.is_empty() {
        writeln!(f, "  (none listed)")?;
    }
    for s in &detail.symptoms {
        writeln!(f, "  [{:<6}] {} · {}", s.color, s.symptom, s.tier)?;
    }
    writeln!(f)?;
    writeln!(f, "Description")?;
    if detail.description.is_empty() {
        writeln!(f, "  (no description)")?;
    } else {
        writeln!(f, "  {}", detail.description)?;
    }
    writeln!(f)?;
    writeln!(f, "Precautions")?;
    if detail.precautions.is_empty() {
        writeln!(f, "  (none listed)")?;
    }
    for p in &detail.precautions {
        writeln!(f, "  • {p}")?;
    }
    Ok(())
}

impl fmt::Display for SearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matches.is_empty() {
            return writeln!(f, "No diseases match \"{}\".", self.query);
        }
        for (i, name) in self.matches.iter().enumerate() {
            writeln!(f, "{:>2}. {name}", i + 1)?;
        }
        if let Some(ref detail) = self.selected {
            writeln!(f)?;
            write_detail(f, detail)?;
            writeln!(f)?;
            writeln!(f, "⚠ {DISCLAIMER}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail {
            Some(ref detail) => write_detail(f, detail)?,
            None => {
                writeln!(f, "No disease named \"{}\".", self.query)?;
                if !self.suggestions.is_empty() {
                    writeln!(f, "Did you mean: {}", self.suggestions.join(", "))?;
                }
            }
        }
        if self.saved {
            writeln!(f, "\nSaved")?;
        }
        if let Some(ref warning) = self.history_warning {
            writeln!(f, "\nWarning: {warning}")?;
        }
        writeln!(f, "\n⚠ {}", self.disclaimer)
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
    fn search_lists_matches_without_detail() {
        let dir = tempfile::tempdir().unwrap();
        let view = search(&state(&dir), "malaria", false);
        assert_eq!(view.matches.first().map(String::as_str), Some("Malaria"));
        assert!(view.selected.is_none());
    }

    #[test]
    fn search_can_expand_top_match() {
        let dir = tempfile::tempdir().unwrap();
        let view = search(&state(&dir), "Diabetes", true);
        assert_eq!(view.selected.as_ref().map(|d| d.name.as_str()), Some("Diabetes"));
        let text = view.to_string();
        assert!(text.contains("### Diabetes"));
        assert!(text.contains(DISCLAIMER));
    }

    #[test]
    fn empty_search_renders_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let view = search(&state(&dir), "", true);
        assert!(view.matches.is_empty());
        assert!(view.to_string().starts_with("No diseases match"));
    }

    #[test]
    fn show_with_save_appends_history() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        let view = show(&state, "Malaria", true);
        assert!(view.saved);
        assert!(view.history_warning.is_none());
        let entries = state.history.read_all().unwrap();
        assert_eq!(entries.last().map(|e| e.disease.as_str()), Some("Malaria"));
    }

    #[test]
    fn show_unknown_offers_suggestions_and_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir);
        let view = show(&state, "Malara", true);
        assert!(view.detail.is_none());
        assert!(!view.saved);
        assert_eq!(view.suggestions.first().map(String::as_str), Some("Malaria"));
        assert!(state.history.read_all().unwrap().is_empty());
        assert!(view.to_string().contains("Did you mean: Malaria"));
    }

    #[test]
    fn show_still_renders_when_history_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new(None, Some(dir.path().to_path_buf()), None);
        let state = CoreState::with_store(config, ReferenceStore::load_test());
        let view = show(&state, "Malaria", true);
        assert!(view.detail.is_some());
        assert!(!view.saved);
        let rendered = view.to_string();
        assert!(rendered.contains("Warning: Lookup not saved"));
        assert_eq!(rendered.matches("Lookup not saved").count(), 1);
    }

    #[test]
    fn detail_renders_tiers_and_precautions() {
        let dir = tempfile::tempdir().unwrap();
        let text = show(&state(&dir), "Malaria", false).to_string();
        assert!(text.contains("high_fever · Severe"));
        assert!(text.contains("• consult nearest hospital"));
    }
}
