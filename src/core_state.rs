//! Application state shared by every command.
//!
//! Built once at process start: the reference store is loaded here and then
//! only borrowed. Single-threaded, so no locking.

use tracing::warn;

use crate::config::AppConfig;
use crate::history::{HistoryError, HistoryLog};
use crate::reference::{ReferenceError, ReferenceStore};
use crate::scan::TesseractCli;

pub struct CoreState {
    pub config: AppConfig,
    pub store: ReferenceStore,
    pub history: HistoryLog,
}

impl CoreState {
    /// Load reference data. Fails only on configuration errors.
    pub fn load(config: AppConfig) -> Result<Self, ReferenceError> {
        let store = ReferenceStore::load(&config.data_dir)?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: AppConfig, store: ReferenceStore) -> Self {
        let history = HistoryLog::new(config.history_file.clone());
        Self {
            config,
            store,
            history,
        }
    }

    pub fn ocr_engine(&self) -> TesseractCli {
        let engine = TesseractCli::new(self.config.tesseract_cmd.clone());
        match self.config.ocr_lang {
            Some(ref lang) => engine.with_languages(lang),
            None => engine,
        }
    }

    /// Record a lookup. Failures are logged and handed back as a warning
    /// string; they never abort the calling command.
    pub fn record_lookup(&self, disease: &str) -> Option<String> {
        match self.history.append(disease) {
            Ok(()) => None,
            Err(e) => {
                warn!(disease = %disease, error = %e, "Could not save lookup to history");
                Some(history_warning(&e))
            }
        }
    }
}

fn history_warning(e: &HistoryError) -> String {
    format!("Lookup not saved to history: {e}")
}
