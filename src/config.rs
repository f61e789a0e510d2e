use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "Telehealth";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shown under every detail and scan result.
pub const DISCLAIMER: &str = "Educational use only. Not a medical diagnosis.";

pub const ENV_DATA_DIR: &str = "TELEHEALTH_DATA_DIR";
pub const ENV_HISTORY_FILE: &str = "TELEHEALTH_HISTORY_FILE";
pub const ENV_TESSERACT_CMD: &str = "TELEHEALTH_TESSERACT_CMD";
pub const ENV_OCR_LANG: &str = "TELEHEALTH_OCR_LANG";

/// Reference dataset file names, relative to the data directory.
pub const SYMPTOMS_FILE: &str = "dataset.csv";
pub const DESCRIPTIONS_FILE: &str = "symptom_Description.csv";
pub const PRECAUTIONS_FILE: &str = "symptom_precaution.csv";
pub const SEVERITY_FILE: &str = "Symptom-severity.csv";

pub const HISTORY_FILE_NAME: &str = "patient_history.csv";
pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";

/// Log filter used when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "telehealth=info,telehealth_lib=info"
}

/// Get the application data directory
/// ~/Telehealth/ on all platforms, or the working directory when no home exists.
pub fn app_data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(APP_NAME),
        None => PathBuf::from("."),
    }
}

/// Reference dataset directory used when nothing else is configured.
pub fn default_data_dir() -> PathBuf {
    Path::new("dataset").join("Disease symptom prediction")
}

/// History log location used when nothing else is configured.
pub fn default_history_file() -> PathBuf {
    app_data_dir().join(HISTORY_FILE_NAME)
}

/// Resolved runtime settings. Built once in `cli` from flags/env/defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub history_file: PathBuf,
    pub tesseract_cmd: String,
    /// Tesseract language list ("eng", "eng+fra"). `None` uses tesseract's default.
    pub ocr_lang: Option<String>,
}

impl AppConfig {
    pub fn new(
        data_dir: Option<PathBuf>,
        history_file: Option<PathBuf>,
        tesseract_cmd: Option<String>,
    ) -> Self {
        Self {
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            history_file: history_file.unwrap_or_else(default_history_file),
            tesseract_cmd: tesseract_cmd.unwrap_or_else(|| DEFAULT_TESSERACT_CMD.to_string()),
            ocr_lang: None,
        }
    }

    pub fn with_ocr_lang(mut self, lang: Option<String>) -> Self {
        self.ocr_lang = lang.filter(|l| !l.trim().is_empty());
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}
