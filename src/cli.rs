//! Command-line front-end: argument parsing and dispatch to `commands`.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use crate::commands;
use crate::config::{self, AppConfig};
use crate::core_state::CoreState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Telehealth disease reference lookup and report scanner", long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Directory holding the four reference CSV files
    #[arg(long, global = true, env = config::ENV_DATA_DIR, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Lookup history CSV file
    #[arg(long, global = true, env = config::ENV_HISTORY_FILE, value_name = "FILE")]
    pub history_file: Option<PathBuf>,
    /// Tesseract executable used by `scan`
    #[arg(long, global = true, env = config::ENV_TESSERACT_CMD, value_name = "CMD")]
    pub tesseract_cmd: Option<String>,
    /// Tesseract language list, e.g. "eng" or "eng+fra"
    #[arg(long, global = true, env = config::ENV_OCR_LANG, value_name = "LANGS")]
    pub ocr_lang: Option<String>,
    /// Print views as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Fuzzy-search disease names
    Search {
        query: String,
        /// Also print the detail of the best match
        #[arg(long)]
        show: bool,
    },
    /// Show symptoms, description and precautions for one disease
    Show {
        disease: String,
        /// Record this lookup in the history
        #[arg(long)]
        save: bool,
    },
    /// Lookup counts per disease
    Insights,
    /// Raw lookup history
    History,
    /// OCR a report image (PNG/JPEG) and score diseases
    Scan { image: PathBuf },
    /// Score diseases from already-extracted report text ('-' reads stdin)
    DiagnoseText { input: PathBuf },
}

impl CliArgs {
    pub fn app_config(&self) -> AppConfig {
        AppConfig::new(
            self.data_dir.clone(),
            self.history_file.clone(),
            self.tesseract_cmd.clone(),
        )
        .with_ocr_lang(self.ocr_lang.clone())
    }
}

/// Parse arguments, load state and run one command.
pub fn start_cli() -> ExitCode {
    let args = CliArgs::parse();

    let state = match CoreState::load(args.app_config()) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Cannot load reference data");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch(&state, &args.command, args.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run a command against loaded state and print its view.
pub fn dispatch(state: &CoreState, command: &Commands, json: bool) -> Result<(), String> {
    match command {
        Commands::Search { query, show } => {
            emit(&commands::search::search(state, query, *show), json)
        }
        Commands::Show { disease, save } => {
            emit(&commands::search::show(state, disease, *save), json)
        }
        Commands::Insights => emit(&commands::history::get_insights(state)?, json),
        Commands::History => emit(&commands::history::get_history(state)?, json),
        Commands::Scan { image } => {
            let bytes = std::fs::read(image)
                .map_err(|e| format!("Cannot read {}: {e}", image.display()))?;
            let engine = state.ocr_engine();
            emit(&commands::scan::scan_image(state, &bytes, &engine)?, json)
        }
        Commands::DiagnoseText { input } => {
            let text = read_input(input)?;
            emit(&commands::scan::diagnose_text(state, &text), json)
        }
    }
}

fn read_input(input: &Path) -> Result<String, String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("Cannot read stdin: {e}"))?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).map_err(|e| format!("Cannot read {}: {e}", input.display()))
    }
}

fn emit<V: Serialize + std::fmt::Display>(view: &V, json: bool) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(view).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print!("{view}");
    }
    Ok(())
}
