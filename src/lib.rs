pub mod cli;
pub mod commands;
pub mod config;
pub mod core_state;
pub mod diagnoser; // Report Diagnoser
pub mod history; // History Log + insights
pub mod lookup; // Fuzzy search + disease detail
pub mod models;
pub mod normalize; // Symptom Normalizer
pub mod reference; // Reference Store
pub mod scan; // Report Scanner (image -> OCR -> diagnosis)
pub mod severity; // Severity Classifier

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

pub fn run() -> ExitCode {
    // Initialize tracing. Logs go to stderr so stdout stays clean for --json.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    cli::start_cli()
}
