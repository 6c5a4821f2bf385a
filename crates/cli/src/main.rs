// Brier CLI - score locked forecasts against observed outcomes

mod exit_codes;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use brier_recon::{BrierConfig, BrierError};
use exit_codes::{brier_exit_code, EXIT_ERROR, EXIT_MISSING_FILE, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "brier")]
#[command(about = "Reconcile locked predictions against outcomes and compute Brier scores")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Reads data/locked_predictions.csv and data/outcomes.csv under the repo root and
writes data/outcomes_scored.csv. Paths, column names and the delimiter can be
overridden in <repo-root>/brier.toml. Set RUST_LOG=info for progress output.

Examples:
  brier
  brier --repo-root ~/forecasts
  brier --repo-root . --update-outcomes")]
struct Cli {
    /// Path to the repo root
    #[arg(long, default_value = ".")]
    repo_root: PathBuf,

    /// Fill the Brier score column in the outcomes table where computable
    #[arg(long)]
    update_outcomes: bool,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  brier-recon ", env!("CARGO_PKG_VERSION"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match cmd_score(cli.repo_root, cli.update_outcomes) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn cmd_score(repo_root: PathBuf, update_outcomes: bool) -> Result<(), CliError> {
    let repo_root = std::path::absolute(&repo_root).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot resolve repo root {}: {e}", repo_root.display()),
        hint: None,
    })?;

    let config = BrierConfig::load(&repo_root)?;
    log::info!(
        "scoring {} against {} in {}",
        config.paths.outcomes,
        config.paths.locked,
        repo_root.display()
    );

    let report = brier_recon::run(&repo_root, &config, update_outcomes)?;
    print!("{}", report::render_summary(&report, &config.columns.brier_score));
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl From<BrierError> for CliError {
    fn from(err: BrierError) -> Self {
        let code = brier_exit_code(&err);
        let hint = (code == EXIT_MISSING_FILE)
            .then(|| "pass --repo-root pointing at the directory that contains data/".to_string());
        Self { code, message: err.to_string(), hint }
    }
}
