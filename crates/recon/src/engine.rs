use std::path::{Path, PathBuf};

use crate::config::BrierConfig;
use crate::error::BrierError;
use crate::loader::{load_locked, load_outcomes};
use crate::model::ScoreSummary;
use crate::scorer::score_outcomes;
use crate::writer::{render_outcomes, render_scored};

/// What a run did: counts plus the files it wrote.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub repo_root: PathBuf,
    pub summary: ScoreSummary,
    /// Scored table path, relative to the repo root.
    pub scored_path: String,
    /// Outcomes table path when it was rewritten.
    pub updated_outcomes_path: Option<String>,
}

/// Load, join, score and write.
///
/// Both inputs are loaded and validated and every row scored before anything
/// is written, so a failing run leaves earlier outputs as they were.
pub fn run(repo_root: &Path, config: &BrierConfig, update_outcomes: bool) -> Result<RunReport, BrierError> {
    config.validate()?;
    let paths = &config.paths;

    let locked_data = read_input(repo_root, &paths.locked)?;
    let locked = load_locked(&paths.locked, &locked_data, config)?;

    let outcomes_data = read_input(repo_root, &paths.outcomes)?;
    let outcomes = load_outcomes(&paths.outcomes, &outcomes_data, config)?;

    let result = score_outcomes(&locked, &outcomes.records, &config.columns);

    let delimiter = config.delimiter_byte();
    let scored_csv = render_scored(&paths.scored, &result.scored, &config.columns, delimiter)?;
    let outcomes_csv = if update_outcomes {
        Some(render_outcomes(
            &paths.outcomes,
            &outcomes.headers,
            &result.updated_outcomes,
            delimiter,
        )?)
    } else {
        None
    };

    write_output(repo_root, &paths.scored, &scored_csv)?;
    let updated_outcomes_path = match outcomes_csv {
        Some(csv) => {
            write_output(repo_root, &paths.outcomes, &csv)?;
            Some(paths.outcomes.clone())
        }
        None => None,
    };

    Ok(RunReport {
        repo_root: repo_root.to_path_buf(),
        summary: result.summary,
        scored_path: paths.scored.clone(),
        updated_outcomes_path,
    })
}

fn read_input(repo_root: &Path, rel: &str) -> Result<String, BrierError> {
    let path = repo_root.join(rel);
    if !path.exists() {
        return Err(BrierError::MissingFile {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(&path).map_err(|e| BrierError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Atomic write: write a sibling `.tmp` file, then rename over the target.
fn write_output(repo_root: &Path, rel: &str, contents: &str) -> Result<(), BrierError> {
    let path = repo_root.join(rel);
    let io_err = |e: std::io::Error| BrierError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, contents).map_err(io_err)?;
    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_err(e));
    }

    log::info!("wrote {}", path.display());
    Ok(())
}
