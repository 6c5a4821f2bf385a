use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::BrierError;
use crate::writer::WARNING_COLUMN;

/// Config file looked up at the repo root. Absent means all defaults.
pub const CONFIG_FILE: &str = "brier.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct BrierConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub columns: ColumnMapping,
}

impl Default for BrierConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            paths: PathsConfig::default(),
            columns: ColumnMapping::default(),
        }
    }
}

fn default_delimiter() -> String {
    ",".into()
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Table locations, relative to the repo root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub locked: String,
    pub outcomes: String,
    pub scored: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            locked: "data/locked_predictions.csv".into(),
            outcomes: "data/outcomes.csv".into(),
            scored: "data/outcomes_scored.csv".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Header names of the input tables. The scored table reuses them for its
/// first eight columns.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub id: String,
    pub identifier: String,
    pub probability: String,
    pub outcome_binary: String,
    pub outcome_date: String,
    pub outcome_source: String,
    pub termination_reason: String,
    pub brier_score: String,
    pub adjudication_notes: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            id: "id".into(),
            identifier: "identifier".into(),
            probability: "probability".into(),
            outcome_binary: "outcomeBinary".into(),
            outcome_date: "outcomeDate".into(),
            outcome_source: "outcomeSource".into(),
            termination_reason: "terminationReason".into(),
            brier_score: "brierScore".into(),
            adjudication_notes: "adjudicationNotes".into(),
        }
    }
}

impl ColumnMapping {
    pub fn locked_required(&self) -> [&str; 3] {
        [self.id.as_str(), self.identifier.as_str(), self.probability.as_str()]
    }

    /// First eight columns of the scored table, in output order.
    pub fn scored_columns(&self) -> [&str; 8] {
        [
            self.identifier.as_str(),
            self.probability.as_str(),
            self.outcome_binary.as_str(),
            self.brier_score.as_str(),
            self.outcome_date.as_str(),
            self.outcome_source.as_str(),
            self.termination_reason.as_str(),
            self.adjudication_notes.as_str(),
        ]
    }

    pub fn outcomes_required(&self) -> [&str; 7] {
        [
            self.identifier.as_str(),
            self.outcome_binary.as_str(),
            self.outcome_date.as_str(),
            self.outcome_source.as_str(),
            self.termination_reason.as_str(),
            self.brier_score.as_str(),
            self.adjudication_notes.as_str(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Loading + validation
// ---------------------------------------------------------------------------

impl BrierConfig {
    pub fn from_toml(input: &str) -> Result<Self, BrierError> {
        let config: BrierConfig =
            toml::from_str(input).map_err(|e| BrierError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `brier.toml` from `repo_root`, falling back to defaults when absent.
    pub fn load(repo_root: &Path) -> Result<Self, BrierError> {
        let path = repo_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let input = std::fs::read_to_string(&path).map_err(|e| BrierError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), BrierError> {
        let delim = self.delimiter.as_bytes();
        if delim.len() != 1 || !delim[0].is_ascii() {
            return Err(BrierError::ConfigValidation(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        if matches!(delim[0], b'"' | b'\n' | b'\r') {
            return Err(BrierError::ConfigValidation(format!(
                "delimiter cannot be {:?}",
                self.delimiter
            )));
        }

        let paths = [
            ("paths.locked", &self.paths.locked),
            ("paths.outcomes", &self.paths.outcomes),
            ("paths.scored", &self.paths.scored),
        ];
        for (key, value) in &paths {
            if value.trim().is_empty() {
                return Err(BrierError::ConfigValidation(format!("{key} cannot be empty")));
            }
        }
        let distinct: HashSet<PathBuf> = paths.iter().map(|(_, v)| normalize_path(v)).collect();
        if distinct.len() != paths.len() {
            return Err(BrierError::ConfigValidation(
                "paths.locked, paths.outcomes and paths.scored must be distinct".into(),
            ));
        }

        let cols = &self.columns;
        for name in cols.locked_required().iter().chain(cols.outcomes_required().iter()) {
            if name.trim().is_empty() {
                return Err(BrierError::ConfigValidation("column names cannot be empty".into()));
            }
        }
        if !all_distinct(&cols.locked_required()) {
            return Err(BrierError::ConfigValidation(
                "locked column names must be distinct".into(),
            ));
        }
        if !all_distinct(&cols.outcomes_required()) {
            return Err(BrierError::ConfigValidation(
                "outcome column names must be distinct".into(),
            ));
        }
        let scored = cols.scored_columns();
        if !all_distinct(&scored) {
            return Err(BrierError::ConfigValidation(
                "scored column names must be distinct".into(),
            ));
        }
        if scored.contains(&WARNING_COLUMN) {
            return Err(BrierError::ConfigValidation(format!(
                "'{WARNING_COLUMN}' is reserved for the scored table"
            )));
        }

        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}

fn all_distinct(names: &[&str]) -> bool {
    names.iter().collect::<HashSet<_>>().len() == names.len()
}

/// Lexical normalization: drops `.` and folds `..` into the preceding
/// component, so `./data/x.csv` and `data/../data/x.csv` compare equal.
fn normalize_path(path: &str) -> PathBuf {
    let mut out = PathBuf::new();
    for component in Path::new(path.trim()).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
