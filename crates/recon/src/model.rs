use std::collections::HashMap;

use crate::table::RawRow;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A probability frozen before its outcome was known.
#[derive(Debug, Clone, PartialEq)]
pub struct LockedPrediction {
    pub id: String,
    pub identifier: String,
    pub probability: f64,
}

/// Locked predictions keyed by identifier. Identifiers are unique.
#[derive(Debug, Clone, Default)]
pub struct LockedBook {
    predictions: Vec<LockedPrediction>,
    index: HashMap<String, usize>,
}

impl LockedBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prediction. Returns it back if the identifier is already taken.
    pub fn insert(&mut self, prediction: LockedPrediction) -> Result<(), LockedPrediction> {
        if self.index.contains_key(&prediction.identifier) {
            return Err(prediction);
        }
        self.index.insert(prediction.identifier.clone(), self.predictions.len());
        self.predictions.push(prediction);
        Ok(())
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, identifier: &str) -> Option<&LockedPrediction> {
        self.index.get(identifier).map(|&i| &self.predictions[i])
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

/// A realized outcome plus adjudication metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRecord {
    pub identifier: String,
    pub outcome_binary: Option<u8>,
    pub outcome_date: String,
    pub outcome_source: String,
    pub termination_reason: String,
    pub brier_score: Option<f64>,
    pub adjudication_notes: String,
    /// Every column of the source row, recognized or not.
    pub raw: RawRow,
}

/// Parsed outcomes table. `headers` keeps the original column order.
#[derive(Debug, Clone)]
pub struct OutcomeTable {
    pub headers: Vec<String>,
    pub records: Vec<OutcomeRecord>,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStatus {
    Computed,
    MissingOutcome,
    Unmatched,
}

impl ScoreStatus {
    /// Warning text for the scored table. Empty when the row was scored.
    pub fn warning(&self) -> &'static str {
        match self {
            Self::Computed => "",
            Self::MissingOutcome => "Outcome missing; cannot compute score",
            Self::Unmatched => "No matching locked prediction found for identifier",
        }
    }
}

impl std::fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Computed => write!(f, "computed"),
            Self::MissingOutcome => write!(f, "missing_outcome"),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// One row of the scored table. Exactly one per outcome record.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub identifier: String,
    pub probability: Option<f64>,
    pub outcome: Option<u8>,
    pub score: Option<f64>,
    pub outcome_date: String,
    pub outcome_source: String,
    pub termination_reason: String,
    pub adjudication_notes: String,
    pub status: ScoreStatus,
}

impl ScoredRow {
    pub fn warning(&self) -> &'static str {
        self.status.warning()
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSummary {
    pub locked: usize,
    pub outcomes: usize,
    pub computed: usize,
    pub missing_outcome: usize,
    pub unmatched: usize,
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub scored: Vec<ScoredRow>,
    /// Outcome rows in input order, `brierScore` filled where computed.
    pub updated_outcomes: Vec<RawRow>,
    pub summary: ScoreSummary,
}
