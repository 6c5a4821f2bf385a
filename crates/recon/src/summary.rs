use crate::model::{ScoreStatus, ScoreSummary, ScoredRow};

/// Tally scored rows by status.
pub fn compute_summary(locked: usize, rows: &[ScoredRow]) -> ScoreSummary {
    let mut summary = ScoreSummary {
        locked,
        outcomes: rows.len(),
        ..ScoreSummary::default()
    };

    for row in rows {
        match row.status {
            ScoreStatus::Computed => summary.computed += 1,
            ScoreStatus::MissingOutcome => summary.missing_outcome += 1,
            ScoreStatus::Unmatched => summary.unmatched += 1,
        }
    }

    summary
}
