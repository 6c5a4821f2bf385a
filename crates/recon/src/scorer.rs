use crate::config::ColumnMapping;
use crate::model::{LockedBook, OutcomeRecord, ScoreResult, ScoreStatus, ScoredRow};
use crate::summary::compute_summary;
use crate::writer::format_float;

/// Brier score of a single forecast: `(p - o)^2`.
pub fn brier(probability: f64, outcome: u8) -> f64 {
    let diff = probability - f64::from(outcome);
    diff * diff
}

/// Join each outcome to its locked prediction and score it.
///
/// Produces exactly one scored row and one updated outcome row per input
/// record, in input order. Only computed rows get `brierScore` overwritten.
pub fn score_outcomes(
    locked: &LockedBook,
    outcomes: &[OutcomeRecord],
    columns: &ColumnMapping,
) -> ScoreResult {
    let mut scored = Vec::with_capacity(outcomes.len());
    let mut updated_outcomes = Vec::with_capacity(outcomes.len());

    for record in outcomes {
        let mut raw = record.raw.clone();
        let row = match locked.get(&record.identifier) {
            None => ScoredRow {
                outcome: record.outcome_binary,
                ..base_row(record, ScoreStatus::Unmatched)
            },
            Some(lock) => match record.outcome_binary {
                None => ScoredRow {
                    probability: Some(lock.probability),
                    ..base_row(record, ScoreStatus::MissingOutcome)
                },
                Some(outcome) => {
                    let score = brier(lock.probability, outcome);
                    raw.set(&columns.brier_score, format_float(score));
                    ScoredRow {
                        probability: Some(lock.probability),
                        outcome: Some(outcome),
                        score: Some(score),
                        ..base_row(record, ScoreStatus::Computed)
                    }
                }
            },
        };

        if row.status != ScoreStatus::Computed {
            log::debug!("{} {}: {}", row.status, row.identifier, row.warning());
        }
        scored.push(row);
        updated_outcomes.push(raw);
    }

    let summary = compute_summary(locked.len(), &scored);
    ScoreResult {
        scored,
        updated_outcomes,
        summary,
    }
}

fn base_row(record: &OutcomeRecord, status: ScoreStatus) -> ScoredRow {
    ScoredRow {
        identifier: record.identifier.clone(),
        probability: None,
        outcome: None,
        score: None,
        outcome_date: record.outcome_date.clone(),
        outcome_source: record.outcome_source.clone(),
        termination_reason: record.termination_reason.clone(),
        adjudication_notes: record.adjudication_notes.clone(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LockedPrediction;
    use crate::table::RawRow;

    fn book(entries: &[(&str, f64)]) -> LockedBook {
        let mut book = LockedBook::new();
        for (i, (identifier, p)) in entries.iter().enumerate() {
            book.insert(LockedPrediction {
                id: format!("P{i}"),
                identifier: (*identifier).into(),
                probability: *p,
            })
            .unwrap();
        }
        book
    }

    fn outcome(identifier: &str, outcome: Option<u8>, brier_score: &str) -> OutcomeRecord {
        let mut raw = RawRow::new();
        raw.set("identifier", identifier);
        raw.set("outcomeBinary", outcome.map(|o| o.to_string()).unwrap_or_default());
        raw.set("brierScore", brier_score);
        raw.set("extra", "keep me");
        OutcomeRecord {
            identifier: identifier.into(),
            outcome_binary: outcome,
            outcome_date: "2025-06-30".into(),
            outcome_source: "registry".into(),
            termination_reason: String::new(),
            brier_score: brier_score.parse().ok(),
            adjudication_notes: String::new(),
            raw,
        }
    }

    #[test]
    fn brier_values() {
        assert_eq!(brier(1.0, 1), 0.0);
        assert_eq!(brier(0.0, 1), 1.0);
        assert_eq!(brier(0.5, 0), 0.25);
        assert!((brier(0.7, 1) - 0.09).abs() < 1e-12);
    }

    #[test]
    fn matched_with_outcome_is_computed() {
        let locked = book(&[("X", 0.7)]);
        let result = score_outcomes(&locked, &[outcome("X", Some(1), "")], &ColumnMapping::default());
        let row = &result.scored[0];
        assert_eq!(row.status, ScoreStatus::Computed);
        assert_eq!(row.probability, Some(0.7));
        assert_eq!(row.outcome, Some(1));
        assert!((row.score.unwrap() - 0.09).abs() < 1e-12);
        assert_eq!(row.warning(), "");
        assert_eq!(result.updated_outcomes[0].get("brierScore"), "0.090000");
        assert_eq!(result.updated_outcomes[0].get("extra"), "keep me");
    }

    #[test]
    fn unmatched_keeps_outcome_and_existing_score() {
        let locked = book(&[("X", 0.7)]);
        let result = score_outcomes(&locked, &[outcome("Z", Some(0), "0.5")], &ColumnMapping::default());
        let row = &result.scored[0];
        assert_eq!(row.status, ScoreStatus::Unmatched);
        assert_eq!(row.probability, None);
        assert_eq!(row.outcome, Some(0));
        assert_eq!(row.score, None);
        assert_eq!(row.warning(), "No matching locked prediction found for identifier");
        assert_eq!(row.status.to_string(), "unmatched");
        assert_eq!(result.updated_outcomes[0].get("brierScore"), "0.5");
    }

    #[test]
    fn missing_outcome_not_scored() {
        let locked = book(&[("Y", 0.2)]);
        let result = score_outcomes(&locked, &[outcome("Y", None, "")], &ColumnMapping::default());
        let row = &result.scored[0];
        assert_eq!(row.status, ScoreStatus::MissingOutcome);
        assert_eq!(row.probability, Some(0.2));
        assert_eq!(row.outcome, None);
        assert_eq!(row.score, None);
        assert_eq!(row.warning(), "Outcome missing; cannot compute score");
        assert_eq!(row.status.to_string(), "missing_outcome");
        assert_eq!(result.updated_outcomes[0].get("brierScore"), "");
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        let locked = book(&[("nct001", 0.4)]);
        let result = score_outcomes(&locked, &[outcome("NCT001", Some(1), "")], &ColumnMapping::default());
        assert_eq!(result.scored[0].status, ScoreStatus::Unmatched);
    }

    #[test]
    fn stale_score_overwritten() {
        let locked = book(&[("X", 0.7)]);
        let result = score_outcomes(&locked, &[outcome("X", Some(0), "0.123")], &ColumnMapping::default());
        assert_eq!(result.updated_outcomes[0].get("brierScore"), "0.490000");
    }

    #[test]
    fn order_and_counts_preserved() {
        let locked = book(&[("A", 0.9), ("B", 0.1)]);
        let outcomes = vec![
            outcome("B", Some(0), ""),
            outcome("Q", None, ""),
            outcome("A", None, ""),
            outcome("A", Some(1), ""),
        ];
        let result = score_outcomes(&locked, &outcomes, &ColumnMapping::default());
        let ids: Vec<_> = result.scored.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["B", "Q", "A", "A"]);
        assert_eq!(result.updated_outcomes.len(), 4);
        assert_eq!(result.summary.locked, 2);
        assert_eq!(result.summary.outcomes, 4);
        assert_eq!(result.summary.computed, 2);
        assert_eq!(result.summary.missing_outcome, 1);
        assert_eq!(result.summary.unmatched, 1);
    }
}
