// Property-based tests for join + scoring.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;

use brier_recon::config::{BrierConfig, ColumnMapping};
use brier_recon::loader::load_outcomes;
use brier_recon::scorer::{brier, score_outcomes};
use brier_recon::writer::render_outcomes;
use brier_recon::{LockedBook, LockedPrediction, OutcomeRecord, RawRow, ScoreStatus};

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Small identifier alphabet so joins hit and miss.
fn arb_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        r"NCT0000000[0-9]",
        r"(ACT|ASAP)-PD",
        r"[a-z]{1,3}",
    ]
}

fn arb_outcome() -> impl Strategy<Value = Option<u8>> {
    prop_oneof![
        1 => Just(None),
        2 => (0u8..=1).prop_map(Some),
    ]
}

fn arb_locked() -> impl Strategy<Value = LockedBook> {
    prop::collection::btree_map(arb_identifier(), 0.0..=1.0f64, 0..12).prop_map(|entries| {
        let mut book = LockedBook::new();
        for (i, (identifier, probability)) in entries.into_iter().enumerate() {
            book.insert(LockedPrediction {
                id: format!("P{i}"),
                identifier,
                probability,
            })
            .unwrap();
        }
        book
    })
}

fn make_outcome(identifier: String, outcome: Option<u8>, cohort: String) -> OutcomeRecord {
    let mut raw = RawRow::new();
    raw.set("cohort", cohort);
    raw.set("identifier", identifier.clone());
    raw.set("outcomeBinary", outcome.map(|o| o.to_string()).unwrap_or_default());
    raw.set("outcomeDate", "");
    raw.set("outcomeSource", "");
    raw.set("terminationReason", "");
    raw.set("brierScore", "");
    raw.set("adjudicationNotes", "");
    OutcomeRecord {
        identifier,
        outcome_binary: outcome,
        outcome_date: String::new(),
        outcome_source: String::new(),
        termination_reason: String::new(),
        brier_score: None,
        adjudication_notes: String::new(),
        raw,
    }
}

fn arb_outcomes() -> impl Strategy<Value = Vec<OutcomeRecord>> {
    prop::collection::vec((arb_identifier(), arb_outcome(), r"[a-z,]{0,8}"), 0..24)
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(id, outcome, cohort)| make_outcome(id, outcome, cohort))
                .collect()
        })
}

const HEADERS: [&str; 8] = [
    "cohort",
    "identifier",
    "outcomeBinary",
    "outcomeDate",
    "outcomeSource",
    "terminationReason",
    "brierScore",
    "adjudicationNotes",
];

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn brier_is_squared_error_in_unit_range(p in 0.0..=1.0f64, o in 0u8..=1) {
        let score = brier(p, o);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert!((score - (p - o as f64).powi(2)).abs() < 1e-12);
    }

    #[test]
    fn one_scored_row_per_outcome(locked in arb_locked(), outcomes in arb_outcomes()) {
        let result = score_outcomes(&locked, &outcomes, &ColumnMapping::default());
        prop_assert_eq!(result.scored.len(), outcomes.len());
        prop_assert_eq!(result.updated_outcomes.len(), outcomes.len());

        let s = &result.summary;
        prop_assert_eq!(s.computed + s.missing_outcome + s.unmatched, outcomes.len());

        for (row, record) in result.scored.iter().zip(&outcomes) {
            prop_assert_eq!(&row.identifier, &record.identifier);
            match locked.get(&record.identifier) {
                None => {
                    prop_assert_eq!(row.status, ScoreStatus::Unmatched);
                    prop_assert!(row.score.is_none());
                }
                Some(lock) => match record.outcome_binary {
                    None => prop_assert_eq!(row.status, ScoreStatus::MissingOutcome),
                    Some(o) => {
                        let score = row.score.unwrap();
                        prop_assert!((score - (lock.probability - o as f64).powi(2)).abs() < 1e-12);
                        prop_assert!((0.0..=1.0).contains(&score));
                    }
                },
            }
        }
    }

    #[test]
    fn rewrite_reaches_fixed_point(locked in arb_locked(), outcomes in arb_outcomes()) {
        let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        let config = BrierConfig::default();

        let first = score_outcomes(&locked, &outcomes, &config.columns);
        let first_csv = render_outcomes("outcomes.csv", &headers, &first.updated_outcomes, b',').unwrap();

        let reloaded = load_outcomes("outcomes.csv", &first_csv, &config).unwrap();
        prop_assert_eq!(&reloaded.headers, &headers);
        let second = score_outcomes(&locked, &reloaded.records, &config.columns);
        let second_csv = render_outcomes("outcomes.csv", &reloaded.headers, &second.updated_outcomes, b',').unwrap();

        prop_assert_eq!(first_csv, second_csv);
    }
}
