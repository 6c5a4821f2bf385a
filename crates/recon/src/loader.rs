use crate::config::BrierConfig;
use crate::error::BrierError;
use crate::model::{LockedBook, LockedPrediction, OutcomeRecord, OutcomeTable};
use crate::table::Table;

/// Parse the locked predictions table.
///
/// Every row needs `id`, `identifier` and `probability`; probability must be a
/// number in [0, 1] and identifiers must be unique. Other columns are ignored.
pub fn load_locked(name: &str, data: &str, config: &BrierConfig) -> Result<LockedBook, BrierError> {
    let cols = &config.columns;
    let table = Table::parse(name, data, config.delimiter_byte())?;
    table.require_columns(name, &cols.locked_required())?;

    let mut book = LockedBook::new();
    for (i, row) in table.rows.iter().enumerate() {
        let id = row.get(&cols.id);
        let identifier = row.get(&cols.identifier);
        let probability = row.get(&cols.probability);

        if id.is_empty() || identifier.is_empty() || probability.is_empty() {
            return Err(BrierError::MalformedTable {
                table: name.to_string(),
                reason: format!(
                    "row {} is missing {}/{}/{}",
                    i + 1,
                    cols.id,
                    cols.identifier,
                    cols.probability
                ),
            });
        }

        let probability = parse_unit_float(probability).map_err(|reason| BrierError::InvalidValue {
            table: name.to_string(),
            field: cols.probability.clone(),
            identifier: identifier.to_string(),
            value: probability.to_string(),
            reason,
        })?;

        let prediction = LockedPrediction {
            id: id.to_string(),
            identifier: identifier.to_string(),
            probability,
        };
        if let Err(dup) = book.insert(prediction) {
            return Err(BrierError::DuplicateKey {
                table: name.to_string(),
                identifier: dup.identifier,
            });
        }
    }

    log::info!("{name}: {} locked predictions", book.len());
    Ok(book)
}

/// Parse the outcomes table, keeping header order and unrecognized columns.
pub fn load_outcomes(name: &str, data: &str, config: &BrierConfig) -> Result<OutcomeTable, BrierError> {
    let cols = &config.columns;
    let table = Table::parse(name, data, config.delimiter_byte())?;
    table.require_columns(name, &cols.outcomes_required())?;

    let mut records = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.into_iter().enumerate() {
        let identifier = row.get(&cols.identifier).to_string();
        if identifier.is_empty() {
            return Err(BrierError::MalformedTable {
                table: name.to_string(),
                reason: format!("row {} is missing {}", i + 1, cols.identifier),
            });
        }

        let invalid = |field: &str, value: &str, reason: String| BrierError::InvalidValue {
            table: name.to_string(),
            field: field.to_string(),
            identifier: identifier.clone(),
            value: value.to_string(),
            reason,
        };

        let outcome_raw = row.get(&cols.outcome_binary);
        let outcome_binary = if outcome_raw.is_empty() {
            None
        } else {
            Some(parse_binary(outcome_raw).map_err(|r| invalid(&cols.outcome_binary, outcome_raw, r))?)
        };

        let score_raw = row.get(&cols.brier_score);
        let brier_score = if score_raw.is_empty() {
            None
        } else {
            Some(parse_unit_float(score_raw).map_err(|r| invalid(&cols.brier_score, score_raw, r))?)
        };

        records.push(OutcomeRecord {
            outcome_binary,
            brier_score,
            outcome_date: row.get(&cols.outcome_date).to_string(),
            outcome_source: row.get(&cols.outcome_source).to_string(),
            termination_reason: row.get(&cols.termination_reason).to_string(),
            adjudication_notes: row.get(&cols.adjudication_notes).to_string(),
            identifier,
            raw: row,
        });
    }

    log::info!("{name}: {} outcome rows", records.len());
    Ok(OutcomeTable {
        headers: table.headers,
        records,
    })
}

/// A float in [0, 1]. NaN is out of range.
fn parse_unit_float(value: &str) -> Result<f64, String> {
    let x: f64 = value.parse().map_err(|_| "is not a number".to_string())?;
    if !(0.0..=1.0).contains(&x) {
        return Err("is out of range [0,1]".into());
    }
    Ok(x)
}

/// An integer that must equal 0 or 1.
fn parse_binary(value: &str) -> Result<u8, String> {
    let x: i64 = value.parse().map_err(|_| "is not an integer".to_string())?;
    match x {
        0 => Ok(0),
        1 => Ok(1),
        _ => Err("must be 0 or 1".into()),
    }
}
