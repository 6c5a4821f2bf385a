use crate::config::ColumnMapping;
use crate::error::BrierError;
use crate::model::ScoredRow;
use crate::table::RawRow;

/// Trailing column of the scored table.
pub const WARNING_COLUMN: &str = "warning";

/// Fixed-precision rendering used for every float written out.
pub fn format_float(x: f64) -> String {
    format!("{x:.6}")
}

fn format_opt_float(x: Option<f64>) -> String {
    x.map(format_float).unwrap_or_default()
}

/// Header of the scored table: identifier, probability, outcome, score, date,
/// source, termination reason, notes, warning.
pub fn scored_headers(columns: &ColumnMapping) -> [&str; 9] {
    let [a, b, c, d, e, f, g, h] = columns.scored_columns();
    [a, b, c, d, e, f, g, h, WARNING_COLUMN]
}

/// Render the scored table.
pub fn render_scored(
    name: &str,
    rows: &[ScoredRow],
    columns: &ColumnMapping,
    delimiter: u8,
) -> Result<String, BrierError> {
    let mut writer = writer(delimiter);
    writer
        .write_record(scored_headers(columns))
        .map_err(|e| io_err(name, e))?;

    for row in rows {
        let outcome = row.outcome.map(|o| o.to_string()).unwrap_or_default();
        let probability = format_opt_float(row.probability);
        let score = format_opt_float(row.score);
        writer
            .write_record([
                row.identifier.as_str(),
                probability.as_str(),
                outcome.as_str(),
                score.as_str(),
                row.outcome_date.as_str(),
                row.outcome_source.as_str(),
                row.termination_reason.as_str(),
                row.adjudication_notes.as_str(),
                row.warning(),
            ])
            .map_err(|e| io_err(name, e))?;
    }

    finish(name, writer)
}

/// Render outcome rows under the original header order.
pub fn render_outcomes(
    name: &str,
    headers: &[String],
    rows: &[RawRow],
    delimiter: u8,
) -> Result<String, BrierError> {
    let mut writer = writer(delimiter);
    writer.write_record(headers).map_err(|e| io_err(name, e))?;
    for row in rows {
        writer
            .write_record(headers.iter().map(|h| row.get(h)))
            .map_err(|e| io_err(name, e))?;
    }
    finish(name, writer)
}

fn writer(delimiter: u8) -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(name: &str, writer: csv::Writer<Vec<u8>>) -> Result<String, BrierError> {
    let bytes = writer.into_inner().map_err(|e| io_err(name, e))?;
    String::from_utf8(bytes).map_err(|e| io_err(name, e))
}

fn io_err(name: &str, e: impl std::fmt::Display) -> BrierError {
    BrierError::Io {
        path: name.to_string(),
        message: e.to_string(),
    }
}
