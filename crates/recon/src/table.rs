use crate::error::BrierError;

/// One row of a delimited table: header name → trimmed value, in header order.
///
/// Columns the loader does not recognize ride along untouched so the outcomes
/// table can be rewritten without losing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Overwrite `column` in place, or append it when absent.
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == column) {
            Some((_, v)) => *v = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }
}

/// A parsed delimited table with trimmed headers and values.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Table {
    /// Parse `data` as a delimited table with a header row.
    ///
    /// `name` is only used in error messages. Short records are padded with
    /// empty values; fields past the header width are dropped.
    pub fn parse(name: &str, data: &str, delimiter: u8) -> Result<Self, BrierError> {
        let data = data.strip_prefix('\u{feff}').unwrap_or(data);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(data.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| malformed(name, e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(malformed(name, "missing header row"));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| malformed(name, e.to_string()))?;
            let mut row = RawRow::new();
            for (i, header) in headers.iter().enumerate() {
                row.set(header, record.get(i).unwrap_or("").trim());
            }
            rows.push(row);
        }

        Ok(Table { headers, rows })
    }

    /// Fail with every missing column listed, sorted.
    pub fn require_columns(&self, name: &str, required: &[&str]) -> Result<(), BrierError> {
        let mut missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|col| !self.headers.iter().any(|h| h == col))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort_unstable();
        missing.dedup();
        Err(malformed(
            name,
            format!("missing required columns: {}", missing.join(", ")),
        ))
    }
}

fn malformed(name: &str, reason: impl Into<String>) -> BrierError {
    BrierError::MalformedTable {
        table: name.to_string(),
        reason: reason.into(),
    }
}
